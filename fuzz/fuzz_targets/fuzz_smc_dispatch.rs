//! Fuzzes the SMC handler with arbitrary register sets.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_smc_dispatch
#![no_main]
use libfuzzer_sys::fuzz_target;
use smcwd::prelude::*;

fn word(chunk: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    for (dst, src) in bytes.iter_mut().zip(chunk) {
        *dst = *src;
    }
    u64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    let mut handler = WatchdogSmcHandler::new(SimulatedWatchdog::with_bounds(1, 600));

    // Each call is 8 registers plus one byte of clock advance.
    for call in data.chunks(65) {
        let (regs, tick) = call.split_at(call.len().min(64));
        let mut words = regs.chunks(8).map(word);
        let mut args = SmcArgs::from_array(core::array::from_fn(|_| words.next().unwrap_or(0)));
        let before = args;

        match handler.handle(&mut args) {
            Disposition::Rejected(_) => {
                assert_eq!(args.a0, SmcStatus::NotSupported.to_register());
                assert_eq!(args.a1, before.a1);
                assert_eq!(args.a7, before.a7);
            }
            Disposition::Handled(ExtraFunction::Watchdog) => {
                assert!(SmcStatus::from_register(args.a0).is_some());
                assert_eq!(args.a7, before.a7);
                assert_eq!((args.a3, args.a4, args.a5, args.a6), (before.a3, before.a4, before.a5, before.a6));
            }
            Disposition::Handled(ExtraFunction::CallsCount) => assert_eq!(args.a0, 1),
        }

        let ctx = *handler.service().context();
        if let (Some(bounds), Some(timeout)) = (ctx.bounds(), ctx.timeout_seconds()) {
            assert!(bounds.contains(timeout));
        }
        if ctx.is_enabled() {
            assert!(ctx.timeout_seconds().is_some());
        }

        if let Some(&dt) = tick.first() {
            handler.service_mut().driver_mut().advance(u64::from(dt));
        }
    }
});
