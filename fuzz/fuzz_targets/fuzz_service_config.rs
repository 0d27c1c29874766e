//! Fuzzes service configuration parsing and validation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_service_config
#![no_main]
use libfuzzer_sys::fuzz_target;
use smcwd::prelude::*;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<ServiceConfig>(data) else {
        return;
    };

    let valid = config.validate().is_ok();
    let handler = WatchdogSmcHandler::with_config(SimulatedWatchdog::default(), config);
    assert_eq!(handler.is_ok(), valid);

    if let Ok(mut handler) = handler {
        let id = u64::from(config.watchdog_function_id().raw());
        let out = handler.call([id, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(out.first(), Some(&0));
    }
});
