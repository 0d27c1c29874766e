//! Property-based tests for the watchdog service invariants.

#![cfg(test)]

use proptest::prelude::*;
use smcwd::prelude::*;

fn initialized(min: u32, max: u32) -> WatchdogService<SimulatedWatchdog> {
    let mut service = WatchdogService::new(SimulatedWatchdog::with_bounds(min, max));
    let bounds = service.init();
    assert_eq!(bounds, Ok(TimeoutBounds::new(min, max)));
    service
}

fn bounds_strategy() -> impl Strategy<Value = (u32, u32)> {
    (1u32..1000).prop_flat_map(|min| (Just(min), min..min.saturating_add(5000)))
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Init),
        (0u32..5000).prop_map(Command::SetTimeout),
        (0u32..4).prop_map(Command::Enable),
        Just(Command::Pet),
        Just(Command::GetTimeLeft),
        (5u32..u32::MAX).prop_map(Command::Unknown),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_time_left_never_exceeds_timeout(
        (min, max) in bounds_strategy(),
        pick in any::<u32>(),
        elapsed in 0u64..10_000,
    ) {
        let mut service = initialized(min, max);
        let span = max - min + 1;
        let timeout = min + pick % span;

        prop_assert_eq!(service.set_timeout(timeout), Ok(()));
        prop_assert_eq!(service.enable(1), Ok(()));
        service.driver_mut().advance(elapsed);

        if let Ok(left) = service.time_left() {
            prop_assert!(left <= timeout);
        }
    }

    #[test]
    fn prop_out_of_range_timeout_is_refused(
        (min, max) in bounds_strategy(),
        below in any::<bool>(),
        offset in 1u32..1000,
    ) {
        let mut service = initialized(min, max);
        prop_assert_eq!(service.set_timeout(min), Ok(()));

        let candidate = if below {
            min.saturating_sub(offset)
        } else {
            max.saturating_add(offset)
        };
        prop_assume!(candidate < min || candidate > max);

        let result = service.set_timeout(candidate);
        prop_assert!(matches!(result, Err(ServiceError::InvalidParameters(_))));
        prop_assert_eq!(service.context().timeout_seconds(), Some(min));
    }

    #[test]
    fn prop_disabled_refuses_pet_and_time_left(
        timeout in 1u32..3600,
        was_enabled in any::<bool>(),
    ) {
        let mut service = initialized(1, 3600);
        prop_assert_eq!(service.set_timeout(timeout), Ok(()));
        if was_enabled {
            prop_assert_eq!(service.enable(1), Ok(()));
        }
        prop_assert_eq!(service.enable(0), Ok(()));

        prop_assert_eq!(service.pet(), Err(ServiceError::Disabled));
        prop_assert_eq!(service.time_left(), Err(ServiceError::Disabled));
    }

    #[test]
    fn prop_bad_enable_flag_keeps_state(
        flag in 2u32..,
        enabled in any::<bool>(),
    ) {
        let mut service = initialized(1, 3600);
        prop_assert_eq!(service.set_timeout(10), Ok(()));
        prop_assert_eq!(service.enable(u32::from(enabled)), Ok(()));

        prop_assert_eq!(
            service.enable(flag),
            Err(ServiceError::InvalidParameters(InvalidReason::EnableFlag))
        );
        prop_assert_eq!(service.context().is_enabled(), enabled);
    }

    #[test]
    fn prop_unknown_command_has_no_effect(
        code in 5u32..,
        operand in any::<u32>(),
        enabled in any::<bool>(),
    ) {
        let mut service = initialized(1, 3600);
        prop_assert_eq!(service.set_timeout(10), Ok(()));
        if enabled {
            prop_assert_eq!(service.enable(1), Ok(()));
        }
        service.driver_mut().clear_log();
        let before = *service.context();

        let result = service.execute(Command::decode(code, operand));
        prop_assert_eq!(result, Err(ServiceError::NotSupported));
        prop_assert_eq!(*service.context(), before);
        prop_assert!(service.driver().interactions().is_empty());
    }

    #[test]
    fn prop_reinit_reports_same_bounds_and_disables(
        (min, max) in bounds_strategy(),
        enable in any::<bool>(),
    ) {
        let mut service = initialized(min, max);
        prop_assert_eq!(service.set_timeout(max), Ok(()));
        if enable {
            prop_assert_eq!(service.enable(1), Ok(()));
        }

        prop_assert_eq!(service.init(), Ok(TimeoutBounds::new(min, max)));
        prop_assert_eq!(service.state(), WatchdogState::Disabled);
        prop_assert_eq!(service.context().timeout_seconds(), Some(max));
    }

    #[test]
    fn prop_context_invariants_hold_for_any_sequence(
        commands in proptest::collection::vec(command_strategy(), 0..40),
        ticks in proptest::collection::vec(0u64..50, 0..40),
    ) {
        let mut service = WatchdogService::new(SimulatedWatchdog::with_bounds(1, 3600));
        for (i, command) in commands.into_iter().enumerate() {
            let _reply = service.execute_call(WatchdogCall { command, client_id: 0 });
            if let Some(&dt) = ticks.get(i) {
                service.driver_mut().advance(dt);
            }

            let ctx = *service.context();
            if let (Some(bounds), Some(timeout)) = (ctx.bounds(), ctx.timeout_seconds()) {
                prop_assert!(bounds.contains(timeout));
            }
            if ctx.is_enabled() {
                prop_assert!(ctx.bounds().is_some());
                prop_assert!(ctx.timeout_seconds().is_some());
            }
        }
    }

    #[test]
    fn prop_foreign_function_ids_are_rejected(
        a0 in any::<u64>(),
        rest in any::<[u64; 7]>(),
    ) {
        let id = FunctionId::from_register(a0);
        prop_assume!(id.owner() != 60);

        let mut handler = WatchdogSmcHandler::new(SimulatedWatchdog::default());
        let [a1, a2, a3, a4, a5, a6, a7] = rest;
        let out = handler.call([a0, a1, a2, a3, a4, a5, a6, a7]);

        prop_assert_eq!(
            out,
            [SmcStatus::NotSupported.to_register(), a1, a2, a3, a4, a5, a6, a7]
        );
        prop_assert_eq!(handler.state(), WatchdogState::Uninitialized);
        prop_assert!(handler.service().driver().interactions().is_empty());
    }

    #[test]
    fn prop_function_id_fields_round_trip(
        owner in 0u8..64,
        function in any::<u16>(),
    ) {
        let id = FunctionId::fast_call32(owner, function);
        prop_assert_eq!(id.owner(), owner);
        prop_assert_eq!(id.function(), function);
        prop_assert_eq!(id.reserved(), 0);
        prop_assert_eq!(FunctionId::from_register(u64::from(id.raw())), id);
    }
}
