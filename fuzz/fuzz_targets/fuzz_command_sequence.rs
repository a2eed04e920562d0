//! Fuzz target: airlock command sequences
//!
//! The first three bytes pick the starting pressures, every following byte
//! picks one command.  After each command:
//! - the airlock reports sealed exactly when both doors are closed
//! - an open door separates two equalised readings
//! - the lock-chamber reading stays finite and non-negative
//!
//! cargo fuzz run fuzz_command_sequence

#![no_main]

use airlock::app::commands::AirlockCommand;
use airlock::app::ports::NullSink;
use airlock::app::service::AirlockService;
use airlock::config::AirlockConfig;
use airlock::{DoorPort, TOLERANCE, assemble};
use libfuzzer_sys::fuzz_target;

fn bar(byte: u8) -> f64 {
    f64::from(byte) / 100.0
}

fn equalised<D: DoorPort>(door: &D) -> bool {
    (door.external_pressure() - door.internal_pressure()).abs() <= TOLERANCE
}

fuzz_target!(|data: &[u8]| {
    let [environment, lock, cabin, commands @ ..] = data else {
        return;
    };

    let config = AirlockConfig {
        environment_pressure_bar: bar(*environment),
        lock_pressure_bar: bar(*lock),
        cabin_pressure_bar: bar(*cabin),
        ..AirlockConfig::default()
    };
    let Ok(airlock) = assemble(&config) else {
        return;
    };
    let mut svc = AirlockService::new(airlock);

    for &byte in commands {
        let command = AirlockCommand::ALL[usize::from(byte) % AirlockCommand::ALL.len()];
        let _ = svc.handle_command(command, &mut NullSink);

        let airlock = svc.airlock();
        let both_closed = airlock.is_outer_door_closed() && airlock.is_inner_door_closed();
        assert_eq!(airlock.is_sealed(), both_closed, "seal state after {command}");
        if airlock.outer_door().is_open() {
            assert!(equalised(airlock.outer_door()), "outer door after {command}");
        }
        if airlock.inner_door().is_open() {
            assert!(equalised(airlock.inner_door()), "inner door after {command}");
        }
        let lock_bar = airlock.lock_pressure();
        assert!(lock_bar.is_finite() && lock_bar >= 0.0, "lock pressure {lock_bar}");
    }
});
