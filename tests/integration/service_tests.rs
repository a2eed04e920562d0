//! Integration tests for the AirlockService → AirLock → event sink
//! pipeline.

use std::rc::Rc;

use airlock::app::commands::{AirlockCommand, Procedure};
use airlock::app::events::AirlockEvent;
use airlock::app::service::{AirlockService, StepFailure};
use airlock::config::AirlockConfig;
use airlock::{
    AirLock, AirLockError, AirLockState, Door, DoorSide, DoorState, OperationMode,
    PressureSensor, assemble,
};

use crate::mock_hw::{LoggedSensor, MockDoor, RecordingSink, call_log};

fn make_service(
    config: &AirlockConfig,
) -> (
    AirlockService<Door<PressureSensor>, PressureSensor>,
    RecordingSink,
) {
    let mut service = AirlockService::new(assemble(config).unwrap());
    let mut sink = RecordingSink::new();
    service.start(&mut sink);
    (service, sink)
}

#[test]
fn ingress_from_low_pressure_exterior() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    svc.run_procedure(Procedure::Ingress, &mut sink).unwrap();

    let expected = [
        AirlockEvent::ModeChanged {
            from: OperationMode::Manual,
            to: OperationMode::Auto,
        },
        AirlockEvent::LockPressureChanged {
            from_bar: 1.0,
            to_bar: 0.5,
        },
        AirlockEvent::DoorOpened(DoorSide::Outer),
        AirlockEvent::Unsealed,
        AirlockEvent::DoorClosed(DoorSide::Outer),
        AirlockEvent::Sealed,
        AirlockEvent::LockPressureChanged {
            from_bar: 0.5,
            to_bar: 1.0,
        },
        AirlockEvent::DoorOpened(DoorSide::Inner),
        AirlockEvent::Unsealed,
        AirlockEvent::DoorClosed(DoorSide::Inner),
        AirlockEvent::Sealed,
        AirlockEvent::ProcedureCompleted(Procedure::Ingress),
    ];
    // First event is Started.
    assert_eq!(&sink.events[1..], &expected);
    assert_eq!(svc.commands_rejected(), 0);
    assert_eq!(svc.commands_handled(), 5);
}

#[test]
fn egress_closes_open_doors_first() {
    let config = AirlockConfig {
        environment_pressure_bar: 1.0,
        inner_door: DoorState::Open,
        ..AirlockConfig::default()
    };
    let (mut svc, mut sink) = make_service(&config);
    assert_eq!(svc.status().state, AirLockState::Unsealed);

    svc.run_procedure(Procedure::Egress, &mut sink).unwrap();
    assert_eq!(sink.events[1], AirlockEvent::DoorClosed(DoorSide::Inner));
    assert_eq!(svc.status().state, AirLockState::Sealed);
    assert!(svc.airlock().is_in_auto_mode());
}

#[test]
fn procedure_keeps_auto_mode_across_runs() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    svc.run_procedure(Procedure::Ingress, &mut sink).unwrap();
    svc.run_procedure(Procedure::Egress, &mut sink).unwrap();
    let toggles = sink
        .events
        .iter()
        .filter(|e| matches!(e, AirlockEvent::ModeChanged { .. }))
        .count();
    assert_eq!(toggles, 1);
}

#[test]
fn rejected_commands_are_reported_not_swallowed() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    svc.handle_command(AirlockCommand::OpenInnerDoor, &mut sink).unwrap();

    let err = svc
        .handle_command(AirlockCommand::ToggleOperationMode, &mut sink)
        .unwrap_err();
    assert_eq!(err, AirLockError::NotSealed);
    assert_eq!(svc.status().mode, OperationMode::Manual);

    let err = svc
        .handle_command(AirlockCommand::EqualiseWithEnvironment, &mut sink)
        .unwrap_err();
    assert_eq!(err, AirLockError::NotSealed);

    assert_eq!(sink.rejections(), 2);
    assert_eq!(svc.commands_rejected(), 2);
    assert_eq!(svc.commands_handled(), 3);
}

#[test]
fn procedure_aborts_on_first_failure() {
    let log = call_log();
    let outer = MockDoor::new("outer", &log, false);
    let inner = MockDoor::new("inner", &log, true).stuck();
    let lock = Rc::new(LoggedSensor::new(1.0, &log));
    let mut svc = AirlockService::new(AirLock::new(outer, inner, lock));
    let mut sink = RecordingSink::new();

    let err = svc.run_procedure(Procedure::Ingress, &mut sink).unwrap_err();
    assert!(matches!(err, AirLockError::Door { side: DoorSide::Inner, .. }));
    assert_eq!(*log.borrow(), vec!["inner:close"]);
    assert_eq!(sink.rejections(), 1);
    assert!(
        !sink
            .events
            .contains(&AirlockEvent::ProcedureCompleted(Procedure::Ingress))
    );
    assert!(svc.airlock().is_in_manual_mode());
}

#[test]
fn journal_matches_sink_until_capacity() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    svc.handle_command(AirlockCommand::EqualiseWithEnvironment, &mut sink)
        .unwrap();
    let journal: Vec<AirlockEvent> = svc.journal().copied().collect();
    assert_eq!(journal, sink.events);
}

const STEPS_WITH_REJECTION: [AirlockCommand; 3] = [
    AirlockCommand::OpenInnerDoor,
    AirlockCommand::ToggleOperationMode,
    AirlockCommand::CloseInnerDoor,
];

#[test]
fn steps_stop_at_first_rejection() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());

    let failure = svc
        .run_steps(&STEPS_WITH_REJECTION, false, &mut sink)
        .unwrap_err();
    assert_eq!(
        failure,
        StepFailure {
            index: 1,
            command: AirlockCommand::ToggleOperationMode,
            error: AirLockError::NotSealed,
        }
    );
    assert_eq!(failure.to_string(), "step 2 (toggle_operation_mode) rejected");
    assert_eq!(svc.commands_handled(), 2);
    // The close after the rejection never ran.
    assert!(!svc.airlock().is_inner_door_closed());
}

#[test]
fn keep_going_runs_every_step_but_still_fails() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());

    let failure = svc
        .run_steps(&STEPS_WITH_REJECTION, true, &mut sink)
        .unwrap_err();
    assert_eq!(failure.index, 1);
    assert_eq!(failure.error, AirLockError::NotSealed);
    assert_eq!(svc.commands_handled(), 3);
    assert_eq!(svc.commands_rejected(), 1);
    assert_eq!(sink.rejections(), 1);
    assert_eq!(svc.status().state, AirLockState::Sealed);
}

#[test]
fn keep_going_reports_the_first_of_several_rejections() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    let steps = [
        AirlockCommand::CloseOuterDoor,
        AirlockCommand::OpenOuterDoor,
        AirlockCommand::EqualiseWithCabin,
    ];

    let failure = svc.run_steps(&steps, true, &mut sink).unwrap_err();
    assert_eq!(failure.index, 0);
    assert_eq!(failure.command, AirlockCommand::CloseOuterDoor);
    assert_eq!(svc.commands_rejected(), 2);
}

#[test]
fn accepted_steps_succeed_and_status_serialises() {
    let (mut svc, mut sink) = make_service(&AirlockConfig::default());
    let steps = [
        AirlockCommand::ToggleOperationMode,
        AirlockCommand::OpenOuterDoor,
        AirlockCommand::CloseOuterDoor,
    ];
    svc.run_steps(&steps, false, &mut sink).unwrap();

    let json: serde_json::Value = serde_json::to_value(svc.status()).unwrap();
    assert_eq!(json["state"], "sealed");
    assert_eq!(json["mode"], "auto");
    assert_eq!(json["lock_pressure_bar"], 0.5);
}
