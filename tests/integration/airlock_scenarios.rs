//! End-to-end scenarios against the real sensor, door and airlock types.

use std::rc::Rc;

use airlock::airlock::StandardAirLock;
use airlock::{
    AirLock, AirLockError, Door, DoorError, DoorPort, DoorSide, DoorState, PressureError,
    PressurePort, PressureSensor,
};

fn sensor(bar: f64) -> Rc<PressureSensor> {
    Rc::new(PressureSensor::new(bar).unwrap())
}

/// Outer door (environment, lock), inner door (cabin, lock), shared lock.
fn habitat(
    environment: &Rc<PressureSensor>,
    lock: &Rc<PressureSensor>,
    cabin: &Rc<PressureSensor>,
    outer: DoorState,
    inner: DoorState,
) -> StandardAirLock {
    let outer = Door::new(Rc::clone(environment), Rc::clone(lock), outer).unwrap();
    let inner = Door::new(Rc::clone(cabin), Rc::clone(lock), inner).unwrap();
    AirLock::new(outer, inner, Rc::clone(lock))
}

// ── Sensor ────────────────────────────────────────────────────

#[test]
fn rejected_sensor_write_keeps_reading() {
    let s = PressureSensor::new(1.0).unwrap();
    assert_eq!(s.set_pressure(-1.0), Err(PressureError::Negative(-1.0)));
    assert_eq!(s.pressure(), 1.0);
}

// ── Door ──────────────────────────────────────────────────────

#[test]
fn door_opens_only_when_equalised() {
    let mut d = Door::new(sensor(1.0), sensor(1.0), DoorState::Closed).unwrap();
    d.open().unwrap();
    assert!(d.is_open());

    let mut d = Door::new(sensor(1.0), sensor(5.0), DoorState::Closed).unwrap();
    assert!(matches!(d.open(), Err(DoorError::PressureMismatch { .. })));
    assert!(d.is_closed());
}

// ── Airlock ───────────────────────────────────────────────────

#[test]
fn fresh_airlock_is_sealed_manual_and_opens_outer() {
    let (env, lock, cabin) = (sensor(1.0), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);
    assert!(a.is_sealed());
    assert!(a.is_in_manual_mode());

    a.open_outer_door().unwrap();
    assert!(a.is_unsealed());
    assert!(!a.is_outer_door_closed());
}

#[test]
fn auto_open_outer_with_inner_open() {
    let (env, lock, cabin) = (sensor(0.4), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);
    a.toggle_operation_mode().unwrap();
    a.open_inner_door().unwrap();
    assert!(a.is_in_auto_mode());
    assert!(!a.is_inner_door_closed());

    a.open_outer_door().unwrap();
    assert!(a.is_inner_door_closed());
    assert!(!a.is_outer_door_closed());
    assert_eq!(lock.pressure(), env.pressure());
}

#[test]
fn toggle_on_unsealed_airlock_keeps_mode() {
    let (env, lock, cabin) = (sensor(1.0), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Open, DoorState::Closed);
    assert_eq!(a.toggle_operation_mode(), Err(AirLockError::NotSealed));
    assert!(a.is_in_manual_mode());
}

#[test]
fn double_open_outer_reports_already_open() {
    let (env, lock, cabin) = (sensor(1.0), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);
    a.open_outer_door().unwrap();
    let err = a.open_outer_door().unwrap_err();
    assert_eq!(err, AirLockError::DoorAlreadyOpen(DoorSide::Outer));
    assert_eq!(err.to_string(), "Outer door is already open");
    assert!(a.is_unsealed());
}

#[test]
fn manual_mode_leaves_sequencing_to_the_operator() {
    // Lower exterior pressure: the operator must equalise by hand.
    let (env, lock, cabin) = (sensor(0.5), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);

    assert!(a.open_outer_door().is_err());
    assert!(a.is_sealed());

    a.equalise_with_environment_pressure().unwrap();
    a.open_outer_door().unwrap();
    a.close_outer_door().unwrap();
    assert!(a.open_inner_door().is_err(), "chamber still at exterior pressure");
    a.equalise_with_cabin_pressure().unwrap();
    a.open_inner_door().unwrap();
    a.close_inner_door().unwrap();
    assert!(a.is_sealed());
    assert_eq!(lock.pressure(), 1.0);
}

#[test]
fn manual_mode_allows_both_doors_open_when_equalised() {
    let (env, lock, cabin) = (sensor(1.0), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);
    a.open_outer_door().unwrap();
    a.open_inner_door().unwrap();
    assert!(!a.is_outer_door_closed() && !a.is_inner_door_closed());
    a.close_outer_door().unwrap();
    assert!(a.is_unsealed());
    a.close_inner_door().unwrap();
    assert!(a.is_sealed());
}

#[test]
fn errors_chain_to_their_cause() {
    use std::error::Error as _;

    let (env, lock, cabin) = (sensor(2.0), sensor(1.0), sensor(1.0));
    let mut a = habitat(&env, &lock, &cabin, DoorState::Closed, DoorState::Closed);
    let err = a.open_outer_door().unwrap_err();
    let cause = err.source().map(ToString::to_string).unwrap_or_default();
    assert!(cause.contains("Pressure sensors must be equal"), "got: {cause}");
    assert!(err.to_string().ends_with(&cause));
}
