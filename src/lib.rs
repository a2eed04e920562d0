//! Airlock control library.
//!
//! Models the control logic of a two-door airlock: an outer door facing
//! the environment, an inner door facing the cabin and a lock chamber
//! between them, each volume watched by a pressure sensor.
//!
//! * [`sensors`]: the pressure sensor capability and its in-memory sensor.
//! * [`door`]: pressure-interlocked doors.
//! * [`airlock`]: seal state, manual/auto modes and equalisation.
//! * [`app`]: command-driven service emitting structured events.
//!
//! Everything is single-threaded and synchronous.

pub mod adapters;
pub mod airlock;
pub mod app;
pub mod config;
pub mod door;
pub mod error;
pub mod sensors;

pub use airlock::{AirLock, AirLockState, AirlockStatus, DoorSide, OperationMode, assemble};
pub use door::{Door, DoorPort, DoorState, TOLERANCE};
pub use error::{AirLockError, DoorError, Error, PressureError};
pub use sensors::{PressurePort, PressureSensor};
