//! Error types for the airlock core.
//!
//! Each layer has its own error enum.  Sensors raise [`PressureError`] and
//! doors raise [`DoorError`].  [`AirLockError`] wraps the lower-level error
//! it was handed, which stays reachable through
//! [`std::error::Error::source`].
//!
//! All variants are `Copy`; events carry them by value.

use core::fmt;

use crate::airlock::DoorSide;
use crate::door::{DoorAction, SensorSide, TOLERANCE};

// ---------------------------------------------------------------------------
// Crate-wide error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the three core components funnels
/// into this type (configuration, assembly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A pressure sensor rejected a value.
    Pressure(PressureError),
    /// A door could not be built or moved.
    Door(DoorError),
    /// An airlock operation failed.
    AirLock(AirLockError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure(e) => write!(f, "pressure: {e}"),
            Self::Door(e) => write!(f, "door: {e}"),
            Self::AirLock(e) => write!(f, "airlock: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pressure(e) => Some(e),
            Self::Door(e) => Some(e),
            Self::AirLock(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pressure errors
// ---------------------------------------------------------------------------

/// A proposed sensor value was rejected.  The sensor keeps its old value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressureError {
    /// Pressure below zero.
    Negative(f64),
    /// NaN or infinite pressure.
    NotFinite(f64),
}

impl fmt::Display for PressureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative(v) => write!(f, "Pressure cannot be negative, got {v} bar"),
            Self::NotFinite(v) => write!(f, "Pressure must be a finite value, got {v}"),
        }
    }
}

impl std::error::Error for PressureError {}

impl From<PressureError> for Error {
    fn from(e: PressureError) -> Self {
        Self::Pressure(e)
    }
}

// ---------------------------------------------------------------------------
// Door errors
// ---------------------------------------------------------------------------

/// A door could not be constructed or could not change state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorError {
    /// The builder was never given a sensor for this side.
    MissingSensor(SensorSide),
    /// The builder was never given an initial state.
    MissingState,
    /// Opening tolerance outside `0..=TOLERANCE` bar, or not a number.
    InvalidTolerance(f64),
    /// `open` on an open door.
    AlreadyOpen,
    /// `close` on a closed door.
    AlreadyClosed,
    /// The pressures across the door differ by more than the tolerance.
    PressureMismatch { external: f64, internal: f64 },
}

impl fmt::Display for DoorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSensor(side) => write!(f, "Door has no {side} pressure sensor"),
            Self::MissingState => write!(f, "Door has no initial state"),
            Self::InvalidTolerance(bar) => write!(
                f,
                "Door tolerance must be between 0 and {TOLERANCE} bar, but was {bar}"
            ),
            Self::AlreadyOpen => write!(f, "Door is already open"),
            Self::AlreadyClosed => write!(f, "Door is already closed"),
            Self::PressureMismatch { external, internal } => write!(
                f,
                "Pressure sensors must be equal when door is open, but were {external} and {internal}"
            ),
        }
    }
}

impl std::error::Error for DoorError {}

impl From<DoorError> for Error {
    fn from(e: DoorError) -> Self {
        Self::Door(e)
    }
}

// ---------------------------------------------------------------------------
// Airlock errors
// ---------------------------------------------------------------------------

/// An airlock operation was refused, directly or because a door or the
/// lock sensor refused its part of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirLockError {
    /// The door asked to open is already open.
    DoorAlreadyOpen(DoorSide),
    /// Equalisation and mode changes need both doors closed.
    NotSealed,
    /// A door refused an open or close.
    Door {
        side: DoorSide,
        action: DoorAction,
        source: DoorError,
    },
    /// The lock sensor refused the equalised pressure.
    Pressure(PressureError),
}

impl fmt::Display for AirLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoorAlreadyOpen(DoorSide::Outer) => write!(f, "Outer door is already open"),
            Self::DoorAlreadyOpen(DoorSide::Inner) => write!(f, "Inner door is already open"),
            Self::NotSealed => write!(f, "Airlock is not sealed"),
            Self::Door {
                side,
                action,
                source,
            } => write!(f, "Error while {action} {side} door: {source}"),
            Self::Pressure(e) => write!(f, "Error while equalising lock pressure: {e}"),
        }
    }
}

impl std::error::Error for AirLockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Door { source, .. } => Some(source),
            Self::Pressure(e) => Some(e),
            Self::DoorAlreadyOpen(_) | Self::NotSealed => None,
        }
    }
}

impl From<PressureError> for AirLockError {
    fn from(e: PressureError) -> Self {
        Self::Pressure(e)
    }
}

impl From<AirLockError> for Error {
    fn from(e: AirLockError) -> Self {
        Self::AirLock(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
