//! Pressure-interlocked door.
//!
//! A door separates two volumes, each watched by a pressure sensor.  It may
//! only open when both sides read the same pressure (within
//! [`TOLERANCE`]); closing is always allowed.
//!
//! ```text
//!            close (always)
//!   ┌────────┐ ◀──────────── ┌──────┐
//!   │ CLOSED │               │ OPEN │
//!   └────────┘ ────────────▶ └──────┘
//!            open (|ext − int| ≤ tolerance)
//! ```
//!
//! A refused transition returns a [`DoorError`] and leaves the state as it
//! was.

use core::fmt;
use std::rc::Rc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::DoorError;
use crate::sensors::PressurePort;

/// Largest pressure differential (bar) a door may open against.
pub const TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    Open,
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Which of a door's two sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSide {
    External,
    Internal,
}

impl fmt::Display for SensorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// The transition a door was asked to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorAction {
    Open,
    Close,
}

impl fmt::Display for DoorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "opening"),
            Self::Close => write!(f, "closing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Door port
// ---------------------------------------------------------------------------

/// What the airlock needs from a door.
pub trait DoorPort {
    /// CLOSED → OPEN, guarded by the pressure check.
    fn open(&mut self) -> Result<(), DoorError>;

    /// OPEN → CLOSED, unguarded.
    fn close(&mut self) -> Result<(), DoorError>;

    fn external_pressure(&self) -> f64;

    fn internal_pressure(&self) -> f64;

    fn is_open(&self) -> bool;

    fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Current state as an enum.
    fn state(&self) -> DoorState {
        if self.is_open() {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }
}

// ---------------------------------------------------------------------------
// Door
// ---------------------------------------------------------------------------

/// A door watched by an external-side and an internal-side sensor.
///
/// Sensors are held by `Rc` because neighbouring doors and the airlock
/// read the same lock-chamber sensor.
pub struct Door<S: PressurePort + ?Sized> {
    external: Rc<S>,
    internal: Rc<S>,
    state: DoorState,
    tolerance: f64,
}

impl<S: PressurePort + ?Sized> Door<S> {
    /// Build a door with the default [`TOLERANCE`].
    ///
    /// Fails if `initial_state` is [`DoorState::Open`] and the two sensors
    /// disagree.
    pub fn new(external: Rc<S>, internal: Rc<S>, initial_state: DoorState) -> Result<Self, DoorError> {
        Self::builder()
            .external(external)
            .internal(internal)
            .state(initial_state)
            .build()
    }

    pub fn builder() -> DoorBuilder<S> {
        DoorBuilder::default()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn check_equalised(&self) -> Result<(), DoorError> {
        let external = self.external.pressure();
        let internal = self.internal.pressure();
        // Written so that a NaN difference fails the check.
        if (external - internal).abs() <= self.tolerance {
            Ok(())
        } else {
            Err(DoorError::PressureMismatch { external, internal })
        }
    }
}

impl<S: PressurePort + ?Sized> DoorPort for Door<S> {
    fn open(&mut self) -> Result<(), DoorError> {
        if self.state == DoorState::Open {
            warn!("door open refused: already open");
            return Err(DoorError::AlreadyOpen);
        }
        if let Err(e) = self.check_equalised() {
            warn!("door open refused: {e}");
            return Err(e);
        }
        self.state = DoorState::Open;
        info!("door opened");
        Ok(())
    }

    fn close(&mut self) -> Result<(), DoorError> {
        if self.state == DoorState::Closed {
            warn!("door close refused: already closed");
            return Err(DoorError::AlreadyClosed);
        }
        self.state = DoorState::Closed;
        info!("door closed");
        Ok(())
    }

    fn external_pressure(&self) -> f64 {
        self.external.pressure()
    }

    fn internal_pressure(&self) -> f64 {
        self.internal.pressure()
    }

    fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    fn state(&self) -> DoorState {
        self.state
    }
}

impl<S: PressurePort + ?Sized> fmt::Display for Door<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "door {}, external {:.1} bar, internal {:.1} bar",
            self.state,
            self.external.pressure(),
            self.internal.pressure()
        )
    }
}

impl<S: PressurePort + ?Sized> fmt::Debug for Door<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Door")
            .field("state", &self.state)
            .field("external_bar", &self.external.pressure())
            .field("internal_bar", &self.internal.pressure())
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Step-by-step door construction.  Any part left out is reported by
/// [`build`](Self::build) rather than defaulted.
pub struct DoorBuilder<S: PressurePort + ?Sized> {
    external: Option<Rc<S>>,
    internal: Option<Rc<S>>,
    state: Option<DoorState>,
    tolerance: f64,
}

impl<S: PressurePort + ?Sized> Default for DoorBuilder<S> {
    fn default() -> Self {
        Self {
            external: None,
            internal: None,
            state: None,
            tolerance: TOLERANCE,
        }
    }
}

impl<S: PressurePort + ?Sized> DoorBuilder<S> {
    #[must_use]
    pub fn external(mut self, sensor: Rc<S>) -> Self {
        self.external = Some(sensor);
        self
    }

    #[must_use]
    pub fn internal(mut self, sensor: Rc<S>) -> Self {
        self.internal = Some(sensor);
        self
    }

    #[must_use]
    pub fn state(mut self, state: DoorState) -> Self {
        self.state = Some(state);
        self
    }

    /// Tighten the opening tolerance (bar).  [`build`](Self::build)
    /// refuses anything wider than [`TOLERANCE`].
    #[must_use]
    pub fn tolerance(mut self, bar: f64) -> Self {
        self.tolerance = bar;
        self
    }

    pub fn build(self) -> Result<Door<S>, DoorError> {
        let external = self
            .external
            .ok_or(DoorError::MissingSensor(SensorSide::External))?;
        let internal = self
            .internal
            .ok_or(DoorError::MissingSensor(SensorSide::Internal))?;
        let state = self.state.ok_or(DoorError::MissingState)?;
        if !(0.0..=TOLERANCE).contains(&self.tolerance) {
            return Err(DoorError::InvalidTolerance(self.tolerance));
        }

        let door = Door {
            external,
            internal,
            state,
            tolerance: self.tolerance,
        };
        if state == DoorState::Open {
            door.check_equalised()?;
        }
        Ok(door)
    }
}
