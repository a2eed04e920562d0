//! Two-door airlock.
//!
//! The airlock owns an outer door (environment side) and an inner door
//! (cabin side) and shares the lock-chamber pressure sensor with them.
//!
//! ## Modes
//!
//! * **Manual**: each call does exactly what it says.  Sequencing is the
//!   operator's problem; the doors' own pressure interlock still applies.
//! * **Auto**: opening a door first closes the opposite door if needed,
//!   then equalises the chamber with the side being opened, then opens.
//!   Both doors are never open together and no door opens across a
//!   differential.
//!
//! ## Seal state
//!
//! `Sealed` iff both doors are closed.  The state is computed from the
//! doors on every read, so it cannot drift from them whatever path
//! mutated a door.

use core::fmt;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AirlockConfig;
use crate::door::{Door, DoorAction, DoorPort, DoorState};
use crate::error::{self, AirLockError};
use crate::sensors::{PressurePort, PressureSensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirLockState {
    Sealed,
    Unsealed,
}

impl fmt::Display for AirLockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sealed => write!(f, "sealed"),
            Self::Unsealed => write!(f, "unsealed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    Manual,
    Auto,
}

impl OperationMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Manual => Self::Auto,
            Self::Auto => Self::Manual,
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Which of the two doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorSide {
    /// Faces the external environment.
    Outer,
    /// Faces the cabin.
    Inner,
}

impl DoorSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Outer => Self::Inner,
            Self::Inner => Self::Outer,
        }
    }
}

impl fmt::Display for DoorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outer => write!(f, "outer"),
            Self::Inner => write!(f, "inner"),
        }
    }
}

/// Point-in-time view of the airlock, cheap to copy and serialise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirlockStatus {
    pub state: AirLockState,
    pub mode: OperationMode,
    pub outer_door: DoorState,
    pub inner_door: DoorState,
    /// Lock-chamber pressure (bar).
    pub lock_pressure_bar: f64,
    /// Outer door's external reading (bar).
    pub environment_pressure_bar: f64,
    /// Inner door's external reading (bar).
    pub cabin_pressure_bar: f64,
}

// ---------------------------------------------------------------------------
// AirLock
// ---------------------------------------------------------------------------

pub struct AirLock<D: DoorPort, S: PressurePort + ?Sized> {
    outer: D,
    inner: D,
    lock: Rc<S>,
    mode: OperationMode,
}

/// The concrete airlock built by [`assemble`].
pub type StandardAirLock = AirLock<Door<PressureSensor>, PressureSensor>;

impl<D: DoorPort, S: PressurePort + ?Sized> AirLock<D, S> {
    /// Take ownership of both doors.  Starts in [`OperationMode::Manual`].
    pub fn new(outer: D, inner: D, lock: Rc<S>) -> Self {
        let airlock = Self {
            outer,
            inner,
            lock,
            mode: OperationMode::Manual,
        };
        info!("airlock created: {airlock}");
        airlock
    }

    // ── Door operations ───────────────────────────────────────

    pub fn open_outer_door(&mut self) -> Result<(), AirLockError> {
        self.open_door(DoorSide::Outer)
    }

    pub fn open_inner_door(&mut self) -> Result<(), AirLockError> {
        self.open_door(DoorSide::Inner)
    }

    pub fn close_outer_door(&mut self) -> Result<(), AirLockError> {
        self.close_door(DoorSide::Outer)
    }

    pub fn close_inner_door(&mut self) -> Result<(), AirLockError> {
        self.close_door(DoorSide::Inner)
    }

    // ── Equalisation ──────────────────────────────────────────

    /// Bring the chamber to the environment pressure (outer door's
    /// external reading).  Only while sealed.
    pub fn equalise_with_environment_pressure(&mut self) -> Result<(), AirLockError> {
        self.equalise_towards(DoorSide::Outer)
    }

    /// Bring the chamber to the cabin pressure (inner door's external
    /// reading).  Only while sealed.
    pub fn equalise_with_cabin_pressure(&mut self) -> Result<(), AirLockError> {
        self.equalise_towards(DoorSide::Inner)
    }

    // ── Mode ──────────────────────────────────────────────────

    /// Flip manual ↔ auto.  Only while sealed.
    pub fn toggle_operation_mode(&mut self) -> Result<(), AirLockError> {
        if !self.is_sealed() {
            warn!("mode toggle refused: airlock is not sealed");
            return Err(AirLockError::NotSealed);
        }
        let next = self.mode.toggled();
        info!("airlock mode: {} -> {}", self.mode, next);
        self.mode = next;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_outer_door_closed(&self) -> bool {
        self.outer.is_closed()
    }

    pub fn is_inner_door_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn is_in_manual_mode(&self) -> bool {
        self.mode == OperationMode::Manual
    }

    pub fn is_in_auto_mode(&self) -> bool {
        self.mode == OperationMode::Auto
    }

    pub fn is_sealed(&self) -> bool {
        self.outer.is_closed() && self.inner.is_closed()
    }

    pub fn is_unsealed(&self) -> bool {
        !self.is_sealed()
    }

    pub fn state(&self) -> AirLockState {
        if self.is_sealed() {
            AirLockState::Sealed
        } else {
            AirLockState::Unsealed
        }
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn lock_pressure(&self) -> f64 {
        self.lock.pressure()
    }

    pub fn outer_door(&self) -> &D {
        &self.outer
    }

    pub fn inner_door(&self) -> &D {
        &self.inner
    }

    pub fn status(&self) -> AirlockStatus {
        AirlockStatus {
            state: self.state(),
            mode: self.mode,
            outer_door: self.outer.state(),
            inner_door: self.inner.state(),
            lock_pressure_bar: self.lock.pressure(),
            environment_pressure_bar: self.outer.external_pressure(),
            cabin_pressure_bar: self.inner.external_pressure(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn door(&self, side: DoorSide) -> &D {
        match side {
            DoorSide::Outer => &self.outer,
            DoorSide::Inner => &self.inner,
        }
    }

    fn door_mut(&mut self, side: DoorSide) -> &mut D {
        match side {
            DoorSide::Outer => &mut self.outer,
            DoorSide::Inner => &mut self.inner,
        }
    }

    fn open_door(&mut self, side: DoorSide) -> Result<(), AirLockError> {
        if self.door(side).is_open() {
            warn!("{side} door open refused: already open");
            return Err(AirLockError::DoorAlreadyOpen(side));
        }

        if self.mode == OperationMode::Auto {
            let opposite = side.opposite();
            if self.door(opposite).is_open() {
                self.close_door(opposite)?;
            }
            self.equalise_towards(side)?;
        }

        self.door_mut(side)
            .open()
            .map_err(|source| AirLockError::Door {
                side,
                action: DoorAction::Open,
                source,
            })?;
        info!("{side} door opened, airlock {}", self.state());
        Ok(())
    }

    fn close_door(&mut self, side: DoorSide) -> Result<(), AirLockError> {
        self.door_mut(side)
            .close()
            .map_err(|source| AirLockError::Door {
                side,
                action: DoorAction::Close,
                source,
            })?;
        info!("{side} door closed, airlock {}", self.state());
        Ok(())
    }

    /// Set the chamber pressure to the external reading of the door on
    /// `side`: the environment for the outer door, the cabin for the inner.
    fn equalise_towards(&mut self, side: DoorSide) -> Result<(), AirLockError> {
        if !self.is_sealed() {
            warn!("equalisation towards {side} door refused: airlock is not sealed");
            return Err(AirLockError::NotSealed);
        }
        let target = self.door(side).external_pressure();
        let before = self.lock.pressure();
        self.lock.set_pressure(target)?;
        debug!("lock chamber equalised towards {side} door: {before:.3} -> {target:.3} bar");
        Ok(())
    }
}

impl<D: DoorPort, S: PressurePort + ?Sized> fmt::Display for AirLock<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "airlock {}, mode {}", self.state(), self.mode)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Wire the standard airlock described by `config`.
///
/// ```text
///  environment ─┤ outer door ├─ lock chamber ─┤ inner door ├─ cabin
///     (ext)          (int)         (int)           (ext)
/// ```
///
/// The lock-chamber sensor is shared by both doors and the airlock.
pub fn assemble(config: &AirlockConfig) -> error::Result<StandardAirLock> {
    config.validate()?;

    let environment = Rc::new(PressureSensor::new(config.environment_pressure_bar)?);
    let cabin = Rc::new(PressureSensor::new(config.cabin_pressure_bar)?);
    let lock = Rc::new(PressureSensor::new(config.lock_pressure_bar)?);

    let outer = Door::builder()
        .external(environment)
        .internal(Rc::clone(&lock))
        .state(config.outer_door)
        .tolerance(config.pressure_tolerance_bar)
        .build()?;
    let inner = Door::builder()
        .external(cabin)
        .internal(Rc::clone(&lock))
        .state(config.inner_door)
        .tolerance(config.pressure_tolerance_bar)
        .build()?;

    Ok(AirLock::new(outer, inner, lock))
}
