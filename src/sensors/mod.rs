//! Sensor subsystem: the [`PressurePort`] capability and the in-memory
//! [`PressureSensor`] that implements it.
//!
//! Sensors are shared: the lock-chamber sensor is referenced by both doors
//! and by the airlock itself.  Ports therefore take `&self` for writes and
//! implementations keep their reading behind interior mutability, so a
//! write through one `Rc` handle is visible through every other handle.

pub mod pressure;

use std::rc::Rc;

use crate::error::PressureError;

pub use pressure::PressureSensor;

/// Read/write access to a single pressure reading, in bar.
pub trait PressurePort {
    /// Current reading.  Pure, no side effects.
    fn pressure(&self) -> f64;

    /// Overwrite the reading.
    ///
    /// Rejected values leave the previous reading untouched.
    fn set_pressure(&self, bar: f64) -> Result<(), PressureError>;
}

impl<T: PressurePort + ?Sized> PressurePort for Rc<T> {
    fn pressure(&self) -> f64 {
        (**self).pressure()
    }

    fn set_pressure(&self, bar: f64) -> Result<(), PressureError> {
        (**self).set_pressure(bar)
    }
}

/// Check a proposed reading: finite and non-negative.
pub fn validate_pressure(bar: f64) -> Result<f64, PressureError> {
    if !bar.is_finite() {
        return Err(PressureError::NotFinite(bar));
    }
    if bar < 0.0 {
        return Err(PressureError::Negative(bar));
    }
    Ok(bar)
}
