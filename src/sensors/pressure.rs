//! In-memory pressure sensor.
//!
//! Holds one non-negative reading in bar.  There is no hardware behind it:
//! the value is whatever was last written through [`PressurePort::set_pressure`],
//! either by a test harness or by the airlock equalising the lock chamber.

use core::cell::Cell;
use core::fmt;

use log::debug;

use super::{PressurePort, validate_pressure};
use crate::error::PressureError;

#[derive(Debug)]
pub struct PressureSensor {
    pressure: Cell<f64>,
}

impl PressureSensor {
    /// Create a sensor reading `initial` bar.  Fails on negative or
    /// non-finite values.
    pub fn new(initial: f64) -> Result<Self, PressureError> {
        Ok(Self {
            pressure: Cell::new(validate_pressure(initial)?),
        })
    }
}

impl PressurePort for PressureSensor {
    fn pressure(&self) -> f64 {
        self.pressure.get()
    }

    fn set_pressure(&self, bar: f64) -> Result<(), PressureError> {
        let bar = validate_pressure(bar)?;
        debug!("pressure sensor: {:.3} -> {:.3} bar", self.pressure.get(), bar);
        self.pressure.set(bar);
        Ok(())
    }
}

impl fmt::Display for PressureSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pressure sensor: {:.1} bar", self.pressure.get())
    }
}
