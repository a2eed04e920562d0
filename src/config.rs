//! Airlock configuration parameters
//!
//! Initial pressures, door states and the opening tolerance used to
//! assemble an airlock.  Loaded from JSON by the simulator; defaults match
//! the acceptance scenario of passing from a low-pressure exterior into
//! the cabin.

use serde::{Deserialize, Serialize};

use crate::door::{DoorState, TOLERANCE};
use crate::error::{Error, Result};

/// Core airlock configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlockConfig {
    // --- Pressures (bar) ---
    /// External environment, seen by the outer door's external sensor
    pub environment_pressure_bar: f64,
    /// Lock chamber, shared by both doors' internal sensors
    pub lock_pressure_bar: f64,
    /// Cabin, seen by the inner door's external sensor
    pub cabin_pressure_bar: f64,

    // --- Doors ---
    /// Largest differential a door may open against; at most [`TOLERANCE`]
    pub pressure_tolerance_bar: f64,
    pub outer_door: DoorState,
    pub inner_door: DoorState,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            // Pressures
            environment_pressure_bar: 0.5,
            lock_pressure_bar: 1.0,
            cabin_pressure_bar: 1.0,

            // Doors
            pressure_tolerance_bar: TOLERANCE,
            outer_door: DoorState::Closed,
            inner_door: DoorState::Closed,
        }
    }
}

impl AirlockConfig {
    /// Range-check every field.  Values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        let pressures = [
            (self.environment_pressure_bar, "environment pressure must be finite and non-negative"),
            (self.lock_pressure_bar, "lock pressure must be finite and non-negative"),
            (self.cabin_pressure_bar, "cabin pressure must be finite and non-negative"),
        ];
        for (value, msg) in pressures {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(msg));
            }
        }
        if !(0.0..=TOLERANCE).contains(&self.pressure_tolerance_bar) {
            return Err(Error::Config("pressure tolerance must be between 0 and 0.001 bar"));
        }
        Ok(())
    }
}
