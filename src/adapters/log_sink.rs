//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Whatever logger the host installs decides where they
//! end up.

use log::{info, warn};

use crate::app::events::AirlockEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AirlockEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AirlockEvent) {
        match event {
            AirlockEvent::Started(s) => {
                info!(
                    "START | {} {} | outer={} inner={} | env={:.3} lock={:.3} cabin={:.3} bar",
                    s.state,
                    s.mode,
                    s.outer_door,
                    s.inner_door,
                    s.environment_pressure_bar,
                    s.lock_pressure_bar,
                    s.cabin_pressure_bar,
                );
            }
            AirlockEvent::DoorOpened(side) => info!("DOOR  | {side} opened"),
            AirlockEvent::DoorClosed(side) => info!("DOOR  | {side} closed"),
            AirlockEvent::Sealed => info!("SEAL  | sealed"),
            AirlockEvent::Unsealed => info!("SEAL  | unsealed"),
            AirlockEvent::ModeChanged { from, to } => info!("MODE  | {from} -> {to}"),
            AirlockEvent::LockPressureChanged { from_bar, to_bar } => {
                info!("LOCK  | {:.3} -> {:.3} bar", from_bar, to_bar);
            }
            AirlockEvent::CommandRejected { command, error } => {
                warn!("REJECT| {command}: {error}");
            }
            AirlockEvent::ProcedureCompleted(procedure) => info!("PROC  | {procedure} complete"),
        }
    }
}
