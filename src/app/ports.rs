//! Port traits: the hexagonal boundary between the airlock core and the
//! outside world.
//!
//! ```text
//!   AirlockService (domain) ──▶ EventSink ──▶ Adapter
//! ```
//!
//! The sensor and door capabilities the core consumes are ports too; they
//! live next to their implementations in
//! [`PressurePort`](crate::sensors::PressurePort) and
//! [`DoorPort`](crate::door::DoorPort).

use super::events::AirlockEvent;

/// The domain emits structured [`AirlockEvent`]s through this port.
/// Adapters decide where they go (log, stdout, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &AirlockEvent);
}

/// Discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AirlockEvent) {}
}
