//! Outbound application events.
//!
//! The [`AirlockService`](super::service::AirlockService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log them, print them,
//! record them for a test.

use crate::airlock::{AirlockStatus, DoorSide, OperationMode};
use crate::error::AirLockError;

use super::commands::{AirlockCommand, Procedure};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirlockEvent {
    /// The service has started (carries the initial status).
    Started(AirlockStatus),

    DoorOpened(DoorSide),

    DoorClosed(DoorSide),

    /// Both doors are closed again.
    Sealed,

    /// A door opened on a sealed airlock.
    Unsealed,

    ModeChanged { from: OperationMode, to: OperationMode },

    /// The lock-chamber reading changed (equalisation).
    LockPressureChanged { from_bar: f64, to_bar: f64 },

    /// A command failed.  Any partial progress is reported by the events
    /// emitted before this one.
    CommandRejected {
        command: AirlockCommand,
        error: AirLockError,
    },

    ProcedureCompleted(Procedure),
}
