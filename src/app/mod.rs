//! Application core: pure domain logic, zero I/O.
//!
//! Turns operator commands and named transit procedures into airlock
//! operations and reports what changed.  All output goes through the
//! [`EventSink`](ports::EventSink) port, keeping this layer testable
//! without any logging or console attached.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
