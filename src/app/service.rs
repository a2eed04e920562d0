//! Application service: the hexagonal core.
//!
//! [`AirlockService`] owns the airlock and turns inbound
//! [`AirlockCommand`]s into airlock operations.  Every observable change a
//! command causes (door moves, seal state, mode, chamber pressure) is
//! reported as an [`AirlockEvent`] through the injected [`EventSink`] and
//! kept in a small in-memory journal.
//!
//! ```text
//!  AirlockCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  Procedure      ──▶ │     AirlockService      │
//!                     │  AirLock · journal      │
//!                     └────────────────────────┘
//! ```

use core::fmt;

use heapless::HistoryBuffer;
use log::{info, warn};

use crate::airlock::{AirLock, AirLockState, AirlockStatus, DoorSide};
use crate::door::{DoorPort, DoorState};
use crate::error::AirLockError;
use crate::sensors::PressurePort;

use super::commands::{AirlockCommand, Procedure};
use super::events::AirlockEvent;
use super::ports::EventSink;

/// Number of events kept in the journal.
pub const JOURNAL_CAPACITY: usize = 32;

/// A command in a step list was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFailure {
    /// Position of the command in the step list.
    pub index: usize,
    pub command: AirlockCommand,
    pub error: AirLockError,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}) rejected", self.index + 1, self.command)
    }
}

impl std::error::Error for StepFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ───────────────────────────────────────────────────────────────
// AirlockService
// ───────────────────────────────────────────────────────────────

pub struct AirlockService<D: DoorPort, S: PressurePort + ?Sized> {
    airlock: AirLock<D, S>,
    journal: HistoryBuffer<AirlockEvent, JOURNAL_CAPACITY>,
    commands_handled: u64,
    commands_rejected: u64,
}

impl<D: DoorPort, S: PressurePort + ?Sized> AirlockService<D, S> {
    pub fn new(airlock: AirLock<D, S>) -> Self {
        Self {
            airlock,
            journal: HistoryBuffer::new(),
            commands_handled: 0,
            commands_rejected: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial status.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let status = self.airlock.status();
        self.emit(AirlockEvent::Started(status), sink);
        info!("AirlockService started: {}", self.airlock);
    }

    // ── Command handling ──────────────────────────────────────

    /// Run one command against the airlock.
    ///
    /// Changes are emitted even when the command fails part-way (an auto
    /// open that closed the opposite door before the final open was
    /// refused), followed by [`AirlockEvent::CommandRejected`].
    pub fn handle_command(
        &mut self,
        command: AirlockCommand,
        sink: &mut impl EventSink,
    ) -> Result<(), AirLockError> {
        let before = self.airlock.status();

        let result = match command {
            AirlockCommand::OpenOuterDoor => self.airlock.open_outer_door(),
            AirlockCommand::OpenInnerDoor => self.airlock.open_inner_door(),
            AirlockCommand::CloseOuterDoor => self.airlock.close_outer_door(),
            AirlockCommand::CloseInnerDoor => self.airlock.close_inner_door(),
            AirlockCommand::EqualiseWithEnvironment => {
                self.airlock.equalise_with_environment_pressure()
            }
            AirlockCommand::EqualiseWithCabin => self.airlock.equalise_with_cabin_pressure(),
            AirlockCommand::ToggleOperationMode => self.airlock.toggle_operation_mode(),
        };

        let after = self.airlock.status();
        self.emit_changes(&before, &after, sink);
        self.commands_handled += 1;

        if let Err(error) = result {
            self.commands_rejected += 1;
            warn!("command {command} rejected: {error}");
            self.emit(AirlockEvent::CommandRejected { command, error }, sink);
        }
        result
    }

    /// Walk through the airlock in auto mode.
    ///
    /// Any open door is closed first and the airlock is switched to auto
    /// mode if needed, then the procedure's steps run in order.  The first
    /// failing step aborts the procedure.
    pub fn run_procedure(
        &mut self,
        procedure: Procedure,
        sink: &mut impl EventSink,
    ) -> Result<(), AirLockError> {
        info!("procedure {procedure}: starting from {}", self.airlock);

        if !self.airlock.is_outer_door_closed() {
            self.handle_command(AirlockCommand::CloseOuterDoor, sink)?;
        }
        if !self.airlock.is_inner_door_closed() {
            self.handle_command(AirlockCommand::CloseInnerDoor, sink)?;
        }
        if self.airlock.is_in_manual_mode() {
            self.handle_command(AirlockCommand::ToggleOperationMode, sink)?;
        }

        for &step in procedure.steps() {
            self.handle_command(step, sink)?;
        }

        self.emit(AirlockEvent::ProcedureCompleted(procedure), sink);
        info!("procedure {procedure}: complete");
        Ok(())
    }

    /// Run a list of commands in order.
    ///
    /// Stops at the first rejected command unless `keep_going` is set.
    /// Either way the first rejection is returned, so a list with any
    /// rejected command never reports success.
    pub fn run_steps(
        &mut self,
        steps: &[AirlockCommand],
        keep_going: bool,
        sink: &mut impl EventSink,
    ) -> Result<(), StepFailure> {
        let mut first_failure = None;

        for (index, &command) in steps.iter().enumerate() {
            let Err(error) = self.handle_command(command, sink) else {
                continue;
            };
            let failure = StepFailure { index, command, error };
            if !keep_going {
                return Err(failure);
            }
            warn!("continuing after {failure}");
            first_failure.get_or_insert(failure);
        }

        first_failure.map_or(Ok(()), Err)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> AirlockStatus {
        self.airlock.status()
    }

    pub fn airlock(&self) -> &AirLock<D, S> {
        &self.airlock
    }

    /// Recent events, oldest first.
    pub fn journal(&self) -> impl Iterator<Item = &AirlockEvent> {
        self.journal.oldest_ordered()
    }

    pub fn commands_handled(&self) -> u64 {
        self.commands_handled
    }

    pub fn commands_rejected(&self) -> u64 {
        self.commands_rejected
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit(&mut self, event: AirlockEvent, sink: &mut impl EventSink) {
        self.journal.write(event);
        sink.emit(&event);
    }

    /// Report the differences between two statuses in the order they
    /// happen in an auto-mode open: closes, equalisation, mode, opens,
    /// then the seal change.
    fn emit_changes(
        &mut self,
        before: &AirlockStatus,
        after: &AirlockStatus,
        sink: &mut impl EventSink,
    ) {
        let doors = [
            (DoorSide::Outer, before.outer_door, after.outer_door),
            (DoorSide::Inner, before.inner_door, after.inner_door),
        ];

        for (side, was, now) in doors {
            if was == DoorState::Open && now == DoorState::Closed {
                self.emit(AirlockEvent::DoorClosed(side), sink);
            }
        }

        if before.lock_pressure_bar != after.lock_pressure_bar {
            self.emit(
                AirlockEvent::LockPressureChanged {
                    from_bar: before.lock_pressure_bar,
                    to_bar: after.lock_pressure_bar,
                },
                sink,
            );
        }

        if before.mode != after.mode {
            self.emit(
                AirlockEvent::ModeChanged {
                    from: before.mode,
                    to: after.mode,
                },
                sink,
            );
        }

        for (side, was, now) in doors {
            if was == DoorState::Closed && now == DoorState::Open {
                self.emit(AirlockEvent::DoorOpened(side), sink);
            }
        }

        if before.state != after.state {
            let event = match after.state {
                AirLockState::Sealed => AirlockEvent::Sealed,
                AirLockState::Unsealed => AirlockEvent::Unsealed,
            };
            self.emit(event, sink);
        }
    }
}
