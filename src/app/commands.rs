//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (operator
//! console, scripted test, simulator) that the
//! [`AirlockService`](super::service::AirlockService) maps onto airlock
//! operations.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// One airlock operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirlockCommand {
    OpenOuterDoor,
    OpenInnerDoor,
    CloseOuterDoor,
    CloseInnerDoor,
    EqualiseWithEnvironment,
    EqualiseWithCabin,
    ToggleOperationMode,
}

impl AirlockCommand {
    pub const ALL: [Self; 7] = [
        Self::OpenOuterDoor,
        Self::OpenInnerDoor,
        Self::CloseOuterDoor,
        Self::CloseInnerDoor,
        Self::EqualiseWithEnvironment,
        Self::EqualiseWithCabin,
        Self::ToggleOperationMode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::OpenOuterDoor => "open_outer_door",
            Self::OpenInnerDoor => "open_inner_door",
            Self::CloseOuterDoor => "close_outer_door",
            Self::CloseInnerDoor => "close_inner_door",
            Self::EqualiseWithEnvironment => "equalise_with_environment",
            Self::EqualiseWithCabin => "equalise_with_cabin",
            Self::ToggleOperationMode => "toggle_operation_mode",
        }
    }
}

impl fmt::Display for AirlockCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AirlockCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown airlock command: {s}"))
    }
}

/// A named transit through the airlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Procedure {
    /// Environment → cabin.
    Ingress,
    /// Cabin → environment.
    Egress,
}

impl Procedure {
    /// Door operations making up the transit, run in auto mode.
    pub fn steps(self) -> &'static [AirlockCommand] {
        match self {
            Self::Ingress => &[
                AirlockCommand::OpenOuterDoor,
                AirlockCommand::CloseOuterDoor,
                AirlockCommand::OpenInnerDoor,
                AirlockCommand::CloseInnerDoor,
            ],
            Self::Egress => &[
                AirlockCommand::OpenInnerDoor,
                AirlockCommand::CloseInnerDoor,
                AirlockCommand::OpenOuterDoor,
                AirlockCommand::CloseOuterDoor,
            ],
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingress => write!(f, "ingress"),
            Self::Egress => write!(f, "egress"),
        }
    }
}

impl FromStr for Procedure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ingress" => Ok(Self::Ingress),
            "egress" => Ok(Self::Egress),
            other => Err(format!("unknown procedure: {other}")),
        }
    }
}
