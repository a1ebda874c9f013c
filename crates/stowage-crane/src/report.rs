//! Records of completed crane transfers.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stowage_common::types::ContainerId;

use crate::kind::CraneKind;

/// Direction of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// From the top of a stack onto the crane.
    Pickup,
    /// From the crane onto the top of a stack.
    PutDown,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pickup => write!(f, "pickup"),
            Self::PutDown => write!(f, "put-down"),
        }
    }
}

/// Summary of one completed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Container that changed hands.
    pub container: ContainerId,
    /// Direction of the transfer.
    pub kind: TransferKind,
    /// Crane that performed it.
    pub crane: CraneKind,
    /// Wall-clock time the transfer started.
    pub started_at: DateTime<Utc>,
    /// Time spent on the mechanical steps.
    pub elapsed: Duration,
}
