//! Kinds of yard cranes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The role a crane plays in the yard.
///
/// All kinds share the same transfer rules; the kind only labels the crane
/// in logs and transfer reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraneKind {
    /// General-purpose yard crane.
    #[default]
    Yard,
    /// Works the stacks of a stacking block, handing containers to and
    /// from straddle carriers.
    AutomaticStacking,
    /// Loads and unloads freight trains.
    TrainLoading,
    /// Loads and unloads ships at a berth.
    BoatLoading,
}

impl fmt::Display for CraneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yard => write!(f, "yard crane"),
            Self::AutomaticStacking => write!(f, "automatic stacking crane"),
            Self::TrainLoading => write!(f, "train loading crane"),
            Self::BoatLoading => write!(f, "boat loading crane"),
        }
    }
}
