use crate::game::{Outcome, Phase};
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

/// Owned copy of a table's visible state.
///
/// Both dealer cards are always present; hiding the hole card is up to whoever
/// renders the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub phase: Phase,
    pub bet: u64,
    pub player: Hand,
    pub dealer: Hand,
    pub outcome: Option<Outcome>,
}

impl TableSnapshot {
    /// True while a round is being played out, the window in which spectators follow it.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::DealerTurn)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
