//! Event types for different topics.

use serde::{Deserialize, Serialize};

use game_core::{Side, TurnRecord};

/// Events related to turn progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// An action was committed and the turn handed to `next`.
    Committed { record: TurnRecord, next: Side },

    /// `side` had no legal action and passed its turn.
    Passed { side: Side },
}

/// Session lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh match was dealt.
    NewGame,

    Saved { slot: String },

    Loaded { slot: String },

    /// A lifecycle operation failed. Already shown to the user.
    Failed { operation: String, error: String },

    /// One side has no characters left.
    GameOver { winner: Side },
}
