//! Committed actions and the turn log entry they leave behind.

use strum::{AsRefStr, Display};

use crate::board::CellIndex;
use crate::character::Side;

/// Kind of action a character can commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Move,
    Attack,
}

/// The last committed action of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    pub side: Side,
    pub action: ActionKind,
    pub from: CellIndex,
    pub to: CellIndex,
}

impl TurnRecord {
    pub const fn new(side: Side, action: ActionKind, from: CellIndex, to: CellIndex) -> Self {
        Self {
            side,
            action,
            from,
            to,
        }
    }

    #[inline]
    pub const fn is_attack(&self) -> bool {
        matches!(self.action, ActionKind::Attack)
    }
}
