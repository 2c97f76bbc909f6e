//! Click machine state for one turn.
use game_core::{ActionKind, CellIndex, Reach};

/// Interaction state of the acting side.
///
/// Transitions consume the current value and return the next one; the
/// controller never mutates a state in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// No source activated.
    #[default]
    Idle,
    /// A source is activated and its reach is highlighted.
    Armed {
        source: CellIndex,
        reach: Reach,
        /// Action staged by a strategy. Human clicks leave this empty and
        /// the kind is inferred from the clicked cell.
        armed: Option<ActionKind>,
    },
}

impl InteractionState {
    pub fn activate(source: CellIndex, reach: Reach) -> Self {
        InteractionState::Armed {
            source,
            reach,
            armed: None,
        }
    }

    /// Stages `kind` for the next click. Idle stays idle.
    #[must_use]
    pub fn arm(self, kind: ActionKind) -> Self {
        match self {
            InteractionState::Idle => InteractionState::Idle,
            InteractionState::Armed { source, reach, .. } => InteractionState::Armed {
                source,
                reach,
                armed: Some(kind),
            },
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, InteractionState::Armed { .. })
    }

    pub fn source(&self) -> Option<CellIndex> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Armed { source, .. } => Some(*source),
        }
    }

    pub fn reach(&self) -> Option<&Reach> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Armed { reach, .. } => Some(reach),
        }
    }

    pub fn armed(&self) -> Option<ActionKind> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Armed { armed, .. } => *armed,
        }
    }

    /// Action a click on `index` would commit.
    ///
    /// Targets win over destinations: a cell in the attack set always
    /// resolves to an attack, whatever kind is staged.
    pub fn resolve(&self, index: CellIndex) -> Option<ActionKind> {
        let reach = self.reach()?;
        if reach.attacks.contains(&index) {
            Some(ActionKind::Attack)
        } else if reach.moves.contains(&index) {
            Some(ActionKind::Move)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn reach() -> Reach {
        Reach {
            moves: BTreeSet::from([CellIndex(1), CellIndex(2)]),
            attacks: BTreeSet::from([CellIndex(9)]),
        }
    }

    #[test]
    fn idle_cannot_be_armed() {
        let state = InteractionState::Idle.arm(ActionKind::Attack);
        assert_eq!(state, InteractionState::Idle);
        assert_eq!(state.resolve(CellIndex(1)), None);
    }

    #[test]
    fn armed_state_resolves_against_its_reach() {
        let state = InteractionState::activate(CellIndex(0), reach());
        assert_eq!(state.source(), Some(CellIndex(0)));
        assert_eq!(state.armed(), None);
        assert_eq!(state.resolve(CellIndex(9)), Some(ActionKind::Attack));
        assert_eq!(state.resolve(CellIndex(2)), Some(ActionKind::Move));
        assert_eq!(state.resolve(CellIndex(5)), None);
    }

    #[test]
    fn staged_move_does_not_hide_an_attack_target() {
        let state = InteractionState::activate(CellIndex(0), reach()).arm(ActionKind::Move);
        assert_eq!(state.armed(), Some(ActionKind::Move));
        assert_eq!(state.resolve(CellIndex(9)), Some(ActionKind::Attack));
    }
}
