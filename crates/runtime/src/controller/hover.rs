//! Hover feedback: tooltip text and cursor choice.
use game_core::{CellIndex, Character, Side};

use super::state::InteractionState;
use crate::surface::{ColorTag, Cursor};

/// Tooltip shown over a character.
pub fn tooltip(character: &Character) -> String {
    format!(
        "🎖{} ⚔{} 🛡{} ❤{}",
        character.level,
        character.attack(),
        character.defence(),
        character.health.value()
    )
}

/// Cursor and optional preview selection for hovering `index`.
///
/// `occupant` is the side of the character on `index`, if any.
pub fn feedback(
    state: &InteractionState,
    index: CellIndex,
    occupant: Option<Side>,
    acting: Side,
) -> (Cursor, Option<ColorTag>) {
    if occupant == Some(acting) {
        return (Cursor::Pointer, None);
    }
    let Some(reach) = state.reach() else {
        return (Cursor::Auto, None);
    };
    if reach.moves.contains(&index) {
        (Cursor::Pointer, Some(ColorTag::Green))
    } else if reach.attacks.contains(&index) {
        (Cursor::Crosshair, Some(ColorTag::Red))
    } else {
        (Cursor::NotAllowed, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CharacterKind, Health, Reach};
    use std::collections::BTreeSet;

    #[test]
    fn tooltip_lists_level_attack_defence_health() {
        let bowman = Character::new(CharacterKind::Bowman).with_health(Health::new(73).unwrap());
        assert_eq!(tooltip(&bowman), "🎖1 ⚔25 🛡25 ❤73");
    }

    #[test]
    fn idle_hover_points_only_at_own_characters() {
        let idle = InteractionState::Idle;
        assert_eq!(
            feedback(&idle, CellIndex(3), Some(Side::Player), Side::Player),
            (Cursor::Pointer, None)
        );
        assert_eq!(
            feedback(&idle, CellIndex(3), Some(Side::Enemy), Side::Player),
            (Cursor::Auto, None)
        );
        assert_eq!(
            feedback(&idle, CellIndex(3), None, Side::Player),
            (Cursor::Auto, None)
        );
    }

    #[test]
    fn armed_hover_previews_destinations_and_targets() {
        let armed = InteractionState::activate(
            CellIndex(0),
            Reach {
                moves: BTreeSet::from([CellIndex(1)]),
                attacks: BTreeSet::from([CellIndex(2)]),
            },
        );
        assert_eq!(
            feedback(&armed, CellIndex(1), None, Side::Player),
            (Cursor::Pointer, Some(ColorTag::Green))
        );
        assert_eq!(
            feedback(&armed, CellIndex(2), Some(Side::Enemy), Side::Player),
            (Cursor::Crosshair, Some(ColorTag::Red))
        );
        assert_eq!(
            feedback(&armed, CellIndex(7), None, Side::Player),
            (Cursor::NotAllowed, None)
        );
    }
}
