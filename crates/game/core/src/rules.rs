//! Reference movement, targeting, and damage rules.
//!
//! Movement follows the eight straight and diagonal rays from a character;
//! a ray ends at the board edge, at the kind's move range, or just before the
//! first occupied cell. Attacks reach any opposing character within the
//! kind's attack range measured as chessboard distance.

use std::collections::BTreeSet;

use crate::board::{Board, CellIndex};
use crate::character::{Character, PositionedCharacter};

const RAYS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Legal destinations and targets for one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reach {
    pub moves: BTreeSet<CellIndex>,
    pub attacks: BTreeSet<CellIndex>,
}

impl Reach {
    /// True when the character can neither move nor attack.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }

    /// Union of destinations and targets.
    pub fn cells(&self) -> BTreeSet<CellIndex> {
        self.moves.union(&self.attacks).copied().collect()
    }
}

/// Computes the reach of the character standing on `from`.
///
/// Returns an empty reach when `from` is empty.
pub fn reach(board: &Board, positions: &[PositionedCharacter], from: CellIndex) -> Reach {
    let occupant = |index: CellIndex| positions.iter().find(|p| p.position == index);

    let Some(source) = occupant(from) else {
        return Reach::default();
    };
    let profile = source.character.kind.profile();
    let (row, col) = board.coords(from);

    let mut moves = BTreeSet::new();
    for (dr, dc) in RAYS {
        for step in 1..=profile.move_range as isize {
            let Some(cell) = board.index_of(row as isize + dr * step, col as isize + dc * step)
            else {
                break;
            };
            if occupant(cell).is_some() {
                break;
            }
            moves.insert(cell);
        }
    }

    let attacks = positions
        .iter()
        .filter(|p| p.side() != source.side())
        .filter(|p| board.distance(from, p.position) <= profile.attack_range)
        .map(|p| p.position)
        .collect();

    Reach { moves, attacks }
}

/// Damage dealt by `attacker` to `target`, never less than one point.
pub fn damage(attacker: &Character, target: &Character) -> u8 {
    let attack = attacker.attack();
    attack
        .saturating_sub(target.defence())
        .max(attack / 10)
        .max(1)
}
