//! Authoritative game state for the reference rules collaborator.
//!
//! Owns the placement snapshot, whose turn it is, and the turn log. The
//! interaction core only reads placements; every mutation goes through
//! [`GameState::commit_move`] and [`GameState::commit_attack`].

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use crate::action::{ActionKind, TurnRecord};
use crate::board::{Board, CellIndex};
use crate::character::{Character, CharacterKind, PositionedCharacter, Side};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::rules::{self, Reach};

/// Result of a committed attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub damage: u8,
    /// True when the target's health reached zero and it was removed.
    pub killed: bool,
    /// Placement snapshot after the attack.
    pub positions: Vec<PositionedCharacter>,
}

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StateData"))]
pub struct GameState {
    board: Board,
    positions: Vec<PositionedCharacter>,
    acting_side: Side,
    turns: Vec<TurnRecord>,
}

/// Serialized form of a [`GameState`]; placements and the turn log are
/// replayed against the board before a state is handed out.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StateData {
    board: Board,
    positions: Vec<PositionedCharacter>,
    acting_side: Side,
    turns: Vec<TurnRecord>,
}

#[cfg(feature = "serde")]
impl TryFrom<StateData> for GameState {
    type Error = GameError;

    fn try_from(data: StateData) -> Result<Self> {
        let mut state = Self::with_positions(data.board, data.positions)?;
        for turn in &data.turns {
            state.board.check(turn.from)?;
            state.board.check(turn.to)?;
        }
        state.acting_side = data.acting_side;
        state.turns = data.turns;
        Ok(state)
    }
}

impl GameState {
    /// Empty board with the player to act.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            positions: Vec::new(),
            acting_side: Side::Player,
            turns: Vec::new(),
        }
    }

    /// Builds a state from an explicit placement, validating every cell.
    pub fn with_positions(board: Board, positions: Vec<PositionedCharacter>) -> Result<Self> {
        let mut state = Self::new(board);
        for positioned in positions {
            state.spawn(positioned)?;
        }
        Ok(state)
    }

    /// Fresh match: random teams in the outer columns, player first.
    pub fn new_game(config: &GameConfig, rng: &mut impl Rng) -> Result<Self> {
        let board = Board::new(config.board_size)?;
        let mut state = Self::new(board);

        let columns = GameConfig::SPAWN_COLUMNS.min(config.board_size / 2).max(1);
        for side in [Side::Player, Side::Enemy] {
            let mut cells = state.spawn_cells(side, columns);
            if cells.len() < config.team_size {
                return Err(GameError::TeamTooLarge {
                    requested: config.team_size,
                    available: cells.len(),
                });
            }
            cells.shuffle(rng);

            for cell in cells.into_iter().take(config.team_size) {
                let kind = CharacterKind::roster_of(side)
                    .choose(rng)
                    .unwrap_or(CharacterKind::Swordsman);
                state.spawn(PositionedCharacter::new(Character::new(kind), cell))?;
            }
        }

        Ok(state)
    }

    fn spawn_cells(&self, side: Side, columns: usize) -> Vec<CellIndex> {
        let size = self.board.size();
        let cols: Vec<usize> = match side {
            Side::Player => (0..columns).collect(),
            Side::Enemy => (size - columns..size).collect(),
        };
        (0..size)
            .flat_map(|row| cols.iter().map(move |col| CellIndex(row * size + col)))
            .collect()
    }

    /// Places a character on an empty cell.
    pub fn spawn(&mut self, positioned: PositionedCharacter) -> Result<()> {
        let index = self.board.check(positioned.position)?;
        if self.character_at(index).is_some() {
            return Err(GameError::Occupied { index });
        }
        self.positions.push(positioned);
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn positions(&self) -> &[PositionedCharacter] {
        &self.positions
    }

    #[inline]
    pub fn acting_side(&self) -> Side {
        self.acting_side
    }

    pub fn set_acting_side(&mut self, side: Side) {
        self.acting_side = side;
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<TurnRecord> {
        self.turns.last().copied()
    }

    pub fn character_at(&self, index: CellIndex) -> Option<&PositionedCharacter> {
        self.positions.iter().find(|p| p.position == index)
    }

    /// Cells holding `side`'s characters, in placement order.
    pub fn owned_positions(&self, side: Side) -> Vec<CellIndex> {
        self.positions
            .iter()
            .filter(|p| p.side() == side)
            .map(|p| p.position)
            .collect()
    }

    pub fn reach(&self, from: CellIndex) -> Reach {
        rules::reach(&self.board, &self.positions, from)
    }

    fn acting_character(&self, from: CellIndex) -> Result<(usize, PositionedCharacter)> {
        let (slot, positioned) = self
            .positions
            .iter()
            .enumerate()
            .find(|(_, p)| p.position == from)
            .ok_or(GameError::EmptyCell { index: from })?;

        if positioned.side() != self.acting_side {
            return Err(GameError::NotActingSide {
                index: from,
                owner: positioned.side(),
                acting: self.acting_side,
            });
        }
        Ok((slot, *positioned))
    }

    /// Moves the acting side's character from `from` to `to`.
    pub fn commit_move(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<Vec<PositionedCharacter>> {
        self.board.check(to)?;
        let (slot, _) = self.acting_character(from)?;
        if !self.reach(from).moves.contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        self.positions[slot].position = to;
        self.turns
            .push(TurnRecord::new(self.acting_side, ActionKind::Move, from, to));

        Ok(self.positions.clone())
    }

    /// Resolves an attack from `from` on `to`, removing the target if it dies.
    pub fn commit_attack(&mut self, from: CellIndex, to: CellIndex) -> Result<AttackReport> {
        self.board.check(to)?;
        let (_, attacker) = self.acting_character(from)?;
        if !self.reach(from).attacks.contains(&to) {
            return Err(GameError::IllegalAttack { from, to });
        }

        let target_slot = self
            .positions
            .iter()
            .position(|p| p.position == to)
            .ok_or(GameError::EmptyCell { index: to })?;

        let target = &mut self.positions[target_slot].character;
        let damage = rules::damage(&attacker.character, target);
        target.health = target.health.saturating_sub(damage);
        let killed = target.health.is_dead();
        if killed {
            self.positions.remove(target_slot);
        }

        self.turns
            .push(TurnRecord::new(self.acting_side, ActionKind::Attack, from, to));

        Ok(AttackReport {
            damage,
            killed,
            positions: self.positions.clone(),
        })
    }

    /// Hands the turn to the other side and returns it.
    pub fn advance_turn(&mut self) -> Side {
        self.acting_side = self.acting_side.opponent();
        self.acting_side
    }

    /// The side left standing once its opponent has no characters.
    pub fn winner(&self) -> Option<Side> {
        let alive = |side: Side| self.positions.iter().any(|p| p.side() == side);
        match (alive(Side::Player), alive(Side::Enemy)) {
            (true, false) => Some(Side::Player),
            (false, true) => Some(Side::Enemy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Health;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn placed(kind: CharacterKind, index: usize) -> PositionedCharacter {
        PositionedCharacter::new(Character::new(kind), CellIndex(index))
    }

    fn duel() -> GameState {
        GameState::with_positions(
            Board::new(8).unwrap(),
            vec![
                placed(CharacterKind::Swordsman, 0),
                placed(CharacterKind::Daemon, 9),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_game_places_teams_in_outer_columns() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = GameConfig::default().with_team_size(4);
        let state = GameState::new_game(&config, &mut rng).unwrap();

        let size = config.board_size;
        let player = state.owned_positions(Side::Player);
        let enemy = state.owned_positions(Side::Enemy);
        assert_eq!(player.len(), 4);
        assert_eq!(enemy.len(), 4);
        assert!(player.iter().all(|i| i.0 % size < 2));
        assert!(enemy.iter().all(|i| i.0 % size >= size - 2));
        assert_eq!(state.acting_side(), Side::Player);
    }

    #[test]
    fn new_game_rejects_oversized_teams() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = GameConfig::default().with_board_size(3).with_team_size(4);
        assert!(matches!(
            GameState::new_game(&config, &mut rng),
            Err(GameError::TeamTooLarge { requested: 4, .. })
        ));
    }

    #[test]
    fn spawn_rejects_occupied_cells() {
        let mut state = duel();
        assert_eq!(
            state.spawn(placed(CharacterKind::Bowman, 9)),
            Err(GameError::Occupied { index: CellIndex(9) })
        );
    }

    #[test]
    fn move_updates_placement_and_turn_log() {
        let mut state = duel();
        let positions = state.commit_move(CellIndex(0), CellIndex(1)).unwrap();

        assert!(positions.iter().any(|p| p.position == CellIndex(1)));
        assert_eq!(
            state.last_turn(),
            Some(TurnRecord::new(
                Side::Player,
                ActionKind::Move,
                CellIndex(0),
                CellIndex(1)
            ))
        );
    }

    #[test]
    fn illegal_actions_are_rejected_without_side_effects() {
        let mut state = duel();
        assert_eq!(
            state.commit_move(CellIndex(0), CellIndex(9)),
            Err(GameError::IllegalMove {
                from: CellIndex(0),
                to: CellIndex(9)
            })
        );
        assert!(matches!(
            state.commit_move(CellIndex(9), CellIndex(10)),
            Err(GameError::NotActingSide { .. })
        ));
        assert!(state.turns().is_empty());
    }

    #[test]
    fn lethal_attack_removes_target_and_decides_winner() {
        let mut state = duel();
        let weak = state
            .positions
            .iter_mut()
            .find(|p| p.position == CellIndex(9))
            .unwrap();
        weak.character.health = Health::new(20).unwrap();

        let report = state.commit_attack(CellIndex(0), CellIndex(9)).unwrap();

        assert_eq!(report.damage, 30);
        assert!(report.killed);
        assert_eq!(report.positions.len(), 1);
        assert_eq!(state.winner(), Some(Side::Player));
        assert!(state.last_turn().unwrap().is_attack());
    }

    #[test]
    fn advance_turn_alternates_sides() {
        let mut state = duel();
        assert_eq!(state.advance_turn(), Side::Enemy);
        assert_eq!(state.advance_turn(), Side::Player);
    }
}
