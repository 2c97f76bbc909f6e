//! Abstraction over the rules and game-state collaborator.
//!
//! The interaction core reads placements and reach through [`GameRules`] and
//! never mutates positions itself. [`GameState`] from `game-core` is the
//! reference implementation.
use game_core::{
    AttackReport, CellIndex, GameError, GameState, PositionedCharacter, Reach, Side, TurnRecord,
};

/// Rules and state queries the interaction core depends on.
///
/// Implementations own the authoritative placement snapshot and the turn
/// log. Different implementations can back:
/// - the in-process reference rules ([`GameState`])
/// - scripted fixtures in tests
/// - a remote authority behind a synchronous cache
pub trait GameRules: Send {
    /// Side length of the board.
    fn board_size(&self) -> usize;

    /// Side whose characters may be armed right now.
    fn acting_side(&self) -> Side;

    /// Full placement snapshot for a repaint.
    fn positions(&self) -> Vec<PositionedCharacter>;

    /// Character standing on `index`, if any.
    fn character_at(&self, index: CellIndex) -> Option<PositionedCharacter>;

    /// Cells of characters currently controlled by `side`.
    fn owned_positions(&self, side: Side) -> Vec<CellIndex>;

    /// Legal destinations and targets for the character on `from`.
    fn reachable(&self, from: CellIndex) -> Reach;

    /// Applies a move and returns the updated placement.
    fn commit_move(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<Vec<PositionedCharacter>, GameError>;

    /// Applies an attack and returns its report with the updated placement.
    fn commit_attack(&mut self, from: CellIndex, to: CellIndex)
    -> Result<AttackReport, GameError>;

    /// Last committed action, if any.
    fn last_turn(&self) -> Option<TurnRecord>;

    /// Hands the turn to the next side and returns it.
    fn advance_turn(&mut self) -> Side;

    /// Side that has won, once the other side has no characters left.
    fn winner(&self) -> Option<Side>;
}

impl GameRules for GameState {
    fn board_size(&self) -> usize {
        self.board().size()
    }

    fn acting_side(&self) -> Side {
        GameState::acting_side(self)
    }

    fn positions(&self) -> Vec<PositionedCharacter> {
        GameState::positions(self).to_vec()
    }

    fn character_at(&self, index: CellIndex) -> Option<PositionedCharacter> {
        GameState::character_at(self, index).copied()
    }

    fn owned_positions(&self, side: Side) -> Vec<CellIndex> {
        GameState::owned_positions(self, side)
    }

    fn reachable(&self, from: CellIndex) -> Reach {
        self.reach(from)
    }

    fn commit_move(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<Vec<PositionedCharacter>, GameError> {
        GameState::commit_move(self, from, to)
    }

    fn commit_attack(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<AttackReport, GameError> {
        GameState::commit_attack(self, from, to)
    }

    fn last_turn(&self) -> Option<TurnRecord> {
        GameState::last_turn(self)
    }

    fn advance_turn(&mut self) -> Side {
        GameState::advance_turn(self)
    }

    fn winner(&self) -> Option<Side> {
        GameState::winner(self)
    }
}
