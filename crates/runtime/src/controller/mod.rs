//! Interaction controller: turns clicked cells into committed actions.
//!
//! The controller is a short-lived view over the surface and the rules
//! collaborator. It owns no session state; every entry point takes the current
//! [`InteractionState`] by value and hands back the next one, so the host (or
//! a strategy) decides where that state lives.
//!
//! ```text
//! Idle --click own character--> Armed{source, reach}
//! Armed --click own character--> Armed{new source}
//! Armed --click target/destination--> commit --> Idle
//! Armed --click anything else--> Armed (unchanged)
//! ```
pub mod hover;
mod state;

use strum::{AsRefStr, Display};

use game_core::{ActionKind, CellIndex, Side, TurnRecord, chebyshev_distance};

use crate::api::{GameRules, Result};
use crate::surface::{BoardSurface, ColorTag, Cursor};

pub use state::InteractionState;

/// Why a click had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum IgnoreReason {
    /// Idle click on a character of the other side.
    NotOwnCharacter,
    /// Idle click on an empty cell.
    EmptyCell,
    /// Armed click outside both the destination and target sets.
    OutOfReach,
}

/// Effect of a single click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A source was activated (or re-activated).
    Armed { source: CellIndex },
    /// An action was committed and the turn handed on.
    Committed(TurnRecord),
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Borrowed view over the surface and the rules collaborator.
pub struct InteractionController<'a> {
    surface: &'a mut BoardSurface,
    rules: &'a mut dyn GameRules,
}

impl<'a> InteractionController<'a> {
    pub fn new(surface: &'a mut BoardSurface, rules: &'a mut dyn GameRules) -> Self {
        Self { surface, rules }
    }

    pub fn rules(&self) -> &dyn GameRules {
        &*self.rules
    }

    pub fn surface(&self) -> &BoardSurface {
        &*self.surface
    }

    /// Interprets a click on `index`.
    pub async fn click(
        &mut self,
        state: InteractionState,
        index: CellIndex,
    ) -> Result<(InteractionState, ClickOutcome)> {
        self.surface.cell(index)?;

        let acting = self.rules.acting_side();
        let occupant = self.rules.character_at(index).map(|c| c.side());
        if occupant == Some(acting) {
            return self.activate(index).map(|next| (next, ClickOutcome::Armed { source: index }));
        }

        let (Some(source), Some(kind)) = (state.source(), state.resolve(index)) else {
            let reason = match (&state, occupant) {
                (InteractionState::Armed { .. }, _) => IgnoreReason::OutOfReach,
                (InteractionState::Idle, Some(_)) => IgnoreReason::NotOwnCharacter,
                (InteractionState::Idle, None) => IgnoreReason::EmptyCell,
            };
            tracing::debug!(%index, %reason, "click ignored");
            return Ok((state, ClickOutcome::Ignored(reason)));
        };

        let record = match kind {
            ActionKind::Move => self.commit_move(acting, source, index)?,
            ActionKind::Attack => self.commit_attack(acting, source, index).await?,
        };
        let next = self.rules.advance_turn();
        tracing::debug!(next = %next, "turn advanced");

        Ok((InteractionState::Idle, ClickOutcome::Committed(record)))
    }

    /// Activates the character on `source`: selects it and highlights its
    /// reach, replacing any previous activation.
    fn activate(&mut self, source: CellIndex) -> Result<InteractionState> {
        self.clear_selection()?;

        let reach = self.rules.reachable(source);
        self.surface.select(source, ColorTag::Yellow)?;
        self.surface.highlight(reach.cells())?;

        tracing::debug!(
            %source,
            moves = reach.moves.len(),
            attacks = reach.attacks.len(),
            "source armed"
        );
        Ok(InteractionState::activate(source, reach))
    }

    fn commit_move(&mut self, side: Side, from: CellIndex, to: CellIndex) -> Result<TurnRecord> {
        let positions = self.rules.commit_move(from, to)?;
        self.clear_selection()?;
        self.surface.redraw_positions(&positions)?;

        tracing::info!(%side, %from, %to, "move committed");
        Ok(TurnRecord::new(side, ActionKind::Move, from, to))
    }

    async fn commit_attack(
        &mut self,
        side: Side,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<TurnRecord> {
        let report = self.rules.commit_attack(from, to)?;
        self.clear_selection()?;

        if chebyshev_distance(from, to, self.rules.board_size()) > 1 {
            self.surface
                .animate_projectile(from, to, ColorTag::projectile_for(side))
                .await?;
        }
        self.surface.animate_damage(to, report.damage).await?;
        self.surface.redraw_positions(&report.positions)?;

        tracing::info!(
            %side,
            %from,
            %to,
            damage = report.damage,
            killed = report.killed,
            "attack committed"
        );
        Ok(TurnRecord::new(side, ActionKind::Attack, from, to))
    }

    fn clear_selection(&mut self) -> Result<()> {
        self.surface.deselect_all()?;
        self.surface.dehighlight()?;
        self.surface.set_cursor(Cursor::Auto)
    }

    /// Drops any activation and returns to `Idle`.
    pub fn reset(&mut self) -> Result<InteractionState> {
        self.clear_selection()?;
        Ok(InteractionState::Idle)
    }

    /// Full repaint from the rules' placement snapshot.
    pub fn redraw(&mut self) -> Result<()> {
        let positions = self.rules.positions();
        self.surface.redraw_positions(&positions)
    }

    /// Pointer entered `index`: hover flag, tooltip, cursor and preview.
    pub fn enter(&mut self, state: &InteractionState, index: CellIndex) -> Result<()> {
        self.surface.enter(index)?;

        let occupant = self.rules.character_at(index);
        if let Some(positioned) = occupant {
            self.surface
                .set_tooltip(index, hover::tooltip(&positioned.character))?;
        }

        let acting = self.rules.acting_side();
        let (cursor, preview) =
            hover::feedback(state, index, occupant.map(|c| c.side()), acting);
        if let Some(color) = preview {
            self.surface.select(index, color)?;
        }
        self.surface.set_cursor(cursor)
    }

    /// Pointer left `index`: clears hover flag, tooltip and preview colour.
    pub fn leave(&mut self, state: &InteractionState, index: CellIndex) -> Result<()> {
        self.surface.leave(index)?;
        self.surface.clear_tooltip(index)?;

        let previewed = matches!(
            self.surface.cell(index)?.selection,
            Some(ColorTag::Green | ColorTag::Red)
        );
        if previewed && state.source() != Some(index) {
            self.surface.deselect(index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessTarget;
    use game_core::{Board, Character, CharacterKind, GameState, PositionedCharacter, Theme};

    fn fixture(placements: &[(CharacterKind, usize)]) -> (BoardSurface, GameState) {
        let board = Board::new(8).unwrap();
        let positions = placements
            .iter()
            .map(|(kind, i)| PositionedCharacter::new(Character::new(*kind), CellIndex(*i)))
            .collect();
        let state = GameState::with_positions(board, positions).unwrap();

        let mut surface = BoardSurface::new(8).unwrap();
        surface.bind(HeadlessTarget::new());
        surface.render(Theme::Prairie).unwrap();
        (surface, state)
    }

    #[tokio::test]
    async fn idle_clicks_on_empty_and_enemy_cells_are_ignored() {
        let (mut surface, mut rules) =
            fixture(&[(CharacterKind::Swordsman, 0), (CharacterKind::Vampire, 7)]);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);

        let (state, outcome) = ctl.click(InteractionState::Idle, CellIndex(30)).await.unwrap();
        assert_eq!(state, InteractionState::Idle);
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::EmptyCell));

        let (state, outcome) = ctl.click(state, CellIndex(7)).await.unwrap();
        assert_eq!(state, InteractionState::Idle);
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::NotOwnCharacter));
    }

    #[tokio::test]
    async fn clicking_another_own_character_rearms() {
        let (mut surface, mut rules) =
            fixture(&[(CharacterKind::Swordsman, 0), (CharacterKind::Bowman, 16)]);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);

        let (state, _) = ctl.click(InteractionState::Idle, CellIndex(0)).await.unwrap();
        let (state, outcome) = ctl.click(state, CellIndex(16)).await.unwrap();

        assert_eq!(outcome, ClickOutcome::Armed { source: CellIndex(16) });
        assert_eq!(state.source(), Some(CellIndex(16)));
        assert_eq!(
            ctl.surface().selected(),
            std::collections::BTreeSet::from([CellIndex(16)])
        );
        assert_eq!(ctl.surface().highlighted(), rules_reach(&ctl, CellIndex(16)));
    }

    fn rules_reach(
        ctl: &InteractionController<'_>,
        from: CellIndex,
    ) -> std::collections::BTreeSet<CellIndex> {
        ctl.rules().reachable(from).cells()
    }

    #[tokio::test]
    async fn move_commit_returns_to_idle_and_advances_turn() {
        let (mut surface, mut rules) =
            fixture(&[(CharacterKind::Magician, 0), (CharacterKind::Vampire, 63)]);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);

        let (state, _) = ctl.click(InteractionState::Idle, CellIndex(0)).await.unwrap();
        let (state, outcome) = ctl.click(state, CellIndex(9)).await.unwrap();

        assert_eq!(state, InteractionState::Idle);
        assert_eq!(
            outcome,
            ClickOutcome::Committed(TurnRecord::new(
                Side::Player,
                ActionKind::Move,
                CellIndex(0),
                CellIndex(9)
            ))
        );
        assert!(ctl.surface().highlighted().is_empty());
        assert!(ctl.surface().selected().is_empty());
        assert!(ctl.surface().cell(CellIndex(9)).unwrap().content.is_some());
        assert_eq!(ctl.rules().acting_side(), Side::Enemy);
    }

    #[tokio::test]
    async fn hover_previews_and_leave_clears_them() {
        let (mut surface, mut rules) =
            fixture(&[(CharacterKind::Bowman, 0), (CharacterKind::Vampire, 2)]);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);

        let (state, _) = ctl.click(InteractionState::Idle, CellIndex(0)).await.unwrap();
        ctl.enter(&state, CellIndex(2)).unwrap();
        let cell = ctl.surface().cell(CellIndex(2)).unwrap();
        assert!(cell.is_entered());
        assert_eq!(cell.selection, Some(ColorTag::Red));
        assert_eq!(cell.tooltip.as_deref(), Some("🎖1 ⚔25 🛡25 ❤100"));

        ctl.leave(&state, CellIndex(2)).unwrap();
        let cell = ctl.surface().cell(CellIndex(2)).unwrap();
        assert!(!cell.is_entered());
        assert!(cell.selection.is_none());
        assert!(cell.tooltip.is_none());
        assert_eq!(
            ctl.surface().cell(CellIndex(0)).unwrap().selection,
            Some(ColorTag::Yellow)
        );
    }
}
