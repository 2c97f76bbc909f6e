//! Automated turns: liveness, termination and retaliation.

use std::cell::Cell;
use std::collections::BTreeSet;

use game_core::{
    ActionKind, AttackReport, Board, CellIndex, Character, CharacterKind, GameError, GameState,
    PositionedCharacter, Reach, Side, Theme, TurnRecord,
};
use runtime::{
    BoardSurface, GameRules, HeadlessTarget, InteractionController, InteractionState,
    RuntimeError, StrategyKind, StrategyOutcome, StrategyProcedure,
};

fn placed(kind: CharacterKind, index: usize) -> PositionedCharacter {
    PositionedCharacter::new(Character::new(kind), CellIndex(index))
}

fn surface(size: usize) -> BoardSurface {
    let mut surface = BoardSurface::new(size).unwrap();
    surface.bind(HeadlessTarget::new());
    surface.render(Theme::Arctic).unwrap();
    surface
}

fn enemy_to_act(size: usize, positions: Vec<PositionedCharacter>) -> GameState {
    let mut state = GameState::with_positions(Board::new(size).unwrap(), positions).unwrap();
    state.set_acting_side(Side::Enemy);
    state
}

#[tokio::test(start_paused = true)]
async fn single_mobile_character_always_moves() {
    let template = enemy_to_act(
        8,
        vec![
            placed(CharacterKind::Swordsman, 0),
            placed(CharacterKind::Undead, 63),
        ],
    );
    let legal = template.reach(CellIndex(63));
    assert!(legal.attacks.is_empty());
    assert!(!legal.moves.is_empty());

    let mut surface = surface(8);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::UniformRandom, Some(42));

    for trial in 0..1000 {
        let mut rules = template.clone();
        let mut ctl = InteractionController::new(&mut surface, &mut rules);
        let (state, outcome) = strategy
            .request_strategy(&mut ctl, InteractionState::Idle)
            .await
            .unwrap();

        assert_eq!(state, InteractionState::Idle, "trial {trial}");
        let StrategyOutcome::Committed(record) = outcome else {
            panic!("trial {trial}: no action committed");
        };
        assert_eq!(record.side, Side::Enemy);
        assert_eq!(record.action, ActionKind::Move);
        assert_eq!(record.from, CellIndex(63));
        assert!(legal.moves.contains(&record.to), "trial {trial}: {record:?}");
    }
}

/// Reference rules with some characters pinned in place: their reach is
/// always empty, whatever the board around them looks like.
struct PinnedRules {
    state: GameState,
    pinned: BTreeSet<CellIndex>,
    pinned_queries: Cell<usize>,
}

impl PinnedRules {
    fn new(state: GameState, pinned: impl IntoIterator<Item = usize>) -> Self {
        Self {
            state,
            pinned: pinned.into_iter().map(CellIndex).collect(),
            pinned_queries: Cell::new(0),
        }
    }
}

impl GameRules for PinnedRules {
    fn board_size(&self) -> usize {
        self.state.board().size()
    }

    fn acting_side(&self) -> Side {
        self.state.acting_side()
    }

    fn positions(&self) -> Vec<PositionedCharacter> {
        self.state.positions().to_vec()
    }

    fn character_at(&self, index: CellIndex) -> Option<PositionedCharacter> {
        self.state.character_at(index).copied()
    }

    fn owned_positions(&self, side: Side) -> Vec<CellIndex> {
        self.state.owned_positions(side)
    }

    fn reachable(&self, from: CellIndex) -> Reach {
        if self.pinned.contains(&from) {
            self.pinned_queries.set(self.pinned_queries.get() + 1);
            return Reach::default();
        }
        self.state.reach(from)
    }

    fn commit_move(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<Vec<PositionedCharacter>, GameError> {
        self.state.commit_move(from, to)
    }

    fn commit_attack(
        &mut self,
        from: CellIndex,
        to: CellIndex,
    ) -> Result<AttackReport, GameError> {
        self.state.commit_attack(from, to)
    }

    fn last_turn(&self) -> Option<TurnRecord> {
        self.state.last_turn()
    }

    fn advance_turn(&mut self) -> Side {
        self.state.advance_turn()
    }

    fn winner(&self) -> Option<Side> {
        self.state.winner()
    }
}

#[tokio::test(start_paused = true)]
async fn stuck_characters_are_skipped_for_the_mobile_one() {
    let template = enemy_to_act(
        8,
        vec![
            placed(CharacterKind::Swordsman, 0),
            placed(CharacterKind::Undead, 7),
            placed(CharacterKind::Undead, 56),
            placed(CharacterKind::Undead, 63),
        ],
    );
    let legal = template.reach(CellIndex(63));
    assert!(legal.attacks.is_empty());
    assert!(!legal.moves.is_empty());

    let mut surface = surface(8);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::UniformRandom, Some(42));
    let mut skipped = 0;

    for trial in 0..1000 {
        let mut rules = PinnedRules::new(template.clone(), [7, 56]);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);
        let (state, outcome) = strategy
            .request_strategy(&mut ctl, InteractionState::Idle)
            .await
            .unwrap();

        assert_eq!(state, InteractionState::Idle, "trial {trial}");
        let StrategyOutcome::Committed(record) = outcome else {
            panic!("trial {trial}: no action committed");
        };
        assert_eq!(record.action, ActionKind::Move);
        assert_eq!(record.from, CellIndex(63));
        assert!(legal.moves.contains(&record.to), "trial {trial}: {record:?}");
        skipped += rules.pinned_queries.get();
    }

    assert!(skipped > 0, "no trial drew a stuck character first");
}

#[tokio::test(start_paused = true)]
async fn attack_is_preferred_over_move() {
    let template = enemy_to_act(
        8,
        vec![
            placed(CharacterKind::Magician, 0),
            placed(CharacterKind::Vampire, 18),
        ],
    );
    let mut surface = surface(8);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::UniformRandom, Some(3));

    for _ in 0..50 {
        let mut rules = template.clone();
        let mut ctl = InteractionController::new(&mut surface, &mut rules);
        let (_, outcome) = strategy
            .request_strategy(&mut ctl, InteractionState::Idle)
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            StrategyOutcome::Committed(r) if r.is_attack() && r.to == CellIndex(0)
        ));
    }
}

#[tokio::test(start_paused = true)]
async fn boxed_in_side_reports_no_legal_action() {
    let mut rules = enemy_to_act(
        2,
        vec![
            placed(CharacterKind::Vampire, 0),
            placed(CharacterKind::Undead, 1),
            placed(CharacterKind::Daemon, 2),
            placed(CharacterKind::Vampire, 3),
        ],
    );
    let mut surface = surface(2);
    let mut ctl = InteractionController::new(&mut surface, &mut rules);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::UniformRandom, Some(1));

    let (state, outcome) = strategy
        .request_strategy(&mut ctl, InteractionState::Idle)
        .await
        .unwrap();

    assert_eq!(outcome, StrategyOutcome::NoLegalAction);
    assert_eq!(state, InteractionState::Idle);
    assert!(ctl.surface().selected().is_empty());
    assert!(ctl.surface().highlighted().is_empty());
    assert_eq!(ctl.rules().acting_side(), Side::Enemy);
}

#[tokio::test(start_paused = true)]
async fn strategy_refuses_to_play_out_of_turn() {
    let mut rules = GameState::with_positions(
        Board::new(8).unwrap(),
        vec![
            placed(CharacterKind::Bowman, 0),
            placed(CharacterKind::Daemon, 63),
        ],
    )
    .unwrap();
    let mut surface = surface(8);
    let mut ctl = InteractionController::new(&mut surface, &mut rules);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::UniformRandom, None);

    let result = strategy
        .request_strategy(&mut ctl, InteractionState::Idle)
        .await;
    assert!(matches!(
        result,
        Err(RuntimeError::NotActingSide {
            expected: Side::Player,
            provided: Side::Enemy
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn revenge_strikes_back_at_the_last_attacker() {
    for seed in 0..20 {
        let mut rules = GameState::with_positions(
            Board::new(8).unwrap(),
            vec![
                placed(CharacterKind::Bowman, 0),
                placed(CharacterKind::Swordsman, 24),
                placed(CharacterKind::Vampire, 2),
                placed(CharacterKind::Undead, 25),
            ],
        )
        .unwrap();
        rules.commit_attack(CellIndex(0), CellIndex(2)).unwrap();
        rules.advance_turn();

        let mut surface = surface(8);
        let mut ctl = InteractionController::new(&mut surface, &mut rules);
        let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::Revenge, Some(seed));

        let (_, outcome) = strategy
            .request_strategy(&mut ctl, InteractionState::Idle)
            .await
            .unwrap();
        let StrategyOutcome::Committed(record) = outcome else {
            panic!("seed {seed}: no action committed");
        };
        assert_eq!(record.action, ActionKind::Attack);
        assert_eq!((record.from, record.to), (CellIndex(2), CellIndex(0)));
    }
}

#[tokio::test(start_paused = true)]
async fn revenge_falls_back_when_attacker_is_out_of_reach() {
    let mut rules = GameState::with_positions(
        Board::new(8).unwrap(),
        vec![
            placed(CharacterKind::Magician, 0),
            placed(CharacterKind::Undead, 4),
        ],
    )
    .unwrap();
    rules.commit_attack(CellIndex(0), CellIndex(4)).unwrap();
    rules.advance_turn();
    let turns_before = rules.turns().len();

    let mut surface = surface(8);
    let mut ctl = InteractionController::new(&mut surface, &mut rules);
    let mut strategy = StrategyProcedure::new(Side::Enemy, StrategyKind::Revenge, Some(9));

    let (state, outcome) = strategy
        .request_strategy(&mut ctl, InteractionState::Idle)
        .await
        .unwrap();

    assert_eq!(state, InteractionState::Idle);
    let StrategyOutcome::Committed(record) = outcome else {
        panic!("fallback did not commit");
    };
    assert_eq!(record.action, ActionKind::Move);
    assert_eq!(record.from, CellIndex(4));
    assert_eq!(ctl.rules().acting_side(), Side::Player);
    drop(ctl);
    assert_eq!(rules.turns().len(), turns_before + 1);
}
