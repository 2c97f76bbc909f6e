//! Retaliation play.
use rand::Rng;

use game_core::{ActionKind, Side};

use super::{StrategyOutcome, uniform};
use crate::api::Result;
use crate::controller::{ClickOutcome, InteractionController, InteractionState};

/// If the last turn was an attack on one of `side`'s characters and the
/// attacker is still within that character's attack reach, strikes back.
/// Otherwise plays uniformly at random. Commits at most one action.
pub(super) async fn play(
    side: Side,
    rng: &mut impl Rng,
    ctl: &mut InteractionController<'_>,
    mut state: InteractionState,
) -> Result<(InteractionState, StrategyOutcome)> {
    if let Some(turn) = ctl.rules().last_turn()
        && turn.is_attack()
        && ctl
            .rules()
            .character_at(turn.to)
            .is_some_and(|victim| victim.side() == side)
    {
        let (next, outcome) = ctl.click(state, turn.to).await?;
        state = next;

        let can_retaliate = state
            .reach()
            .is_some_and(|reach| reach.attacks.contains(&turn.from));
        if matches!(outcome, ClickOutcome::Armed { .. }) && can_retaliate {
            state = state.arm(ActionKind::Attack);
            let (next, outcome) = ctl.click(state, turn.from).await?;
            state = next;
            if let ClickOutcome::Committed(record) = outcome {
                tracing::debug!(from = %record.from, to = %record.to, "retaliated");
                return Ok((state, StrategyOutcome::Committed(record)));
            }
        }
        tracing::debug!(attacker = %turn.from, "retaliation not possible");
    }

    uniform::play(side, rng, ctl, state).await
}
