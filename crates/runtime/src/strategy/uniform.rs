//! Uniform-random play.
use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use game_core::{ActionKind, Side};

use super::StrategyOutcome;
use crate::api::Result;
use crate::controller::{ClickOutcome, InteractionController, InteractionState};

/// Draws the side's characters in random order without replacement. The
/// first one with a non-empty reach plays a random target, or a random
/// destination when it has no target.
pub(super) async fn play(
    side: Side,
    rng: &mut impl Rng,
    ctl: &mut InteractionController<'_>,
    mut state: InteractionState,
) -> Result<(InteractionState, StrategyOutcome)> {
    let mut sources = ctl.rules().owned_positions(side);
    sources.shuffle(rng);

    for source in sources {
        let (next, outcome) = ctl.click(state, source).await?;
        state = next;
        if !matches!(outcome, ClickOutcome::Armed { .. }) {
            continue;
        }

        let Some((kind, target)) = state.reach().and_then(|reach| {
            if !reach.attacks.is_empty() {
                let target = reach.attacks.iter().copied().choose(rng)?;
                Some((ActionKind::Attack, target))
            } else {
                let target = reach.moves.iter().copied().choose(rng)?;
                Some((ActionKind::Move, target))
            }
        }) else {
            tracing::trace!(%source, "character has no legal action");
            continue;
        };

        state = state.arm(kind);
        let (next, outcome) = ctl.click(state, target).await?;
        state = next;
        if let ClickOutcome::Committed(record) = outcome {
            return Ok((state, StrategyOutcome::Committed(record)));
        }
    }

    Ok((ctl.reset()?, StrategyOutcome::NoLegalAction))
}
