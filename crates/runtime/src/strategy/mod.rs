//! Strategy procedure for automated sides.
//!
//! A strategy plays exactly one turn by driving the same click entry point a
//! human uses: it activates a character, stages an action, and clicks a
//! candidate cell. It never touches the surface or the rules directly.

mod revenge;
mod uniform;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use game_core::{Side, TurnRecord};

use crate::api::{Result, RuntimeError};
use crate::controller::{InteractionController, InteractionState};

/// Selectable strategy variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum StrategyKind {
    /// Random character, random target, attack before move.
    #[default]
    #[strum(to_string = "uniform-random", serialize = "random")]
    UniformRandom,
    /// Strike back at the last attacker, otherwise play uniformly.
    #[strum(to_string = "revenge")]
    Revenge,
}

impl StrategyKind {
    /// Returns the strategy name for debugging and logging.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::UniformRandom => "uniform-random",
            StrategyKind::Revenge => "revenge",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::UniformRandom => {
                "Draws characters in random order and plays a random legal target, preferring attacks"
            }
            StrategyKind::Revenge => {
                "Retaliates with the character hit last turn, falling back to uniform-random"
            }
        }
    }
}

/// Result of one automated turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyOutcome {
    Committed(TurnRecord),
    /// No character of the side could move or attack. The caller decides
    /// what a pass means; the turn has not been advanced.
    NoLegalAction,
}

/// Automated player bound to one side.
#[derive(Clone, Debug)]
pub struct StrategyProcedure {
    side: Side,
    kind: StrategyKind,
    rng: ChaCha8Rng,
}

impl StrategyProcedure {
    /// Seeded strategies replay the same choices for the same board.
    pub fn new(side: Side, kind: StrategyKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { side, kind, rng }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Plays one turn for the bound side.
    ///
    /// Each character is tried at most once, so the procedure terminates even
    /// when the whole side is boxed in.
    pub async fn request_strategy(
        &mut self,
        ctl: &mut InteractionController<'_>,
        state: InteractionState,
    ) -> Result<(InteractionState, StrategyOutcome)> {
        let acting = ctl.rules().acting_side();
        if acting != self.side {
            return Err(RuntimeError::NotActingSide {
                expected: acting,
                provided: self.side,
            });
        }

        tracing::debug!(side = %self.side, strategy = self.kind.name(), "strategy requested");
        let (state, outcome) = match self.kind {
            StrategyKind::UniformRandom => {
                uniform::play(self.side, &mut self.rng, ctl, state).await?
            }
            StrategyKind::Revenge => revenge::play(self.side, &mut self.rng, ctl, state).await?,
        };

        if outcome == StrategyOutcome::NoLegalAction {
            tracing::warn!(side = %self.side, "no character can act");
        }
        Ok((state, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_parses_aliases_case_insensitively() {
        assert_eq!(
            StrategyKind::from_str("random").unwrap(),
            StrategyKind::UniformRandom
        );
        assert_eq!(
            StrategyKind::from_str("Uniform-Random").unwrap(),
            StrategyKind::UniformRandom
        );
        assert_eq!(
            StrategyKind::from_str("REVENGE").unwrap(),
            StrategyKind::Revenge
        );
        assert!(StrategyKind::from_str("greedy").is_err());
    }

    #[test]
    fn display_matches_name() {
        use strum::IntoEnumIterator;
        for kind in StrategyKind::iter() {
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}
