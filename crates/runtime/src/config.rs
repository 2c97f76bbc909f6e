//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::{GameConfig, Side, Theme};

use crate::events::EventBus;
use crate::strategy::StrategyKind;
use crate::surface::ProjectileSettings;

/// Session-wide configuration.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub theme: Theme,
    pub strategy: StrategyConfig,
    pub projectile: ProjectileSettings,
    pub persistence: PersistenceConfig,
    /// Capacity of each event bus topic.
    pub event_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            theme: Theme::default(),
            strategy: StrategyConfig::default(),
            projectile: ProjectileSettings::default(),
            persistence: PersistenceConfig::default(),
            event_buffer: EventBus::DEFAULT_CAPACITY,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_SIZE` - Board side length (default: 8, minimum: 2)
    /// - `TEAM_SIZE` - Characters per side in a new game (default: 2)
    /// - `THEME` - prairie | desert | arctic | mountain (default: prairie)
    /// - `STRATEGY` - random | uniform-random | revenge (default: uniform-random)
    /// - `STRATEGY_SEED` - Seed for replayable strategy choices (default: entropy)
    /// - `AUTOMATED_SIDE` - player | enemy | none (default: enemy)
    /// - `PROJECTILE_STEPS` - Interpolation steps per projectile (default: 50)
    /// - `PROJECTILE_STEP_MS` - Milliseconds between steps (default: 10)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform data dir)
    /// - `SAVE_SLOT` - Slot used by save-game and load-game (default: quicksave)
    /// - `EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<usize>("BOARD_SIZE") {
            config.game.board_size = size.max(game_core::Board::MIN_SIZE);
        }
        if let Some(team) = read_env::<usize>("TEAM_SIZE") {
            config.game.team_size = team.max(1);
        }
        if let Some(theme) = read_env::<Theme>("THEME") {
            config.theme = theme;
        }

        if let Some(kind) = read_env::<StrategyKind>("STRATEGY") {
            config.strategy.kind = kind;
        }
        if let Some(seed) = read_env::<u64>("STRATEGY_SEED") {
            config.strategy.seed = Some(seed);
        }
        if let Ok(side) = env::var("AUTOMATED_SIDE") {
            config.strategy.automated = match side.to_lowercase().as_str() {
                "none" | "off" => None,
                other => other.parse::<Side>().ok().or(config.strategy.automated),
            };
        }

        if let Some(steps) = read_env::<u32>("PROJECTILE_STEPS") {
            config.projectile.steps = steps.max(1);
        }
        if let Some(ms) = read_env::<u64>("PROJECTILE_STEP_MS") {
            config.projectile.step_period = Duration::from_millis(ms.max(1));
        }

        if let Ok(dir) = env::var("SAVE_DATA_DIR") {
            config.persistence.save_dir = PathBuf::from(dir);
        }
        if let Ok(slot) = env::var("SAVE_SLOT")
            && crate::repository::validate_slot(&slot).is_ok()
        {
            config.persistence.slot = slot;
        }

        if let Some(buffer) = read_env::<usize>("EVENT_BUFFER") {
            config.event_buffer = buffer.max(1);
        }

        config
    }
}

/// Automated player settings.
#[derive(Clone, Debug)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    pub seed: Option<u64>,
    /// Side played by the strategy; `None` leaves both sides to the host.
    pub automated: Option<Side>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::default(),
            seed: None,
            automated: Some(Side::Enemy),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PersistenceConfig {
    pub save_dir: PathBuf,
    pub slot: String,
}

impl PersistenceConfig {
    pub const DEFAULT_SLOT: &'static str = "quicksave";
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            slot: Self::DEFAULT_SLOT.to_string(),
        }
    }
}

/// Platform data directory for save slots.
///
/// - Linux: `~/.local/share/tactics/saves`
/// - macOS: `~/Library/Application Support/tactics/saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RuntimeConfig::default();
        assert_eq!(config.game.board_size, 8);
        assert_eq!(config.game.team_size, 2);
        assert_eq!(config.theme, Theme::Prairie);
        assert_eq!(config.strategy.kind, StrategyKind::UniformRandom);
        assert_eq!(config.strategy.automated, Some(Side::Enemy));
        assert_eq!(config.projectile.steps, 50);
        assert_eq!(config.projectile.step_period, Duration::from_millis(10));
        assert_eq!(config.persistence.slot, "quicksave");
        assert_eq!(config.event_buffer, 100);
    }
}
