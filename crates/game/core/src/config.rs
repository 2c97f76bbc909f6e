use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Visual theme of the board. Purely cosmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Prairie,
    Desert,
    Arctic,
    Mountain,
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: usize,
    /// Characters spawned per side by a new game.
    pub team_size: usize,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOARD_SIZE: usize = 8;
    pub const DEFAULT_TEAM_SIZE: usize = 2;
    /// Columns from each board edge where a side's team starts.
    pub const SPAWN_COLUMNS: usize = 2;

    pub fn new() -> Self {
        Self {
            board_size: Self::DEFAULT_BOARD_SIZE,
            team_size: Self::DEFAULT_TEAM_SIZE,
        }
    }

    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = team_size;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
