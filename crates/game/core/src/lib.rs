//! Board geometry, characters, and the reference rules collaborator.
//!
//! `game-core` owns everything the interaction core treats as an external
//! collaborator: tile classification, health banding, the placement snapshot,
//! legal reach, and the turn log. It is synchronous and free of I/O so the
//! runtime and tests can drive it directly. All state mutation flows through
//! [`GameState`].
pub mod action;
pub mod board;
pub mod character;
pub mod config;
pub mod error;
pub mod rules;
pub mod state;

pub use action::{ActionKind, TurnRecord};
pub use board::{Board, CellIndex, TileKind, chebyshev_distance, tile_kind};
pub use character::{
    Character, CharacterKind, Health, HealthLevel, KindProfile, PositionedCharacter, Side,
};
pub use config::{GameConfig, Theme};
pub use error::{GameError, Result};
pub use rules::Reach;
pub use state::{AttackReport, GameState};
