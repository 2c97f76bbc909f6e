//! Errors raised by the reference rules collaborator.
//!
//! Each variant carries the cells involved so callers can log a useful
//! context without re-deriving it.

use thiserror::Error;

use crate::board::CellIndex;
use crate::character::Side;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("board side length {size} is too small")]
    InvalidBoardSize { size: usize },

    #[error("tiles do not match a board of side {size}")]
    TileMismatch { size: usize },

    #[error("cell {index} is outside a board of {cells} cells")]
    OutOfBounds { index: CellIndex, cells: usize },

    #[error("health {value} is outside 0..=100")]
    InvalidHealth { value: u8 },

    #[error("no character stands on cell {index}")]
    EmptyCell { index: CellIndex },

    #[error("cell {index} is already occupied")]
    Occupied { index: CellIndex },

    #[error("character on {index} belongs to {owner}, not the acting side {acting}")]
    NotActingSide {
        index: CellIndex,
        owner: Side,
        acting: Side,
    },

    #[error("{to} is not a legal destination from {from}")]
    IllegalMove { from: CellIndex, to: CellIndex },

    #[error("{to} is not a legal attack target from {from}")]
    IllegalAttack { from: CellIndex, to: CellIndex },

    #[error("team of {requested} does not fit {available} starting cells")]
    TeamTooLarge { requested: usize, available: usize },
}
