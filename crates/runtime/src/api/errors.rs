//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the rules collaborator, the persistence repository, and
//! the presentation surface so hosts can bubble them up with consistent
//! context.
use thiserror::Error;

use game_core::{CellIndex, GameError, Side};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("board surface is not bound to a render target")]
    NotBound,

    #[error("board surface was already rendered for this binding")]
    AlreadyRendered,

    #[error("cell {index} is outside a board of {cells} cells")]
    CellOutOfBounds { index: CellIndex, cells: usize },

    #[error("strategy for {provided} cannot act while {expected} holds the turn")]
    NotActingSide { expected: Side, provided: Side },

    #[error("session input channel closed")]
    InputChannelClosed,

    #[error(transparent)]
    Rules(#[from] GameError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// True for errors a user can see and dismiss without ending the session.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, RuntimeError::Repository(_) | RuntimeError::Rules(_))
    }
}
