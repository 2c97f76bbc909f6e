//! Public runtime API surface.
//!
//! This module gathers the error type and the rules collaborator contract so
//! the surface, controller and strategy layers share one vocabulary.

pub mod errors;
pub mod rules;

pub use errors::{Result, RuntimeError};
pub use rules::GameRules;
