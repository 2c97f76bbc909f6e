//! Repository layer for match persistence
//!
//! Repositories handle data that CHANGES during play: the game state written
//! by save-game and read back by load-game. The payload shape is owned here,
//! not by the interaction core.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::{StateRepository, validate_slot};
