//! Repository contract for saving and loading match state.

use game_core::GameState;

use super::error::{RepositoryError, Result};

/// Repository for game state persistence and loading
///
/// States are stored under named slots. Saving to an existing slot replaces
/// it. Implementations never retry a failed operation.
pub trait StateRepository: Send + Sync {
    /// Save a game state into `slot`
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Load the game state stored in `slot`
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    /// Check if a slot holds a state
    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all occupied slots, sorted
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Rejects slot names that could escape a storage directory.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_are_restricted() {
        assert!(validate_slot("quicksave").is_ok());
        assert!(validate_slot("slot_2-b").is_ok());
        assert!(validate_slot("").is_err());
        assert!(validate_slot("../etc").is_err());
        assert!(validate_slot("a b").is_err());
    }
}
