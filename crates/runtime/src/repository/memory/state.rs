//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository, validate_slot};

/// In-memory implementation of StateRepository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    states: RwLock<HashMap<String, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with `state` already stored in `slot`.
    pub fn with_state(slot: &str, state: GameState) -> Self {
        let mut states = HashMap::new();
        states.insert(slot.to_string(), state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        validate_slot(slot)?;
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(slot.to_string(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        validate_slot(slot)?;
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = states.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
