//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository, validate_slot};

const EXTENSION: &str = "json";

/// File-based implementation of StateRepository.
///
/// Stores each slot as `{slot}.json` under a base directory. Writes go to a
/// temp file first and are moved into place with an atomic rename.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("{slot}.{EXTENSION}")))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(state)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved state[{}] to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let path = self.slot_path(slot)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: GameState = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded state[{}] from {}", slot, path.display());
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted state[{}]", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_slot(stem).is_ok()
            {
                slots.push(stem.to_string());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
