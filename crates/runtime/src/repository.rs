//! Persistence hook for character specialization state.
//!
//! The hook is opaque to the engine: it is invoked after every accepted
//! mutation and owns nothing about transactional boundaries. The in-memory
//! implementation keeps JSON snapshots and exists for tests and tools.

use std::collections::HashMap;
use std::sync::Mutex;

use talent_core::state::CharacterState;
use talent_core::types::CharacterId;

/// Errors raised by the persistence hook.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to encode character state: {0}")]
    Encode(String),

    #[error("failed to decode character state: {0}")]
    Decode(String),
}

/// Repository contract for saving and loading character talent state.
pub trait SpecRepository: Send + Sync {
    /// Persists the full specialization state of one character.
    fn save_character(&self, state: &CharacterState) -> Result<(), RepositoryError>;

    /// Loads a character's state, `None` when nothing was ever saved.
    fn load_character(&self, id: CharacterId) -> Result<Option<CharacterState>, RepositoryError>;

    /// Drops everything stored for a character.
    fn delete_character(&self, id: CharacterId) -> Result<(), RepositoryError>;
}

/// In-memory repository holding JSON snapshots.
///
/// Thread-safe with interior mutability; suitable for tests and as a
/// reference implementation of the hook.
#[derive(Default)]
pub struct MemoryRepository {
    rows: Mutex<HashMap<CharacterId, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of characters currently stored.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }
}

impl SpecRepository for MemoryRepository {
    fn save_character(&self, state: &CharacterState) -> Result<(), RepositoryError> {
        let snapshot =
            serde_json::to_string(state).map_err(|e| RepositoryError::Encode(e.to_string()))?;
        self.rows.lock().unwrap().insert(state.id, snapshot);
        Ok(())
    }

    fn load_character(&self, id: CharacterId) -> Result<Option<CharacterState>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let Some(snapshot) = rows.get(&id) else {
            return Ok(None);
        };
        let state = serde_json::from_str(snapshot)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;
        Ok(Some(state))
    }

    fn delete_character(&self, id: CharacterId) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_round_trip() {
        let repository = MemoryRepository::new();
        let mut state = CharacterState::new(CharacterId(42));
        state.add_spec_slot(talent_core::types::TabId(1));
        state.grant_points(talent_core::types::CharacterPointType::Class, 5, 0);

        repository.save_character(&state).unwrap();
        let loaded = repository.load_character(CharacterId(42)).unwrap().unwrap();
        assert_eq!(loaded, state);

        repository.delete_character(CharacterId(42)).unwrap();
        assert!(repository.load_character(CharacterId(42)).unwrap().is_none());
    }
}
