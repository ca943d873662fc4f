//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::SessionSnapshot;

use super::{RepositoryError, Result, SessionRepository, validate_slot};

/// In-memory implementation of SessionRepository.
pub struct InMemorySessionRepository {
    slots: RwLock<HashMap<String, SessionSnapshot>>,
}

impl InMemorySessionRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_owned(), snapshot.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut names: Vec<String> = slots.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_slot_names_are_rejected() {
        let repo = InMemorySessionRepository::new();
        assert!(matches!(
            repo.load("../escape"),
            Err(RepositoryError::InvalidSlot(_))
        ));
        assert!(matches!(repo.delete(""), Err(RepositoryError::InvalidSlot(_))));
        assert!(!repo.exists("nothing-here"));
        assert!(repo.list_slots().unwrap().is_empty());
    }
}
