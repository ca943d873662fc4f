//! Repository contract for saving and loading sessions.

use game_core::SessionSnapshot;

use super::Result;

/// Persistent storage for session snapshots, addressed by slot name.
///
/// Slot names are restricted to ASCII letters, digits, `-` and `_`.
pub trait SessionRepository: Send + Sync {
    /// Save a snapshot, replacing whatever the slot held.
    fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load the snapshot in `slot`, if any.
    fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>>;

    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// All occupied slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Rejects slot names that could escape the save directory.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(super::RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
