//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::SessionSnapshot;
use sha2::{Digest, Sha256};

use super::{RepositoryError, Result, SessionRepository, validate_slot};

/// Leading bytes of every save file.
pub const MAGIC: [u8; 4] = *b"DGSV";

/// Current save format version.
pub const FORMAT_VERSION: u16 = 1;

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 2 + DIGEST_LEN;

/// File-based implementation of SessionRepository.
///
/// Each slot is stored as `{slot}.sav`.
///
/// # File Format
///
/// ```text
/// [4 bytes magic "DGSV"][u16 LE version][32 bytes SHA-256 of payload][bincode SessionSnapshot]
/// ```
///
/// Writes go to a temp file that is renamed over the slot, so a crash never
/// leaves a half-written save behind.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.sav"))
    }

    fn encode(snapshot: &SessionSnapshot) -> Result<Vec<u8>> {
        let payload = snapshot
            .to_bytes()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let digest = Sha256::digest(&payload);

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&digest);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    fn decode(bytes: &[u8]) -> Result<SessionSnapshot> {
        if bytes.len() < HEADER_LEN {
            return Err(RepositoryError::CorruptedData(format!(
                "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }
        let (magic, rest) = bytes.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(RepositoryError::CorruptedData(format!(
                "bad magic {}",
                hex::encode(magic)
            )));
        }
        let (version, rest) = rest.split_at(2);
        let version = u16::from_le_bytes([version[0], version[1]]);
        if version != FORMAT_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: version,
                expected: FORMAT_VERSION,
            });
        }
        let (expected, payload) = rest.split_at(DIGEST_LEN);
        let actual = Sha256::digest(payload);
        if actual.as_slice() != expected {
            return Err(RepositoryError::CorruptedData(format!(
                "checksum mismatch: header {} but payload hashes to {}",
                hex::encode(expected),
                hex::encode(actual)
            )));
        }

        SessionSnapshot::from_bytes(payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes = Self::encode(snapshot)?;

        // Write to temp file
        fs::write(&temp_path, &bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            slot,
            bytes = bytes.len(),
            "saved session to {}",
            path.display()
        );
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = Self::decode(&bytes)?;

        tracing::debug!(target: "runtime::repository", slot, "loaded session from {}", path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", slot, "deleted session");
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".sav")
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
