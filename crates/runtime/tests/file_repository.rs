mod common;

use std::fs;

use runtime::repository::{FORMAT_VERSION, MAGIC};
use runtime::{FileSessionRepository, RepositoryError, SessionRepository};
use tempfile::TempDir;

#[test]
fn save_load_list_delete() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    let snapshot = common::new_engine().snapshot();

    assert_eq!(repo.load("alpha").unwrap(), None);
    repo.save("beta", &snapshot).unwrap();
    repo.save("alpha", &snapshot).unwrap();

    assert!(repo.exists("alpha"));
    assert_eq!(repo.load("alpha").unwrap(), Some(snapshot));
    assert_eq!(repo.list_slots().unwrap(), vec!["alpha", "beta"]);

    repo.delete("alpha").unwrap();
    repo.delete("alpha").unwrap();
    assert!(!repo.exists("alpha"));
    assert_eq!(repo.list_slots().unwrap(), vec!["beta"]);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    repo.save("slot", &common::new_engine().snapshot()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["slot.sav"]);
}

#[test]
fn header_carries_magic_and_version() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    repo.save("slot", &common::new_engine().snapshot()).unwrap();

    let bytes = fs::read(dir.path().join("slot.sav")).unwrap();
    assert_eq!(&bytes[..4], &MAGIC);
    assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), FORMAT_VERSION);
}

#[test]
fn flipped_payload_byte_is_detected() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    repo.save("slot", &common::new_engine().snapshot()).unwrap();

    let path = dir.path().join("slot.sav");
    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        repo.load("slot"),
        Err(RepositoryError::CorruptedData(message)) if message.contains("checksum")
    ));
}

#[test]
fn foreign_and_future_files_are_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    repo.save("slot", &common::new_engine().snapshot()).unwrap();
    let path = dir.path().join("slot.sav");
    let original = fs::read(&path).unwrap();

    let mut foreign = original.clone();
    foreign[..4].copy_from_slice(b"PK\x03\x04");
    fs::write(&path, &foreign).unwrap();
    assert!(matches!(
        repo.load("slot"),
        Err(RepositoryError::CorruptedData(_))
    ));

    let mut future = original;
    future[4..6].copy_from_slice(&(FORMAT_VERSION + 1).to_le_bytes());
    fs::write(&path, &future).unwrap();
    assert!(matches!(
        repo.load("slot"),
        Err(RepositoryError::UnsupportedVersion { found, expected })
            if found == FORMAT_VERSION + 1 && expected == FORMAT_VERSION
    ));

    fs::write(&path, b"DGSV").unwrap();
    assert!(matches!(
        repo.load("slot"),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn slot_names_cannot_escape_the_directory() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path().join("saves")).unwrap();
    let snapshot = common::new_engine().snapshot();

    assert!(matches!(
        repo.save("../outside", &snapshot),
        Err(RepositoryError::InvalidSlot(_))
    ));
    assert!(!repo.exists("../outside"));
}
