//! The global subscriber can be installed once per process, so this binary
//! holds a single test.
use runtime::{RuntimeError, logging};
use tempfile::TempDir;

#[test]
fn init_writes_session_log_and_refuses_a_second_subscriber() {
    let dir = TempDir::new().unwrap();

    let guard = logging::init(dir.path(), "crypt", false).unwrap();
    tracing::info!(target: "runtime::session", "descended to floor 2");

    let again = logging::init(dir.path(), "other", false);
    assert!(matches!(again, Err(RuntimeError::Logging(_))));

    drop(guard);
    let log = std::fs::read_to_string(dir.path().join("crypt").join("session.log")).unwrap();
    assert!(log.contains("logging initialized"), "{log}");
    assert!(log.contains("descended to floor 2"), "{log}");
}
