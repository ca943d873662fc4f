mod common;

use game_core::{
    BehaviorRegistry, Canvas, ComponentStore, Engine, Floor, GameConfig, GameWorld, Position,
    RayCastFov, TurnError,
};
use runtime::{
    FileSessionRepository, InMemorySessionRepository, RuntimeError, Session, SessionRepository,
};
use tempfile::TempDir;

fn canvas() -> Canvas {
    Canvas::new(80, 50)
}

#[test]
fn turns_play_out_and_resume_from_disk() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();
    let mut session = Session::new(common::new_engine(), repo, "run");

    let mut console = canvas();
    for _ in 0..3 {
        session.end_turn(&mut console).unwrap();
    }
    session
        .engine_mut()
        .set_mouse_location(Position::new(5, 5));
    session.save().unwrap();
    let before = session.engine().snapshot();
    let (_, repo) = session.into_parts();

    let resumed = Session::resume(
        repo,
        "run",
        GameConfig::new(),
        Box::new(RayCastFov),
        common::behaviors(),
    )
    .unwrap();

    assert_eq!(resumed.engine().snapshot(), before);
    assert_eq!(resumed.slot(), "run");
}

#[test]
fn hunters_close_in_and_report_in_the_log() {
    let mut session = Session::new(
        common::new_engine(),
        InMemorySessionRepository::new(),
        "run",
    );
    let mut console = canvas();

    // Orc starts at (8, 5) and the player at (1, 1): 7 steps west, 3 north.
    for _ in 0..10 {
        let report = session.end_turn(&mut console).unwrap();
        assert_eq!(report.acted, 1);
    }
    assert!(session.engine().actor_at(Position::new(1, 2)).is_some());
    assert!(session.engine().message_log().is_empty());

    session.end_turn(&mut console).unwrap();
    let texts: Vec<String> = session
        .engine()
        .message_log()
        .iter()
        .map(|message| message.full_text())
        .collect();
    assert_eq!(texts, vec!["The orc snarls."]);
}

#[test]
fn autosave_writes_after_each_turn() {
    let mut session = Session::new(
        common::new_engine(),
        InMemorySessionRepository::new(),
        "auto",
    )
    .with_autosave(true);

    assert!(!session.repository().exists("auto"));
    session.end_turn(&mut canvas()).unwrap();
    assert!(session.repository().exists("auto"));
}

#[test]
fn failed_turn_is_saved_before_the_error_surfaces() {
    let mut store = ComponentStore::new();
    let player = store.spawn_with(
        common::player_components()
            .into_iter()
            .chain([Position::new(1, 1).into()]),
    );
    common::spawn_orc(&mut store, Position::new(4, 4), "sleepwalker");
    let engine = Engine::new(
        GameConfig::new(),
        GameWorld::new(common::WIDTH, common::HEIGHT, 1, 4, 6).with_current_floor(1),
        Floor::new(common::room(), store, player),
        Box::new(RayCastFov),
        BehaviorRegistry::new(),
    )
    .unwrap();

    let mut session =
        Session::new(engine, InMemorySessionRepository::new(), "crash").with_autosave(true);
    let err = session.end_turn(&mut canvas()).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Turn(TurnError::UnknownBehavior { ref behavior, .. }) if behavior == "sleepwalker"
    ));
    assert_eq!(err.error_code(), "TURN_UNKNOWN_BEHAVIOR");
    assert!(session.repository().exists("crash"));
}

#[test]
fn descending_moves_to_the_next_floor_and_saves() {
    let mut session = Session::new(
        common::new_engine(),
        InMemorySessionRepository::new(),
        "deep",
    )
    .with_autosave(true);
    let old_player = session.engine().player();

    session.descend(&mut common::RoomFactory).unwrap();

    let engine = session.engine();
    assert_eq!(engine.current_floor(), 2);
    assert_ne!(engine.player(), old_player);
    assert!(engine.grid().is_visible(Position::new(1, 1)));

    let saved = session.repository().load("deep").unwrap().unwrap();
    assert_eq!(saved.world.current_floor, 2);
    assert_eq!(saved.player, engine.player());
}

#[test]
fn resuming_an_empty_slot_fails() {
    let result = Session::resume(
        InMemorySessionRepository::new(),
        "nothing",
        GameConfig::new(),
        Box::new(RayCastFov),
        BehaviorRegistry::new(),
    );
    assert!(matches!(
        result,
        Err(RuntimeError::NoSavedSession { slot }) if slot == "nothing"
    ));
}
