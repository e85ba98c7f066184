use scribe_engine::protocol::{Action, ActionKind, RecordingState, SourceId};
use scribe_engine::session::{Session, StartOptions};

#[test]
fn test_lifecycle() {
    let mut session = Session::new();
    assert_eq!(session.state(), RecordingState::Idle);

    assert!(session.start(StartOptions::default()));
    assert_eq!(session.state(), RecordingState::Active);

    assert!(session.stop());
    assert_eq!(session.state(), RecordingState::Idle);
    assert!(!session.stop());
}

#[test]
fn test_start_while_active_is_noop() {
    let mut session = Session::new();
    let tab = SourceId::from("tab-1");
    session.start(StartOptions::default());
    session.append(Action::navigate("https://example.com"));
    session.mark_source(&tab);

    let changed = session.start(StartOptions {
        clear_log: true,
        reset_markers: true,
    });

    assert!(!changed);
    assert!(session.is_active());
    assert_eq!(session.log().len(), 1);
    assert!(session.has_marker(&tab));
}

#[test]
fn test_restart_keeps_log_but_clears_markers() {
    let mut session = Session::new();
    let tab = SourceId::from("tab-1");
    session.start(StartOptions::default());
    session.append(Action::click("#a"));
    session.mark_source(&tab);
    session.stop();

    session.start(StartOptions::default());
    assert_eq!(session.log().len(), 1);
    assert!(!session.has_marker(&tab));
}

#[test]
fn test_start_can_clear_log() {
    let mut session = Session::new();
    session.start(StartOptions::default());
    session.append(Action::click("#a"));
    session.stop();

    session.start(StartOptions {
        clear_log: true,
        ..StartOptions::default()
    });
    assert!(session.log().is_empty());
}

#[test]
fn test_reset_in_either_state() {
    let mut session = Session::new();
    let tab = SourceId::from("tab-1");
    session.start(StartOptions::default());
    session.append(Action::click("#a"));
    session.mark_source(&tab);

    session.reset();
    assert!(session.is_active());
    assert!(session.log().is_empty());
    assert_eq!(session.marked_sources().count(), 0);

    session.append(Action::click("#b"));
    session.stop();
    session.reset();
    assert_eq!(session.state(), RecordingState::Idle);
    assert!(session.log().is_empty());
}

#[test]
fn test_log_only_grows_while_active() {
    let mut session = Session::new();
    session.start(StartOptions::default());
    session.append(Action::click("#a"));
    session.stop();

    assert!(!session.append(Action::click("#b")));
    assert_eq!(session.log().as_slice(), &[Action::click("#a")]);
}

#[test]
fn test_append_refuses_incomplete_actions() {
    let mut session = Session::new();
    session.start(StartOptions::default());

    let mut typed = Action::type_text("#q", "x");
    typed.value = None;
    assert!(!session.append(typed));

    let unknown = Action {
        kind: ActionKind::Unrecognized("hover".to_string()),
        selector: Some("#menu".to_string()),
        value: None,
    };
    assert!(!session.append(unknown));
    assert!(session.log().is_empty());
}
