//! Input tests - every device class driving a real session through the dispatcher

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall::core::{FrameDriver, GameSession, NullStatsStore, ScriptedPieces};
use blockfall::input::{GamepadButton, GamepadState, InputDispatcher, Swipe};
use blockfall::types::{Intent, Phase, PieceKind};

fn session() -> GameSession {
    GameSession::with_parts(
        Box::new(ScriptedPieces::kinds(&[PieceKind::T, PieceKind::O])),
        Box::new(NullStatsStore),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn apply_all(dispatcher: &mut InputDispatcher, session: &mut GameSession) {
    for intent in dispatcher.drain(session.phase()) {
        session.apply_intent(intent);
    }
}

#[test]
fn test_keyboard_starts_moves_and_drops() {
    let mut session = session();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.push_key(key(KeyCode::Enter));
    apply_all(&mut dispatcher, &mut session);
    assert_eq!(session.phase(), Phase::Running);

    dispatcher.push_key(key(KeyCode::Left));
    dispatcher.push_key(key(KeyCode::Char('a')));
    dispatcher.push_key(key(KeyCode::Down));
    apply_all(&mut dispatcher, &mut session);
    let piece = session.current().unwrap();
    assert_eq!((piece.x, piece.y), (1, 1));

    dispatcher.push_key(key(KeyCode::Char(' ')));
    apply_all(&mut dispatcher, &mut session);
    assert_eq!(session.grid().filled_count(), 4);
    assert_eq!(session.current().unwrap().kind, PieceKind::O);
}

#[test]
fn test_unmapped_and_ctrl_keys_queue_nothing() {
    let mut dispatcher = InputDispatcher::new();
    assert!(!dispatcher.push_key(key(KeyCode::Char('x'))));
    assert!(!dispatcher.push_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)));
    assert_eq!(dispatcher.pending(), 0);
}

#[test]
fn test_swipes_map_to_intents() {
    let mut session = session();
    session.start();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.push_swipe(Swipe::Right);
    dispatcher.push_swipe(Swipe::Right);
    dispatcher.push_swipe(Swipe::Tap);
    apply_all(&mut dispatcher, &mut session);
    let piece = session.current().unwrap();
    assert_eq!(piece.x, 5);
    assert_eq!(session.stats().rotations, 1);

    dispatcher.push_swipe(Swipe::Down);
    apply_all(&mut dispatcher, &mut session);
    assert_eq!(session.stats().hard_drops, 1);
}

#[test]
fn test_drag_distance_picks_swipe() {
    assert_eq!(Swipe::from_drag(6, 1, 2), Swipe::Right);
    assert_eq!(Swipe::from_drag(-1, 4, 2), Swipe::Down);
    assert_eq!(Swipe::from_drag(1, -1, 2), Swipe::Tap);
    assert_eq!(Swipe::from_str("swipeup"), Some(Swipe::Up));
}

#[test]
fn test_held_gamepad_button_respects_cooldown() {
    let mut session = session();
    session.start();
    let mut dispatcher = InputDispatcher::with_gamepad_cooldown_ms(120);
    let held = GamepadState::new().with(GamepadButton::DpadRight);

    // Sampled every 16ms for 256ms: fires at 0, 128 and 256.
    let mut fired = 0;
    for frame in 0..=16u64 {
        fired += dispatcher.poll_gamepad(held, frame * 16);
    }
    assert_eq!(fired, 3);

    apply_all(&mut dispatcher, &mut session);
    assert_eq!(session.current().unwrap().x, 6);
}

#[test]
fn test_gameplay_intents_dropped_while_paused() {
    let mut session = session();
    session.start();
    session.toggle_pause();
    let mut dispatcher = InputDispatcher::new();

    dispatcher.push_key(key(KeyCode::Left));
    dispatcher.push_swipe(Swipe::Down);
    dispatcher.push_key(key(KeyCode::Char('p')));
    let drained = dispatcher.drain(session.phase());
    assert_eq!(drained.as_slice(), &[Intent::ToggleStartPause]);
    assert_eq!(dispatcher.pending(), 0);

    for intent in drained {
        session.apply_intent(intent);
    }
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.current().unwrap().x, 3);
}

#[test]
fn test_frame_driver_consumes_dispatcher_output() {
    let mut session = session();
    let mut dispatcher = InputDispatcher::new();
    let mut driver = FrameDriver::new();

    dispatcher.push_intent(Intent::ToggleStartPause);
    let intents = dispatcher.drain(session.phase());
    driver.frame(&mut session, intents, 0);
    assert_eq!(session.phase(), Phase::Running);

    // 1016ms of frames is enough for exactly one gravity step.
    let mut now = 0;
    while now < 1016 {
        now += 16;
        let intents = dispatcher.drain(session.phase());
        driver.frame(&mut session, intents, now);
    }
    assert_eq!(session.current().unwrap().y, 1);
}
