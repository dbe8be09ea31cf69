// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct app actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notification_center::app::{AppEvent, AppState, EventHandler};
use notification_center::config::AppConfig;
use notification_center::models::Severity;

fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn create_state() -> AppState {
    AppState::new(AppConfig::default()).unwrap()
}

#[test]
fn test_quit_key_events() {
    let state = create_state();

    for event in [
        create_key_event(KeyCode::Char('q')),
        create_key_event(KeyCode::Esc),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        assert!(matches!(EventHandler::handle_key_event(event, &state), Some(AppEvent::Quit)));
    }
}

#[test]
fn test_show_keys_map_to_severities() {
    let state = create_state();

    let info = EventHandler::handle_key_event(create_key_event(KeyCode::Char('i')), &state);
    assert!(matches!(info, Some(AppEvent::ShowSample(Severity::Info))));

    let warning = EventHandler::handle_key_event(create_key_event(KeyCode::Char('w')), &state);
    assert!(matches!(warning, Some(AppEvent::ShowSample(Severity::Warning))));

    let error = EventHandler::handle_key_event(create_key_event(KeyCode::Char('e')), &state);
    assert!(matches!(error, Some(AppEvent::ShowSample(Severity::Error))));
}

#[test]
fn test_list_keys_ignored_while_hidden() {
    let state = create_state();
    assert!(EventHandler::handle_key_event(create_key_event(KeyCode::Enter), &state).is_none());
    assert!(EventHandler::handle_key_event(create_key_event(KeyCode::Down), &state).is_none());
}

#[test]
fn test_enter_toggles_focused_notification() {
    let mut state = create_state();
    EventHandler::process_event(AppEvent::ShowSample(Severity::Error), &mut state);

    let event = EventHandler::handle_key_event(create_key_event(KeyCode::Enter), &state);
    assert!(matches!(event, Some(AppEvent::ListKey(_))));
    EventHandler::process_event(event.unwrap(), &mut state);

    assert!(state.notifications.element(0).unwrap().expanded());
}

#[test]
fn test_digit_keys_select_actions() {
    let state = create_state();
    let event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('2')), &state);
    assert!(matches!(event, Some(AppEvent::RunAction(1))));
    assert!(EventHandler::handle_key_event(create_key_event(KeyCode::Char('0')), &state).is_none());
}

#[test]
fn test_help_captures_keys() {
    let mut state = create_state();
    EventHandler::process_event(AppEvent::ToggleHelp, &mut state);
    assert!(state.help_visible);

    assert!(EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &state).is_none());
    let close = EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &state);
    assert!(matches!(close, Some(AppEvent::ToggleHelp)));
}

#[test]
fn test_dismiss_and_clear() {
    let mut state = create_state();
    for _ in 0..3 {
        EventHandler::process_event(AppEvent::ShowSample(Severity::Info), &mut state);
    }

    EventHandler::process_event(AppEvent::DismissNotification, &mut state);
    assert_eq!(state.notifications.len(), 2);

    EventHandler::process_event(AppEvent::ClearNotifications, &mut state);
    assert!(state.notifications.is_empty());
    assert!(!state.notifications.is_visible());
}
