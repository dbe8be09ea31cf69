// ABOUTME: Event handling system mapping keyboard input to app actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppState;
use crate::models::Severity;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ShowSample(Severity),
    /// Navigation or open key for the notification list
    ListKey(KeyEvent),
    RunAction(usize),
    DismissNotification,
    ClearNotifications,
    HideNotifications,
    CycleTheme,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Some(AppEvent::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('i') => Some(AppEvent::ShowSample(Severity::Info)),
            KeyCode::Char('w') => Some(AppEvent::ShowSample(Severity::Warning)),
            KeyCode::Char('e') => Some(AppEvent::ShowSample(Severity::Error)),
            KeyCode::Char('t') => Some(AppEvent::CycleTheme),
            KeyCode::Char('d') => Some(AppEvent::DismissNotification),
            KeyCode::Char('c') => Some(AppEvent::ClearNotifications),
            KeyCode::Char('x') => Some(AppEvent::HideNotifications),
            KeyCode::Char(ch @ '1'..='9') => ch.to_digit(10).map(|n| AppEvent::RunAction(n as usize - 1)),
            KeyCode::Char('j' | 'k' | 'g' | 'G' | ' ')
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Enter
                if state.notifications.is_visible() =>
            {
                Some(AppEvent::ListKey(key_event))
            }
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::ShowSample(severity) => state.show_sample(severity),
            AppEvent::ListKey(key) => {
                state.notifications.handle_key(key);
            }
            AppEvent::RunAction(n) => {
                state.run_action(n);
            }
            AppEvent::DismissNotification => state.dismiss_focused(),
            AppEvent::ClearNotifications => state.clear_notifications(),
            AppEvent::HideNotifications => state.hide_notifications(),
            AppEvent::CycleTheme => state.cycle_theme(),
        }
    }
}
