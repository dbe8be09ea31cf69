// ABOUTME: Application state wiring the notification list, theme service and producer-side operations
// The app is the notification producer: it shows, evicts and runs actions on entries

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::components::container::{Container, ContainerRef};
use crate::components::notification_list::{DefaultActionHandlers, NotificationList};
use crate::config::{AppConfig, ConfigError};
use crate::list::VirtualListFactory;
use crate::models::Severity;
use crate::theme::{MessageLinkStyle, Theme, ThemeService};

const SAMPLE_MESSAGES: [(Severity, &str); 6] = [
    (Severity::Info, "Settings **saved**."),
    (Severity::Info, "A new version is available. See the [release notes](https://example.com/releases)."),
    (Severity::Warning, "The workspace contains *unsaved* changes."),
    (Severity::Warning, "Extension host is responding slowly."),
    (Severity::Error, "Disk full: could not write `session.json`."),
    (Severity::Error, "Connection to the language server was lost.\n\nRestart it to restore completions."),
];

pub struct AppState {
    pub workbench: ContainerRef,
    pub notifications: NotificationList,
    pub theme_service: ThemeService,
    pub config: AppConfig,
    pub should_quit: bool,
    pub help_visible: bool,
    pub status_message: Option<String>,
    reload_requested: Rc<Cell<bool>>,
    cancel_requested: Rc<Cell<bool>>,
    theme_index: usize,
    sample_counter: usize,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let theme = config.resolve_theme(&config.theme)?;
        let theme_index = Theme::BUILTIN_NAMES
            .iter()
            .position(|name| *name == theme.name())
            .unwrap_or(0);
        let theme_service = ThemeService::new(theme);

        // Registered once for every message body the list renders.
        let links = MessageLinkStyle::register(theme_service.subscribe());

        let reload_requested = Rc::new(Cell::new(false));
        let cancel_requested = Rc::new(Cell::new(false));
        let handlers = {
            let reload = Rc::clone(&reload_requested);
            let cancel = Rc::clone(&cancel_requested);
            DefaultActionHandlers {
                reload: Rc::new(move || {
                    info!("Reload Window requested");
                    reload.set(true);
                }),
                cancel: Rc::new(move || {
                    info!("Cancel requested");
                    cancel.set(true);
                }),
            }
        };

        let workbench = Container::new_ref("workbench");
        let notifications = NotificationList::new(&workbench, &VirtualListFactory, theme_service.subscribe(), links)
            .with_source(config.source_label.clone())
            .with_default_handlers(handlers);

        Ok(Self {
            workbench,
            notifications,
            theme_service,
            config,
            should_quit: false,
            help_visible: false,
            status_message: None,
            reload_requested,
            cancel_requested,
            theme_index,
            sample_counter: 0,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Shows a notification and evicts the oldest ones past the configured bound.
    pub fn show(&mut self, severity: Severity, text: &str) {
        self.notifications.show(severity, text);
        let evicted = self.notifications.truncate(self.config.max_notifications);
        if evicted > 0 {
            debug!("Evicted {} notifications over the limit of {}", evicted, self.config.max_notifications);
        }
    }

    /// Shows the next sample message of the given severity.
    pub fn show_sample(&mut self, severity: Severity) {
        let samples: Vec<&str> = SAMPLE_MESSAGES
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, text)| *text)
            .collect();
        let text = samples[self.sample_counter % samples.len()];
        self.sample_counter += 1;
        self.show(severity, text);
    }

    /// Runs the n-th action (zero based) of the focused notification.
    pub fn run_action(&mut self, n: usize) -> bool {
        let Some(item) = self.notifications.focused_element().cloned() else {
            return false;
        };
        let Some(action) = item.actions().get(n) else {
            debug!("Notification has no action #{}", n + 1);
            return false;
        };
        let ran = action.run();
        if !ran {
            self.status_message = Some(format!("'{}' is disabled", action.label()));
        }
        ran
    }

    pub fn dismiss_focused(&mut self) {
        if let Some(index) = self.notifications.focused() {
            self.notifications.remove(index);
        }
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn hide_notifications(&mut self) {
        self.notifications.hide();
    }

    pub fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % Theme::BUILTIN_NAMES.len();
        let name = Theme::BUILTIN_NAMES[self.theme_index];
        match self.config.resolve_theme(name) {
            Ok(theme) => {
                self.theme_service.set_theme(theme);
                self.status_message = Some(format!("Theme: {name}"));
            }
            Err(e) => warn!("Failed to switch theme to {}: {}", name, e),
        }
    }

    /// Applies pending theme changes and the effects of action handlers.
    pub fn update(&mut self) {
        self.notifications.refresh_theme();

        if self.reload_requested.replace(false) {
            self.status_message = Some("Window reload requested".to_string());
        }
        if self.cancel_requested.replace(false) {
            self.notifications.hide();
            self.status_message = None;
        }
    }
}

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: AppState::new(config)?,
        })
    }

    pub fn tick(&mut self) {
        self.state.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_list_container_is_appended_to_workbench() {
        let state = state();
        assert_eq!(state.workbench.borrow().children().len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut state = AppState::new(AppConfig {
            max_notifications: 2,
            ..AppConfig::default()
        })
        .unwrap();
        state.show(Severity::Info, "first");
        state.show(Severity::Info, "second");
        state.show(Severity::Info, "third");

        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications.element(0).unwrap().message().value, "third");
        assert_eq!(state.notifications.element(1).unwrap().message().value, "second");
    }

    #[test]
    fn test_reload_action_reports_status() {
        let mut state = state();
        state.show(Severity::Error, "Disk full");

        assert!(state.run_action(0));
        state.update();
        assert_eq!(state.status_message.as_deref(), Some("Window reload requested"));
    }

    #[test]
    fn test_cancel_action_hides_panel() {
        let mut state = state();
        state.show(Severity::Error, "Disk full");

        assert!(state.run_action(1));
        state.update();
        assert!(!state.notifications.is_visible());
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn test_missing_action_does_nothing() {
        let mut state = state();
        assert!(!state.run_action(0));
        state.show(Severity::Info, "hello");
        assert!(!state.run_action(7));
    }

    #[test]
    fn test_cycle_theme_notifies_view() {
        let mut state = state();
        state.cycle_theme();
        assert_eq!(state.theme_service.current().name(), "light");

        state.update();
        let container = state.notifications.container().borrow();
        assert_eq!(
            container.style().background.as_ref().map(ToString::to_string).as_deref(),
            Some("#f3f3f3")
        );
    }

    #[test]
    fn test_samples_rotate_per_severity() {
        let mut state = state();
        state.show_sample(Severity::Warning);
        state.show_sample(Severity::Warning);
        assert_eq!(state.notifications.len(), 2);
        assert_eq!(state.notifications.element(0).unwrap().severity(), Severity::Warning);
        assert_ne!(
            state.notifications.element(0).unwrap().message().value,
            state.notifications.element(1).unwrap().message().value
        );
    }
}
