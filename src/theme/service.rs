// ABOUTME: Theme change notification over a watch channel, plus the shared message link style
// Subscribers poll for changes from the UI loop so styling never leaves the UI thread

use std::sync::Arc;

use ratatui::style::{Modifier, Style};
use tokio::sync::watch;
use tracing::info;

use super::{ColorTheme, ColorToken, Theme};

/// Owns the active theme and notifies subscribers when it changes.
pub struct ThemeService {
    sender: watch::Sender<Arc<Theme>>,
}

impl ThemeService {
    pub fn new(theme: Theme) -> Self {
        let (sender, _) = watch::channel(Arc::new(theme));
        Self { sender }
    }

    pub fn current(&self) -> Arc<Theme> {
        self.sender.borrow().clone()
    }

    pub fn set_theme(&self, theme: Theme) {
        info!("Switching theme to '{}'", theme.name());
        self.sender.send_replace(Arc::new(theme));
    }

    /// A subscription that has already seen the current theme.
    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

#[derive(Clone)]
pub struct ThemeSubscription {
    receiver: watch::Receiver<Arc<Theme>>,
}

impl ThemeSubscription {
    pub fn current(&self) -> Arc<Theme> {
        self.receiver.borrow().clone()
    }

    /// Returns the new theme if it changed since the last call.
    pub fn changed(&mut self) -> Option<Arc<Theme>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }
}

/// Styling rule for links inside notification messages.
///
/// Registered once while wiring the application and shared by every
/// rendered message body.
#[derive(Clone)]
pub struct MessageLinkStyle {
    themes: ThemeSubscription,
}

impl MessageLinkStyle {
    pub fn register(themes: ThemeSubscription) -> Self {
        Self { themes }
    }

    /// Style for link text under the current theme. Links keep their
    /// underline when the theme has no link color.
    pub fn style(&self) -> Style {
        let base = Style::default().add_modifier(Modifier::UNDERLINED);
        match self.themes.current().get_color(ColorToken::TextLinkForeground) {
            Some(color) => base.fg(color.to_color()),
            None => base,
        }
    }
}
