// ABOUTME: Notification list view binding the notification entries to a list control
// Toggles expansion on open, inserts new notifications at the top and mirrors theme colors

use std::fmt;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::{debug, info, warn};

use super::container::{Container, ContainerRef};
use super::notification_renderer::{NotificationRenderer, NotificationsDelegate};
use crate::list::{ListControl, ListEvent, ListFactory, ListOptions, OpenEvent};
use crate::models::{Action, ActionHandler, MarkdownString, NotificationViewItem, Severity};
use crate::theme::{ColorTheme, ColorToken, MessageLinkStyle, ThemeSubscription};

pub const LIST_CONTAINER_CLASS: &str = "notifications-list-container";
pub const VISIBLE_CLASS: &str = "visible";
pub const DEFAULT_SOURCE: &str = "Notification Center";

pub const RELOAD_ACTION_ID: &str = "id.reload";
pub const CANCEL_ACTION_ID: &str = "id.cancel";

/// Handlers behind the actions every shown notification offers.
#[derive(Clone)]
pub struct DefaultActionHandlers {
    pub reload: ActionHandler,
    pub cancel: ActionHandler,
}

impl Default for DefaultActionHandlers {
    fn default() -> Self {
        Self {
            reload: Rc::new(|| info!("Reload Window")),
            cancel: Rc::new(|| info!("Cancel")),
        }
    }
}

impl fmt::Debug for DefaultActionHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultActionHandlers").finish_non_exhaustive()
    }
}

pub struct NotificationList {
    list_container: ContainerRef,
    list: Box<dyn ListControl<Rc<NotificationViewItem>>>,
    themes: ThemeSubscription,
    source: String,
    handlers: DefaultActionHandlers,
}

impl NotificationList {
    /// Builds the list container, binds a list control from `list_factory`
    /// and appends the container to `parent`.
    ///
    /// Each call creates a new container, so call it once per parent.
    pub fn new(
        parent: &ContainerRef,
        list_factory: &dyn ListFactory<Rc<NotificationViewItem>>,
        themes: ThemeSubscription,
        links: MessageLinkStyle,
    ) -> Self {
        let list_container = Container::new_ref(LIST_CONTAINER_CLASS);

        let list = list_factory.create_list(
            Box::new(NotificationsDelegate),
            vec![Box::new(NotificationRenderer::new(links))],
            ListOptions {
                aria_label: "Notifications List".to_string(),
                highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            },
        );

        parent.borrow_mut().append_child(list_container.clone());

        let mut view = Self {
            list_container,
            list,
            themes,
            source: DEFAULT_SOURCE.to_string(),
            handlers: DefaultActionHandlers::default(),
        };
        let theme = view.themes.current();
        view.apply_theme(theme.as_ref());
        view
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_default_handlers(mut self, handlers: DefaultActionHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn container(&self) -> &ContainerRef {
        &self.list_container
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Toggles the first opened entry and re-renders its row in place.
    ///
    /// An empty selection is ignored.
    pub fn on_open(&mut self, event: &OpenEvent<Rc<NotificationViewItem>>) {
        let Some((notification, index)) = event.first() else {
            debug!("Ignoring open event without a selection");
            return;
        };
        if index >= self.list.len() {
            warn!("Ignoring open event for row {} of {}", index, self.list.len());
            return;
        }

        if notification.expanded() {
            notification.collapse();
        } else {
            notification.expand();
        }
        debug!("Notification {} expanded: {}", index, notification.expanded());

        self.list.splice(index, 1, vec![Rc::clone(notification)]);
        self.list.layout();
    }

    /// Forwards a key to the list control. Returns whether the list consumed it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.list.handle_key(key) {
            Some(ListEvent::Open(event)) => {
                self.on_open(&event);
                true
            }
            Some(ListEvent::FocusChanged(_)) => true,
            None => false,
        }
    }

    /// Adds a notification at the top of the list and makes the list visible.
    pub fn show(&mut self, severity: Severity, notification: &str) {
        self.list_container.borrow_mut().add_class(VISIBLE_CLASS);

        let item = NotificationViewItem::new(
            severity,
            MarkdownString::trusted(notification),
            self.source.clone(),
            vec![
                Action::new(RELOAD_ACTION_ID, "Reload Window", true, Rc::clone(&self.handlers.reload)),
                Action::new(CANCEL_ACTION_ID, "Cancel", true, Rc::clone(&self.handlers.cancel)),
            ],
        );
        info!("Showing {} notification from {}", severity, self.source);

        self.list.splice(0, 0, vec![Rc::new(item)]);
        self.list.layout();
    }

    pub fn hide(&mut self) {
        self.list_container.borrow_mut().remove_class(VISIBLE_CLASS);
    }

    pub fn is_visible(&self) -> bool {
        self.list_container.borrow().has_class(VISIBLE_CLASS)
    }

    /// Writes the notification colors of `colors` onto the container.
    /// Colors the theme does not define clear the property.
    pub fn apply_theme(&mut self, colors: &dyn ColorTheme) {
        let mut container = self.list_container.borrow_mut();
        let style = container.style_mut();
        style.background = colors.get_color(ColorToken::NotificationsBackground);
        style.color = colors.get_color(ColorToken::NotificationsForeground);
        style.outline_color = colors.get_color(ColorToken::ContrastBorder);
        style.shadow_color = colors.get_color(ColorToken::WidgetShadow);
    }

    /// Applies the theme if it changed since the last check.
    pub fn refresh_theme(&mut self) -> bool {
        match self.themes.changed() {
            Some(theme) => {
                self.apply_theme(theme.as_ref());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Rc<NotificationViewItem>> {
        self.list.element(index)
    }

    pub fn focused(&self) -> Option<usize> {
        self.list.focused()
    }

    pub fn focused_element(&self) -> Option<&Rc<NotificationViewItem>> {
        self.list.focused().and_then(|i| self.list.element(i))
    }

    /// Evicts one entry. Hides the list when it becomes empty.
    pub fn remove(&mut self, index: usize) -> Option<Rc<NotificationViewItem>> {
        if index >= self.list.len() {
            return None;
        }
        let removed = self.list.splice(index, 1, Vec::new()).pop();
        self.list.layout();
        if self.list.is_empty() {
            self.hide();
        }
        removed
    }

    /// Evicts every entry past `max` (the oldest ones).
    pub fn truncate(&mut self, max: usize) -> usize {
        let len = self.list.len();
        if len <= max {
            return 0;
        }
        let removed = self.list.splice(max, len - max, Vec::new()).len();
        self.list.layout();
        if self.list.is_empty() {
            self.hide();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.is_visible() || area.width < 3 || area.height < 3 {
            return;
        }

        let (body, border, shadow) = {
            let container = self.list_container.borrow();
            let style = container.style();
            (style.body(), style.border(), style.shadow_color.clone())
        };

        let panel = match shadow {
            Some(shadow) => {
                let panel = Rect::new(area.x, area.y, area.width - 1, area.height - 1);
                let shadow_style = Style::default().bg(shadow.to_color());
                let buffer = frame.buffer_mut();
                buffer.set_style(Rect::new(area.right() - 1, area.y + 1, 1, area.height - 1), shadow_style);
                buffer.set_style(Rect::new(area.x + 1, area.bottom() - 1, area.width - 1, 1), shadow_style);
                panel
            }
            None => area,
        };

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(format!("Notifications ({})", self.list.len()))
            .borders(Borders::ALL)
            .border_style(border)
            .style(body);
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        if self.list.is_empty() {
            let empty = Paragraph::new("No notifications").style(Style::default().fg(Color::Gray));
            frame.render_widget(empty, inner);
        } else {
            self.list.render(frame, inner);
        }
    }
}
