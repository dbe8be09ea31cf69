// ABOUTME: Row measurement and row rendering for notification entries in the list control
// Collapsed rows show a one-line summary; expanded rows show the full message and actions

use std::rc::Rc;

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
};

use super::wrap::{wrap_items, wrap_line};
use crate::list::{ListDelegate, ListRenderer};
use crate::markdown;
use crate::models::{NotificationViewItem, Severity};
use crate::theme::MessageLinkStyle;

pub const NOTIFICATION_TEMPLATE: &str = "notification";

const MESSAGE_INDENT: &str = "  ";

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

/// Lines of a notification row at `width`, wrapped the same way for measuring and drawing.
fn row_lines(item: &NotificationViewItem, link_style: Style, width: u16) -> Vec<Line<'static>> {
    if !item.expanded() {
        return vec![collapsed_line(item)];
    }

    let header = Line::from(vec![
        Span::raw("▼ "),
        Span::styled(item.severity().icon(), Style::default().fg(severity_color(item.severity()))),
        Span::raw(" "),
        Span::styled(item.source().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", item.created_at().format("%H:%M:%S")),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    let mut lines = wrap_line(&header, width, "", MESSAGE_INDENT);

    for line in markdown::render_message(item.message(), link_style) {
        lines.extend(wrap_line(&line, width, MESSAGE_INDENT, MESSAGE_INDENT));
    }

    if !item.actions().is_empty() {
        let buttons = item
            .actions()
            .iter()
            .enumerate()
            .map(|(n, action)| {
                let style = if action.enabled() {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                Span::styled(format!("[{} {}]", n + 1, action.label()), style)
            })
            .collect();
        lines.extend(wrap_items(buttons, width, MESSAGE_INDENT, " "));
    }

    lines
}

/// Collapsed rows are a single summary line, truncated by the list when too wide.
fn collapsed_line(item: &NotificationViewItem) -> Line<'static> {
    Line::from(vec![
        Span::raw("▶ "),
        Span::styled(item.severity().icon(), Style::default().fg(severity_color(item.severity()))),
        Span::raw(" "),
        Span::raw(markdown::summary(item.message())),
        Span::styled(format!("  {}", item.source()), Style::default().add_modifier(Modifier::DIM)),
    ])
}

/// Measures notification rows.
pub struct NotificationsDelegate;

impl ListDelegate<Rc<NotificationViewItem>> for NotificationsDelegate {
    fn height(&self, element: &Rc<NotificationViewItem>, width: u16) -> u16 {
        let lines = row_lines(element, Style::default(), width).len();
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn template_id(&self, _element: &Rc<NotificationViewItem>) -> &'static str {
        NOTIFICATION_TEMPLATE
    }
}

/// Draws a notification: severity icon, source, message body and action buttons.
pub struct NotificationRenderer {
    links: MessageLinkStyle,
}

impl NotificationRenderer {
    pub fn new(links: MessageLinkStyle) -> Self {
        Self { links }
    }
}

impl ListRenderer<Rc<NotificationViewItem>> for NotificationRenderer {
    fn template_id(&self) -> &'static str {
        NOTIFICATION_TEMPLATE
    }

    fn render_element(&self, element: &Rc<NotificationViewItem>, _index: usize, width: u16) -> Text<'static> {
        Text::from(row_lines(element, self.links.style(), width))
    }
}
