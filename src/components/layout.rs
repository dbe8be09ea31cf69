// ABOUTME: Main layout component placing the workbench body, notification overlay and bottom menu bar

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::HelpComponent;
use crate::app::AppState;

pub struct LayoutComponent {
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &mut AppState) {
        let screen = frame.size();
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),     // Workbench
                Constraint::Length(3),  // Bottom menu bar
            ])
            .split(screen);

        self.render_workbench(frame, main_chunks[0], state);
        self.render_menu_bar(frame, main_chunks[1]);

        let overlay = Self::notifications_area(main_chunks[0]);
        state.notifications.render(frame, overlay);

        if state.help_visible {
            self.help.render(frame, screen);
        }
    }

    fn render_workbench(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = state.theme_service.current();
        let mut text = vec![
            Line::from(Span::styled(
                state.config.source_label.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Notifications: {}", state.notifications.len())),
            Line::from(format!("Theme: {}", theme.name())),
        ];
        if let Some(status) = &state.status_message {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green))));
        }

        let body = Paragraph::new(text)
            .block(
                Block::default()
                    .title("Workbench")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(body, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect) {
        let menu_text = "[i]nfo [w]arn [e]rror [⏎]expand [1-9]action [d]ismiss [c]lear [t]heme [?]help [q]uit";

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }

    /// Bottom-right corner of the workbench, inside its border.
    fn notifications_area(area: Rect) -> Rect {
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        let width = (inner.width / 2).max(40).min(inner.width);
        let height = (inner.height / 5 * 3).max(8).min(inner.height);
        Rect::new(inner.right() - width, inner.bottom() - height, width, height)
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
