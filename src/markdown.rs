// ABOUTME: Renders notification message text into styled terminal lines
// Trusted messages are parsed as markdown; untrusted ones are shown verbatim

use pulldown_cmark::{Event, Parser, Tag};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::models::MarkdownString;

/// Renders a message into lines. `link_style` is patched onto link text.
pub fn render_message(message: &MarkdownString, link_style: Style) -> Vec<Line<'static>> {
    if !message.is_trusted {
        let lines: Vec<Line<'static>> = message.value.lines().map(|l| Line::raw(l.to_string())).collect();
        return if lines.is_empty() { vec![Line::default()] } else { lines };
    }

    let mut writer = MessageWriter::new(link_style);
    for event in Parser::new(&message.value) {
        writer.handle(event);
    }
    writer.finish()
}

/// The first non-empty line of the message as plain text.
pub fn summary(message: &MarkdownString) -> String {
    render_message(message, Style::default())
        .iter()
        .map(line_text)
        .find(|text| !text.trim().is_empty())
        .unwrap_or_default()
}

pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

struct MessageWriter {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    link_style: Style,
}

impl MessageWriter {
    fn new(link_style: Style) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: Vec::new(),
            link_style,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.styles.push(style);
    }

    fn push_text(&mut self, text: &str, style: Style) {
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush_line();
            }
            if !piece.is_empty() {
                self.current.push(Span::styled(piece.to_string(), style));
            }
        }
    }

    fn flush_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
                Tag::Strong | Tag::Heading(..) => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
                Tag::Strikethrough => self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT)),
                Tag::Link(..) => self.push_style(self.link_style),
                Tag::Item => self.current.push(Span::raw("• ")),
                _ => {}
            },
            Event::End(tag) => match tag {
                Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link(..) => {
                    self.styles.pop();
                }
                Tag::Heading(..) => {
                    self.styles.pop();
                    self.flush_line();
                }
                Tag::Paragraph | Tag::Item => self.flush_line(),
                Tag::CodeBlock(_) => {
                    if !self.current.is_empty() {
                        self.flush_line();
                    }
                }
                _ => {}
            },
            Event::Text(text) | Event::Html(text) => {
                let style = self.style();
                self.push_text(&text, style);
            }
            Event::Code(code) => {
                let style = self.style().add_modifier(Modifier::REVERSED);
                self.push_text(&code, style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.current.push(Span::styled(" ", style));
            }
            Event::HardBreak => self.flush_line(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        if !self.current.is_empty() {
            self.flush_line();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}
