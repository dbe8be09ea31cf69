// ABOUTME: Word wrapping for styled lines at a fixed column width
// Row measurement and row drawing both go through here so their line counts agree

use ratatui::{style::Style, text::{Line, Span}};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

struct Token {
    parts: Vec<(String, Style)>,
    width: usize,
    space: bool,
}

/// Splits a line into alternating runs of whitespace and words, keeping span styles.
/// A word may cover several spans.
fn tokenize(line: &Line<'_>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for span in &line.spans {
        let mut run = String::new();
        let mut run_space = false;
        for c in span.content.chars() {
            let space = c.is_whitespace();
            if !run.is_empty() && space != run_space {
                push_run(&mut tokens, std::mem::take(&mut run), span.style, run_space);
            }
            run_space = space;
            run.push(c);
        }
        if !run.is_empty() {
            push_run(&mut tokens, run, span.style, run_space);
        }
    }
    tokens
}

fn push_run(tokens: &mut Vec<Token>, text: String, style: Style, space: bool) {
    let width = text.width();
    match tokens.last_mut() {
        Some(token) if token.space == space => {
            token.width += width;
            token.parts.push((text, style));
        }
        _ => tokens.push(Token {
            parts: vec![(text, style)],
            width,
            space,
        }),
    }
}

struct LineBuilder {
    spans: Vec<Span<'static>>,
    width: usize,
    content: bool,
}

impl LineBuilder {
    fn new(indent: &'static str) -> Self {
        let spans = if indent.is_empty() { Vec::new() } else { vec![Span::raw(indent)] };
        Self {
            spans,
            width: indent.width(),
            content: false,
        }
    }

    fn push(&mut self, text: &str, style: Style, width: usize) {
        self.width += width;
        self.content = true;
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(text),
            _ => self.spans.push(Span::styled(text.to_string(), style)),
        }
    }

    fn push_token(&mut self, token: &Token) {
        for (text, style) in &token.parts {
            self.push(text, *style, text.width());
        }
    }

    fn finish(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

/// Wraps `line` at word boundaries so no output line is wider than `width`.
///
/// The first output line starts with `first_indent` and every following one with
/// `rest_indent`. Words longer than a whole line are split by character.
/// A `width` too small to hold an indent plus one column leaves the line unwrapped.
pub fn wrap_line(
    line: &Line<'_>,
    width: u16,
    first_indent: &'static str,
    rest_indent: &'static str,
) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let unwrapped = width <= first_indent.width().max(rest_indent.width());

    let tokens = tokenize(line);
    let mut lines = Vec::new();
    let mut current = LineBuilder::new(first_indent);
    // Whitespace waiting to be emitted before the next word on the current line
    let mut pending: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        if token.space {
            if !current.content && lines.is_empty() {
                if unwrapped || current.width + token.width <= width {
                    current.push_token(token);
                }
            } else if current.content {
                pending = Some(i);
            }
            continue;
        }

        let space_width = pending.map_or(0, |p| tokens[p].width);
        if unwrapped || current.width + space_width + token.width <= width {
            if let Some(p) = pending.take() {
                current.push_token(&tokens[p]);
            }
            current.push_token(token);
            continue;
        }

        pending = None;
        if current.content {
            lines.push(std::mem::replace(&mut current, LineBuilder::new(rest_indent)).finish());
        }
        if current.width + token.width <= width {
            current.push_token(token);
            continue;
        }

        // Hard split a word wider than the line
        for (text, style) in &token.parts {
            for c in text.chars() {
                let w = c.width().unwrap_or(0);
                if current.content && current.width + w > width {
                    lines.push(std::mem::replace(&mut current, LineBuilder::new(rest_indent)).finish());
                }
                let mut buf = [0u8; 4];
                current.push(c.encode_utf8(&mut buf), *style, w);
            }
        }
    }

    lines.push(current.finish());
    lines
}

/// Lays out `items` left to right separated by `gap`, starting a new line when the
/// next item does not fit. Items are never split unless one alone is wider than a line.
pub fn wrap_items(
    items: Vec<Span<'static>>,
    width: u16,
    indent: &'static str,
    gap: &'static str,
) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let mut lines = Vec::new();
    let mut current = LineBuilder::new(indent);

    for item in items {
        let item_width = item.content.width();
        let gap_width = if current.content { gap.width() } else { 0 };
        if width > 0 && current.content && current.width + gap_width + item_width > width {
            lines.push(std::mem::replace(&mut current, LineBuilder::new(indent)).finish());
        } else if current.content {
            current.push(gap, Style::default(), gap.width());
        }
        current.push(&item.content, item.style, item_width);
    }

    lines.push(current.finish());
    lines
}
