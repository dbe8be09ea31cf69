// ABOUTME: Virtualized terminal list that measures rows through a delegate and draws only visible rows
// Emits open and focus events from keyboard input instead of holding callbacks

use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::Paragraph};
use tracing::debug;

use super::{ListControl, ListDelegate, ListEvent, ListFactory, ListModel, ListOptions, ListRenderer, OpenEvent};

pub struct VirtualList<T> {
    model: ListModel<T>,
    delegate: Box<dyn ListDelegate<T>>,
    renderers: Vec<Box<dyn ListRenderer<T>>>,
    options: ListOptions,
    heights: Vec<u16>,
    width: u16,
    viewport_height: u16,
    scroll_top: usize,
    focused: Option<usize>,
    visible: Range<usize>,
}

impl<T: Clone> VirtualList<T> {
    pub fn new(
        delegate: Box<dyn ListDelegate<T>>,
        renderers: Vec<Box<dyn ListRenderer<T>>>,
        options: ListOptions,
    ) -> Self {
        Self {
            model: ListModel::new(),
            delegate,
            renderers,
            options,
            heights: Vec::new(),
            width: 0,
            viewport_height: 0,
            scroll_top: 0,
            focused: None,
            visible: 0..0,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Indexes drawn by the last render.
    pub fn visible_range(&self) -> Range<usize> {
        self.visible.clone()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Total height of all rows as of the last layout.
    pub fn content_height(&self) -> u16 {
        self.heights.iter().fold(0u16, |acc, h| acc.saturating_add(*h))
    }

    fn measure(&self, element: &T) -> u16 {
        self.delegate.height(element, self.width).max(1)
    }

    fn renderer_for(&self, element: &T) -> Option<&dyn ListRenderer<T>> {
        let template = self.delegate.template_id(element);
        self.renderers
            .iter()
            .find(|r| r.template_id() == template)
            .map(|r| &**r)
    }

    fn ensure_focus_visible(&mut self) {
        let len = self.model.len();
        if len == 0 {
            self.scroll_top = 0;
            return;
        }
        self.scroll_top = self.scroll_top.min(len - 1);

        let Some(focused) = self.focused else {
            return;
        };
        if focused < self.scroll_top {
            self.scroll_top = focused;
            return;
        }
        if self.viewport_height == 0 {
            return;
        }
        while self.scroll_top < focused {
            let span: u32 = self.heights[self.scroll_top..=focused]
                .iter()
                .map(|h| u32::from(*h))
                .sum();
            if span <= u32::from(self.viewport_height) {
                break;
            }
            self.scroll_top += 1;
        }
    }

    fn move_focus(&mut self, target: usize) -> Option<ListEvent<T>> {
        if self.model.is_empty() {
            return None;
        }
        let target = target.min(self.model.len() - 1);
        if self.focused == Some(target) {
            return None;
        }
        self.focused = Some(target);
        self.ensure_focus_visible();
        Some(ListEvent::FocusChanged(self.focused))
    }
}

impl<T: Clone> ListControl<T> for VirtualList<T> {
    fn splice(&mut self, start: usize, delete_count: usize, elements: Vec<T>) -> Vec<T> {
        let was_empty = self.model.is_empty();
        let start = start.min(self.model.len());
        let inserted = elements.len();
        let new_heights: Vec<u16> = elements.iter().map(|e| self.measure(e)).collect();

        let removed = self.model.splice(start, delete_count, elements);
        let end = start + removed.len();
        self.heights.splice(start..end, new_heights);

        let len = self.model.len();
        self.focused = match self.focused {
            _ if len == 0 => None,
            None if was_empty => Some(0),
            None => None,
            Some(f) if f >= end => Some(f - removed.len() + inserted),
            Some(f) if f < start => Some(f),
            Some(f) if inserted > 0 => Some(f.min(start + inserted - 1)),
            Some(_) => Some(start.min(len - 1)),
        };

        removed
    }

    fn layout(&mut self) {
        self.heights = self.model.iter().map(|e| self.measure(e)).collect();
        if let Some(f) = self.focused {
            self.focused = if self.model.is_empty() {
                None
            } else {
                Some(f.min(self.model.len() - 1))
            };
        }
        self.ensure_focus_visible();
    }

    fn len(&self) -> usize {
        self.model.len()
    }

    fn element(&self, index: usize) -> Option<&T> {
        self.model.get(index)
    }

    fn focused(&self) -> Option<usize> {
        self.focused
    }

    fn set_focus(&mut self, index: Option<usize>) {
        self.focused = index.filter(|i| *i < self.model.len());
        self.ensure_focus_visible();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ListEvent<T>> {
        let current = self.focused.unwrap_or(0);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let target = if self.focused.is_some() { current + 1 } else { 0 };
                self.move_focus(target)
            }
            KeyCode::Char('k') | KeyCode::Up => self.move_focus(current.saturating_sub(1)),
            KeyCode::Char('g') | KeyCode::Home => self.move_focus(0),
            KeyCode::Char('G') | KeyCode::End => self.move_focus(usize::MAX),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(index) = self.focused else {
                    return Some(ListEvent::Open(OpenEvent::empty()));
                };
                let element = self.model.get(index)?.clone();
                Some(ListEvent::Open(OpenEvent::single(element, index)))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width != self.width || area.height != self.viewport_height {
            self.width = area.width;
            self.viewport_height = area.height;
            self.layout();
        }

        let mut y = area.y;
        let mut index = self.scroll_top;
        while index < self.model.len() && y < area.bottom() {
            let height = self.heights[index].min(area.bottom() - y);
            let row = Rect::new(area.x, y, area.width, height);
            let element = &self.model.as_slice()[index];

            match self.renderer_for(element) {
                Some(renderer) => {
                    let text = renderer.render_element(element, index, area.width);
                    frame.render_widget(Paragraph::new(text), row);
                }
                None => debug!("No renderer registered for row {}", index),
            }
            if self.focused == Some(index) {
                frame.buffer_mut().set_style(row, self.options.highlight_style);
            }

            y = y.saturating_add(self.heights[index]);
            index += 1;
        }
        self.visible = self.scroll_top..index;
    }
}

/// Creates [`VirtualList`] instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualListFactory;

impl<T: Clone + 'static> ListFactory<T> for VirtualListFactory {
    fn create_list(
        &self,
        delegate: Box<dyn ListDelegate<T>>,
        renderers: Vec<Box<dyn ListRenderer<T>>>,
        options: ListOptions,
    ) -> Box<dyn ListControl<T>> {
        Box::new(VirtualList::new(delegate, renderers, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    struct FixedDelegate(u16);

    impl ListDelegate<&'static str> for FixedDelegate {
        fn height(&self, _element: &&'static str, _width: u16) -> u16 {
            self.0
        }

        fn template_id(&self, _element: &&'static str) -> &'static str {
            "text"
        }
    }

    struct TextRenderer;

    impl ListRenderer<&'static str> for TextRenderer {
        fn template_id(&self) -> &'static str {
            "text"
        }

        fn render_element(&self, element: &&'static str, _index: usize, _width: u16) -> Text<'static> {
            Text::from(*element)
        }
    }

    fn list(height: u16) -> VirtualList<&'static str> {
        VirtualList::new(Box::new(FixedDelegate(height)), vec![Box::new(TextRenderer)], ListOptions::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_first_insert_focuses_top_row() {
        let mut list = list(1);
        assert_eq!(list.focused(), None);
        list.splice(0, 0, vec!["a"]);
        assert_eq!(list.focused(), Some(0));
    }

    #[test]
    fn test_cleared_focus_survives_later_inserts() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b"]);
        list.set_focus(None);

        list.splice(0, 0, vec!["c"]);
        assert_eq!(list.focused(), None);

        list.splice(0, 3, vec![]);
        list.splice(0, 0, vec!["d"]);
        assert_eq!(list.focused(), Some(0));
    }

    #[test]
    fn test_insert_before_focus_keeps_same_element_focused() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b", "c"]);
        list.set_focus(Some(1));

        list.splice(0, 0, vec!["new"]);
        assert_eq!(list.focused(), Some(2));
        assert_eq!(list.element(2), Some(&"b"));
    }

    #[test]
    fn test_replace_in_place_keeps_focus() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b"]);
        list.set_focus(Some(1));
        list.splice(1, 1, vec!["b2"]);
        assert_eq!(list.focused(), Some(1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_removing_last_row_clamps_focus() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b"]);
        list.set_focus(Some(1));
        list.splice(1, 1, vec![]);
        assert_eq!(list.focused(), Some(0));
        list.splice(0, 1, vec![]);
        assert_eq!(list.focused(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_enter_opens_focused_row() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b"]);
        list.handle_key(key(KeyCode::Down));

        match list.handle_key(key(KeyCode::Enter)) {
            Some(ListEvent::Open(event)) => assert_eq!(event.first(), Some((&"b", 1))),
            other => panic!("expected open event, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_on_empty_list_opens_nothing() {
        let mut list = list(1);
        match list.handle_key(key(KeyCode::Enter)) {
            Some(ListEvent::Open(event)) => assert!(event.elements.is_empty()),
            other => panic!("expected empty open event, got {other:?}"),
        }
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut list = list(1);
        list.splice(0, 0, vec!["a", "b", "c"]);
        assert!(list.handle_key(key(KeyCode::Up)).is_none());
        list.handle_key(key(KeyCode::End));
        assert_eq!(list.focused(), Some(2));
        assert!(list.handle_key(key(KeyCode::Char('j'))).is_none());
        list.handle_key(key(KeyCode::Char('g')));
        assert_eq!(list.focused(), Some(0));
    }

    #[test]
    fn test_render_draws_only_visible_rows() {
        let mut list = list(2);
        list.splice(0, 0, vec!["r0", "r1", "r2", "r3", "r4", "r5"]);

        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                list.render(frame, area);
            })
            .unwrap();
        assert_eq!(list.visible_range(), 0..3);

        list.set_focus(Some(5));
        terminal
            .draw(|frame| {
                let area = frame.size();
                list.render(frame, area);
            })
            .unwrap();
        assert_eq!(list.scroll_top(), 4);
        assert_eq!(list.visible_range(), 4..6);

        let content: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("r5"));
        assert!(!content.contains("r0"));
    }
}
