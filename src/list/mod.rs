// ABOUTME: List control capability consumed by views: backing model, delegates, renderers and events
// Views depend on these traits only; VirtualList is the terminal implementation

pub mod virtual_list;

pub use virtual_list::{VirtualList, VirtualListFactory};

use crossterm::event::KeyEvent;
use ratatui::{prelude::*, style::Style};

/// Spliceable sequence backing a list control. Index order is display order.
#[derive(Debug, Clone)]
pub struct ListModel<T> {
    items: Vec<T>,
}

impl<T> Default for ListModel<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ListModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `delete_count` items at `start` and inserts `items` in their place.
    ///
    /// `start` past the end appends; `delete_count` is clamped to what exists.
    pub fn splice(&mut self, start: usize, delete_count: usize, items: Vec<T>) -> Vec<T> {
        let start = start.min(self.items.len());
        let end = start.saturating_add(delete_count).min(self.items.len());
        self.items.splice(start..end, items).collect()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

/// Describes how a row should be measured and which renderer draws it.
pub trait ListDelegate<T> {
    /// Row height in terminal lines for the given content width.
    /// A width of zero means the width is not known yet.
    fn height(&self, element: &T, width: u16) -> u16;

    fn template_id(&self, element: &T) -> &'static str;
}

/// Maps an element to the visual structure of its row.
///
/// Rows are drawn as returned: lines wider than `width` are cut off, so renderers
/// wrap their own text and the delegate must measure the same line count.
pub trait ListRenderer<T> {
    fn template_id(&self) -> &'static str;

    fn render_element(&self, element: &T, index: usize, width: u16) -> Text<'static>;
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Accessible name of the list.
    pub aria_label: String,
    pub highlight_style: Style,
}

/// Elements the user opened, with their indexes in the backing model.
#[derive(Debug, Clone)]
pub struct OpenEvent<T> {
    pub elements: Vec<T>,
    pub indexes: Vec<usize>,
}

impl<T> OpenEvent<T> {
    pub fn single(element: T, index: usize) -> Self {
        Self {
            elements: vec![element],
            indexes: vec![index],
        }
    }

    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// First selected element and its index, if any.
    pub fn first(&self) -> Option<(&T, usize)> {
        self.elements.first().zip(self.indexes.first().copied())
    }
}

#[derive(Debug, Clone)]
pub enum ListEvent<T> {
    Open(OpenEvent<T>),
    FocusChanged(Option<usize>),
}

pub trait ListControl<T> {
    fn splice(&mut self, start: usize, delete_count: usize, elements: Vec<T>) -> Vec<T>;

    /// Recomputes row measurements and scroll position.
    fn layout(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<&T>;

    fn focused(&self) -> Option<usize>;

    fn set_focus(&mut self, index: Option<usize>);

    fn handle_key(&mut self, key: KeyEvent) -> Option<ListEvent<T>>;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Creates list controls bound to a delegate and a set of renderers.
pub trait ListFactory<T> {
    fn create_list(
        &self,
        delegate: Box<dyn ListDelegate<T>>,
        renderers: Vec<Box<dyn ListRenderer<T>>>,
        options: ListOptions,
    ) -> Box<dyn ListControl<T>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_inserts_at_front() {
        let mut model = ListModel::new();
        model.splice(0, 0, vec!["b"]);
        model.splice(0, 0, vec!["a"]);
        assert_eq!(model.as_slice(), &["a", "b"]);
    }

    #[test]
    fn test_splice_replaces_and_returns_removed() {
        let mut model = ListModel::new();
        model.splice(0, 0, vec![1, 2, 3]);
        let removed = model.splice(1, 1, vec![20]);
        assert_eq!(removed, vec![2]);
        assert_eq!(model.as_slice(), &[1, 20, 3]);
    }

    #[test]
    fn test_splice_clamps_out_of_range() {
        let mut model = ListModel::new();
        model.splice(0, 0, vec![1, 2]);
        let removed = model.splice(10, 5, vec![3]);
        assert!(removed.is_empty());
        assert_eq!(model.as_slice(), &[1, 2, 3]);

        let removed = model.splice(1, 100, vec![]);
        assert_eq!(removed, vec![2, 3]);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_open_event_first() {
        let event = OpenEvent {
            elements: vec!["x", "y"],
            indexes: vec![4, 7],
        };
        assert_eq!(event.first(), Some((&"x", 4)));
        assert_eq!(OpenEvent::<&str>::empty().first(), None);
    }
}
