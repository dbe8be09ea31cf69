// ABOUTME: Retained container element with CSS-like classes and inline style used by the views
// Parents hold shared references to children so views can keep mutating what they appended

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use ratatui::style::Style;

use crate::theme::ThemeColor;

pub type ContainerRef = Rc<RefCell<Container>>;

/// Inline style of a container. `None` means the property is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStyle {
    pub background: Option<ThemeColor>,
    pub color: Option<ThemeColor>,
    pub outline_color: Option<ThemeColor>,
    pub shadow_color: Option<ThemeColor>,
}

impl ContainerStyle {
    /// Box shadow in CSS notation, e.g. `0 5px 8px #000000`.
    pub fn box_shadow(&self) -> Option<String> {
        self.shadow_color.as_ref().map(|c| format!("0 5px 8px {c}"))
    }

    /// Body style for the container's content.
    pub fn body(&self) -> Style {
        let mut style = Style::default();
        if let Some(bg) = &self.background {
            style = style.bg(bg.to_color());
        }
        if let Some(fg) = &self.color {
            style = style.fg(fg.to_color());
        }
        style
    }

    /// Border style; the outline color wins over the foreground.
    pub fn border(&self) -> Style {
        match &self.outline_color {
            Some(outline) => self.body().fg(outline.to_color()),
            None => self.body(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Container {
    classes: BTreeSet<String>,
    style: ContainerStyle,
    children: Vec<ContainerRef>,
}

impl Container {
    pub fn new(class: &str) -> Self {
        let mut container = Self::default();
        container.add_class(class);
        container
    }

    pub fn new_ref(class: &str) -> ContainerRef {
        Rc::new(RefCell::new(Self::new(class)))
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn style(&self) -> &ContainerStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ContainerStyle {
        &mut self.style
    }

    pub fn append_child(&mut self, child: ContainerRef) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[ContainerRef] {
        &self.children
    }
}
