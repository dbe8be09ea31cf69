// ABOUTME: Notification entry model with immutable content and a togglable expansion flag
// Entries are shared by reference between the collection and the list control

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::list::ListModel;

/// Ordered notifications, newest first.
pub type NotificationCollection = ListModel<Rc<NotificationViewItem>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{other}' (expected info, warning or error)")),
        }
    }
}

/// Message text that may carry markup.
///
/// Markup is only interpreted when `is_trusted` is set; untrusted messages
/// are shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownString {
    pub value: String,
    pub is_trusted: bool,
}

impl MarkdownString {
    pub fn trusted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_trusted: true,
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_trusted: false,
        }
    }
}

/// Zero-argument callback attached to an action. The return value, if any, is ignored.
pub type ActionHandler = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct Action {
    id: String,
    label: String,
    enabled: bool,
    handler: ActionHandler,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>, enabled: bool, handler: ActionHandler) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled,
            handler,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Invokes the handler if the action is enabled. Returns whether it ran.
    ///
    /// Panics raised by the handler propagate to the caller.
    pub fn run(&self) -> bool {
        if !self.enabled {
            return false;
        }
        (self.handler)();
        true
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// A single notification.
///
/// Everything except the expansion flag is fixed at construction.
#[derive(Debug)]
pub struct NotificationViewItem {
    severity: Severity,
    message: MarkdownString,
    source: String,
    actions: Vec<Action>,
    created_at: DateTime<Local>,
    expanded: Cell<bool>,
}

impl NotificationViewItem {
    pub fn new(severity: Severity, message: MarkdownString, source: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            severity,
            message,
            source: source.into(),
            actions,
            created_at: Local::now(),
            expanded: Cell::new(false),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &MarkdownString {
        &self.message
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn expand(&self) {
        self.expanded.set(true);
    }

    pub fn collapse(&self) {
        self.expanded.set(false);
    }
}
