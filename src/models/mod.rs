// ABOUTME: Core data models for notifications, their severities, messages and actions

pub mod notification;

pub use notification::{
    Action, ActionHandler, MarkdownString, NotificationCollection, NotificationViewItem, Severity,
};
