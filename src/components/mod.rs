// ABOUTME: UI components for the TUI interface: notification list view, its row renderer, layout and help

pub mod container;
pub mod help;
pub mod layout;
pub mod notification_list;
pub mod notification_renderer;
pub mod wrap;

pub use container::{Container, ContainerRef, ContainerStyle};
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use notification_list::{DefaultActionHandlers, NotificationList};
pub use notification_renderer::{NotificationRenderer, NotificationsDelegate};
