// ABOUTME: Library crate for the notification center exposing public API for testing and external use

pub mod app;
pub mod components;
pub mod config;
pub mod list;
pub mod markdown;
pub mod models;
pub mod theme;
