// ABOUTME: Theme colors: semantic tokens, parsed color values and the built-in themes
// Views look colors up through the ColorTheme trait and never hold a theme directly

pub mod service;

pub use service::{MessageLinkStyle, ThemeService, ThemeSubscription};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use ratatui::style::Color;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref HEX_COLOR: Regex =
        Regex::new(r"^#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("hex color pattern is valid");
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Unknown color token: {0}")]
    UnknownToken(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Semantic color names resolved by the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    NotificationsBackground,
    NotificationsForeground,
    ContrastBorder,
    WidgetShadow,
    TextLinkForeground,
}

impl ColorToken {
    pub const ALL: [ColorToken; 5] = [
        ColorToken::NotificationsBackground,
        ColorToken::NotificationsForeground,
        ColorToken::ContrastBorder,
        ColorToken::WidgetShadow,
        ColorToken::TextLinkForeground,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ColorToken::NotificationsBackground => "notifications.background",
            ColorToken::NotificationsForeground => "notifications.foreground",
            ColorToken::ContrastBorder => "contrastBorder",
            ColorToken::WidgetShadow => "widget.shadow",
            ColorToken::TextLinkForeground => "textLink.foreground",
        }
    }
}

impl FromStr for ColorToken {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|token| token.id() == s)
            .ok_or_else(|| ThemeError::UnknownToken(s.to_string()))
    }
}

/// A color written as `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
///
/// Displays as the text it was parsed from. Alpha is dropped when drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    repr: String,
    rgb: (u8, u8, u8),
}

impl ThemeColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    pub fn to_color(&self) -> Color {
        let (r, g, b) = self.rgb;
        Color::Rgb(r, g, b)
    }
}

impl FromStr for ThemeColor {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !HEX_COLOR.is_match(s) {
            return Err(ThemeError::InvalidColor(s.to_string()));
        }

        let digits = &s[1..];
        let expanded: String = if digits.len() <= 4 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i * 2..i * 2 + 2], 16).map_err(|_| ThemeError::InvalidColor(s.to_string()))
        };

        Ok(Self {
            repr: s.to_string(),
            rgb: (channel(0)?, channel(1)?, channel(2)?),
        })
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Color lookup capability handed to views.
#[cfg_attr(test, mockall::automock)]
pub trait ColorTheme {
    fn get_color(&self, token: ColorToken) -> Option<ThemeColor>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
    HighContrast,
}

#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    kind: ThemeKind,
    colors: HashMap<ColorToken, ThemeColor>,
}

impl Theme {
    pub const BUILTIN_NAMES: [&'static str; 3] = ["dark", "light", "high-contrast"];

    pub fn new(name: impl Into<String>, kind: ThemeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            colors: HashMap::new(),
        }
    }

    pub fn dark() -> Self {
        Self::new("dark", ThemeKind::Dark)
            .with_builtin(ColorToken::NotificationsBackground, "#252526")
            .with_builtin(ColorToken::NotificationsForeground, "#cccccc")
            .with_builtin(ColorToken::WidgetShadow, "#000000")
            .with_builtin(ColorToken::TextLinkForeground, "#3794ff")
    }

    pub fn light() -> Self {
        Self::new("light", ThemeKind::Light)
            .with_builtin(ColorToken::NotificationsBackground, "#f3f3f3")
            .with_builtin(ColorToken::NotificationsForeground, "#616161")
            .with_builtin(ColorToken::WidgetShadow, "#a8a8a8")
            .with_builtin(ColorToken::TextLinkForeground, "#006ab1")
    }

    pub fn high_contrast() -> Self {
        Self::new("high-contrast", ThemeKind::HighContrast)
            .with_builtin(ColorToken::NotificationsBackground, "#000000")
            .with_builtin(ColorToken::NotificationsForeground, "#ffffff")
            .with_builtin(ColorToken::ContrastBorder, "#6fc3df")
            .with_builtin(ColorToken::TextLinkForeground, "#3794ff")
    }

    pub fn builtin(name: &str) -> Result<Self, ThemeError> {
        match name {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            "high-contrast" | "hc" => Ok(Self::high_contrast()),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }

    fn with_builtin(self, token: ColorToken, value: &str) -> Self {
        let color = value.parse().ok();
        self.with_color(token, color)
    }

    /// Sets or removes a token.
    pub fn with_color(mut self, token: ColorToken, color: Option<ThemeColor>) -> Self {
        match color {
            Some(color) => self.colors.insert(token, color),
            None => self.colors.remove(&token),
        };
        self
    }

    /// Applies `token id -> color` overrides. An empty value removes the token.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<(), ThemeError> {
        for (id, value) in overrides {
            let token: ColorToken = id.parse()?;
            if value.trim().is_empty() {
                self.colors.remove(&token);
            } else {
                self.colors.insert(token, value.parse()?);
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ThemeKind {
        self.kind
    }
}

impl ColorTheme for Theme {
    fn get_color(&self, token: ColorToken) -> Option<ThemeColor> {
        self.colors.get(&token).cloned()
    }
}
