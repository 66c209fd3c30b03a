#![forbid(unsafe_code)]

//! Menu configuration.
//!
//! [`MenuConfig`] is built with `with_*` methods, parsed from string option
//! maps with [`MenuConfig::from_options_with`], or (feature `serde`)
//! deserialized from camelCase keys:
//!
//! | key | type |
//! |---|---|
//! | `className` | string |
//! | `activeColor` | `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a color name |
//! | `closeOnClickOverlay` | bool |
//! | `scrollFixed` | bool, number or numeric string |
//! | `lockScroll` | bool |
//! | `titleIcon` | icon name |
//!
//! Parsing collects every bad field instead of stopping at the first one.

use std::fmt;

use dropbar_render::cell::PackedRgba;
use dropbar_style::{Style, parse_color};

use super::scroll_fixed::ScrollFixed;
use crate::icon;

/// Default accent color for the open entry (`#F2270C`).
pub const DEFAULT_ACTIVE_COLOR: PackedRgba = PackedRgba::rgb(0xF2, 0x27, 0x0C);

/// Option keys understood by [`MenuConfig::from_options_with`].
pub const OPTION_KEYS: [&str; 6] = [
    "className",
    "activeColor",
    "closeOnClickOverlay",
    "scrollFixed",
    "lockScroll",
    "titleIcon",
];

/// Bar configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "MenuOptions")
)]
pub struct MenuConfig {
    /// Extra class tag for the root and the bar.
    pub class_name: String,
    /// Base style of the bar row.
    pub style: Style,
    /// Accent color of the open entry, also handed to children.
    pub active_color: PackedRgba,
    /// Whether clicking outside an open popup closes it.
    pub close_on_click_overlay: bool,
    /// Scroll-fixed detection.
    pub scroll_fixed: ScrollFixed,
    /// Whether an open popup swallows wheel scrolling.
    pub lock_scroll: bool,
    /// Icon name shown on every entry instead of the direction arrow.
    pub title_icon: String,
    /// Patched over `style` while the bar is scroll-fixed.
    pub fixed_style: Style,
    /// Patched over `style` while any entry is open.
    pub opened_style: Style,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            style: Style::default(),
            active_color: DEFAULT_ACTIVE_COLOR,
            close_on_click_overlay: true,
            scroll_fixed: ScrollFixed::Off,
            lock_scroll: true,
            title_icon: String::new(),
            fixed_style: Style::new().bold(),
            opened_style: Style::default(),
        }
    }
}

impl MenuConfig {
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_active_color(mut self, color: PackedRgba) -> Self {
        self.active_color = color;
        self
    }

    #[must_use]
    pub fn with_close_on_click_overlay(mut self, close: bool) -> Self {
        self.close_on_click_overlay = close;
        self
    }

    /// Accepts a [`ScrollFixed`], a `bool` or a `u32` threshold.
    #[must_use]
    pub fn with_scroll_fixed(mut self, scroll_fixed: impl Into<ScrollFixed>) -> Self {
        self.scroll_fixed = scroll_fixed.into();
        self
    }

    #[must_use]
    pub fn with_lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    #[must_use]
    pub fn with_title_icon(mut self, name: impl Into<String>) -> Self {
        self.title_icon = name.into();
        self
    }

    #[must_use]
    pub fn with_fixed_style(mut self, style: Style) -> Self {
        self.fixed_style = style;
        self
    }

    #[must_use]
    pub fn with_opened_style(mut self, style: Style) -> Self {
        self.opened_style = style;
        self
    }

    /// Parse from a string option lookup (camelCase keys, see module docs).
    ///
    /// Missing keys keep their defaults. Bad values keep the default and are
    /// reported in [`MenuConfigParse::errors`].
    #[must_use]
    pub fn from_options_with<F>(mut get: F) -> MenuConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = MenuConfig::default();
        let mut errors = Vec::new();

        if let Some(value) = get("className") {
            config.class_name = value;
        }

        if let Some(value) = get("activeColor") {
            match parse_color(&value) {
                Ok(color) => config.active_color = color,
                Err(err) => errors.push(MenuConfigError::new(
                    "active_color",
                    value,
                    err.to_string(),
                )),
            }
        }

        if let Some(value) = get("closeOnClickOverlay") {
            match parse_bool(&value) {
                Some(flag) => config.close_on_click_overlay = flag,
                None => errors.push(MenuConfigError::new(
                    "close_on_click_overlay",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get("scrollFixed") {
            match parse_scroll_fixed(&value) {
                Some(scroll_fixed) => config.scroll_fixed = scroll_fixed,
                None => errors.push(MenuConfigError::new(
                    "scroll_fixed",
                    value,
                    "expected bool or non-negative integer",
                )),
            }
        }

        if let Some(value) = get("lockScroll") {
            match parse_bool(&value) {
                Some(flag) => config.lock_scroll = flag,
                None => errors.push(MenuConfigError::new(
                    "lock_scroll",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Some(value) = get("titleIcon") {
            config.title_icon = value;
        }

        if let Err(mut invalid) = config.validate() {
            errors.append(&mut invalid);
        }

        MenuConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<MenuConfigError>> {
        let mut errors = Vec::new();
        if self.active_color.a() == 0 {
            errors.push(MenuConfigError::new(
                "active_color",
                format!("#{:08X}", self.active_color.0),
                "active color is fully transparent",
            ));
        }
        if !self.title_icon.is_empty() && !icon::is_known_name(&self.title_icon) {
            errors.push(MenuConfigError::new(
                "title_icon",
                self.title_icon.clone(),
                "unknown icon name",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parse result with diagnostics.
#[derive(Debug, Clone)]
pub struct MenuConfigParse {
    pub config: MenuConfig,
    pub errors: Vec<MenuConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl MenuConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MenuConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for MenuConfigError {}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `true`/`false`, or a numeric threshold.
///
/// An empty string is falsy. A numeric string is always a threshold, so
/// `"0"` means "fixed as soon as the page moves".
fn parse_scroll_fixed(value: &str) -> Option<ScrollFixed> {
    let value = value.trim();
    match value {
        "" | "false" => Some(ScrollFixed::Off),
        "true" => Some(ScrollFixed::On),
        _ => value.parse::<u32>().ok().map(ScrollFixed::Threshold),
    }
}

#[cfg(feature = "serde")]
pub use serde_options::{MenuOptions, ScrollFixedOption};

#[cfg(feature = "serde")]
mod serde_options {
    use super::{MenuConfig, MenuConfigError, ScrollFixed, parse_scroll_fixed};
    use dropbar_style::parse_color;

    /// Raw deserialized options, converted into a [`MenuConfig`].
    #[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct MenuOptions {
        pub class_name: Option<String>,
        pub active_color: Option<String>,
        pub close_on_click_overlay: Option<bool>,
        pub scroll_fixed: Option<ScrollFixedOption>,
        pub lock_scroll: Option<bool>,
        pub title_icon: Option<String>,
    }

    /// `scrollFixed` in any of its accepted shapes.
    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    #[serde(untagged)]
    pub enum ScrollFixedOption {
        Flag(bool),
        Number(f64),
        Text(String),
    }

    impl ScrollFixedOption {
        fn resolve(&self) -> Result<ScrollFixed, MenuConfigError> {
            match self {
                Self::Flag(flag) => Ok(ScrollFixed::from(*flag)),
                // Zero is falsy; fractional thresholds compare like their floor.
                Self::Number(n) if *n == 0.0 => Ok(ScrollFixed::Off),
                Self::Number(n) if n.is_finite() && *n > 0.0 && *n <= f64::from(u32::MAX) => {
                    Ok(ScrollFixed::Threshold(n.floor() as u32))
                }
                Self::Number(n) => Err(MenuConfigError::new(
                    "scroll_fixed",
                    n.to_string(),
                    "expected bool or non-negative integer",
                )),
                Self::Text(text) => parse_scroll_fixed(text).ok_or_else(|| {
                    MenuConfigError::new(
                        "scroll_fixed",
                        text.clone(),
                        "expected bool or non-negative integer",
                    )
                }),
            }
        }
    }

    impl MenuOptions {
        /// Convert, collecting every bad field.
        pub fn into_config(self) -> Result<MenuConfig, Vec<MenuConfigError>> {
            let mut config = MenuConfig::default();
            let mut errors = Vec::new();

            if let Some(class_name) = self.class_name {
                config.class_name = class_name;
            }
            if let Some(color) = self.active_color {
                match parse_color(&color) {
                    Ok(parsed) => config.active_color = parsed,
                    Err(err) => {
                        errors.push(MenuConfigError::new("active_color", color, err.to_string()));
                    }
                }
            }
            if let Some(close) = self.close_on_click_overlay {
                config.close_on_click_overlay = close;
            }
            if let Some(scroll_fixed) = self.scroll_fixed {
                match scroll_fixed.resolve() {
                    Ok(parsed) => config.scroll_fixed = parsed,
                    Err(err) => errors.push(err),
                }
            }
            if let Some(lock) = self.lock_scroll {
                config.lock_scroll = lock;
            }
            if let Some(name) = self.title_icon {
                config.title_icon = name;
            }
            if let Err(mut invalid) = config.validate() {
                errors.append(&mut invalid);
            }

            if errors.is_empty() {
                Ok(config)
            } else {
                Err(errors)
            }
        }
    }

    impl TryFrom<MenuOptions> for MenuConfig {
        type Error = MenuConfigError;

        /// Fails with the first bad field; use [`MenuOptions::into_config`]
        /// to see all of them.
        fn try_from(options: MenuOptions) -> Result<Self, Self::Error> {
            options.into_config().map_err(|mut errors| errors.swap_remove(0))
        }
    }
}
