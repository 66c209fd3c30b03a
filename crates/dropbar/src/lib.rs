#![forbid(unsafe_code)]

//! dropbar public facade crate.
//!
//! Re-exports the menu bar and the types needed to drive it, plus a small
//! prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dropbar_core::event::{Event, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use dropbar_core::geometry::{Rect, Sides};
pub use dropbar_core::scroll::{ScrollHost, ScrollSignal, ScrollSubscription};

#[cfg(feature = "tracing-json")]
pub use dropbar_core::logging::init_json_subscriber;

// --- Render re-exports -----------------------------------------------------

pub use dropbar_render::buffer::Buffer;
pub use dropbar_render::cell::{Cell, PackedRgba};
pub use dropbar_render::frame::{Frame, HitId, HitRegion};

// --- Style re-exports ------------------------------------------------------

pub use dropbar_style::{ColorParseError, Style, StyleFlags, parse_color};

// --- Widget re-exports -----------------------------------------------------

pub use dropbar_widgets::icon::Icon;
pub use dropbar_widgets::menu::{
    Direction, FixedMode, Menu, MenuConfig, MenuConfigError, MenuEntry, MenuEvent, MenuItem,
    MenuOption, MenuParent, MenuState, ScrollFixed,
};
pub use dropbar_widgets::{StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dropbar hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A color string could not be parsed.
    Color(ColorParseError),
    /// Menu configuration was rejected; every bad field is listed.
    Config(Vec<MenuConfigError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(err) => write!(f, "{err}"),
            Self::Config(errors) => {
                write!(f, "invalid menu config")?;
                for (i, err) in errors.iter().enumerate() {
                    let sep = if i == 0 { ": " } else { "; " };
                    write!(f, "{sep}{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

impl From<MenuConfigError> for Error {
    fn from(err: MenuConfigError) -> Self {
        Self::Config(vec![err])
    }
}

impl From<Vec<MenuConfigError>> for Error {
    fn from(errors: Vec<MenuConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for dropbar APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a string option map into a validated [`MenuConfig`].
///
/// Unlike [`MenuConfig::from_options_with`], any bad field is an error.
pub fn menu_config_from<F>(get: F) -> Result<MenuConfig>
where
    F: FnMut(&str) -> Option<String>,
{
    let parsed = MenuConfig::from_options_with(get);
    if parsed.errors.is_empty() {
        Ok(parsed.config)
    } else {
        Err(Error::Config(parsed.errors))
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Event, Frame, Menu, MenuConfig, MenuEvent, MenuItem, MenuOption, MenuState,
        MouseEvent, Rect, Result, ScrollHost, StatefulWidget, Style, Widget,
    };

    pub use crate::{core, render, style, widgets};
}

pub use dropbar_core as core;
pub use dropbar_render as render;
pub use dropbar_style as style;
pub use dropbar_widgets as widgets;
