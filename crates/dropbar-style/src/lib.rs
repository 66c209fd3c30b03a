#![forbid(unsafe_code)]

//! Style types and color parsing.

pub mod color;
pub mod style;

pub use color::{ColorParseError, parse_color};
pub use dropbar_render::cell::{PackedRgba, StyleFlags};
pub use style::Style;
