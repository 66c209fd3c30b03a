#![forbid(unsafe_code)]

//! Color parsing for configuration strings.
//!
//! Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA` (case-insensitive) and a handful
//! of named colors.

use std::fmt;

use dropbar_render::cell::PackedRgba;

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Nothing to parse.
    Empty,
    /// Hex form with a digit count other than 3, 6 or 8.
    BadLength(usize),
    /// A character that is not a hex digit.
    BadDigit(char),
    /// Neither hex nor a known name.
    UnknownName(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color"),
            Self::BadLength(n) => write!(f, "hex color must have 3, 6 or 8 digits, got {n}"),
            Self::BadDigit(c) => write!(f, "invalid hex digit {c:?}"),
            Self::UnknownName(name) => write!(f, "unknown color name {name:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Parse a color string.
pub fn parse_color(input: &str) -> Result<PackedRgba, ColorParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ColorParseError::Empty);
    }
    match input.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => named(input).ok_or_else(|| ColorParseError::UnknownName(input.to_string())),
    }
}

fn parse_hex(hex: &str) -> Result<PackedRgba, ColorParseError> {
    let digits = hex
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(ColorParseError::BadDigit(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let pair = |i: usize| (digits[i] << 4) | digits[i + 1];
    match digits.len() {
        3 => Ok(PackedRgba::rgb(
            digits[0] * 17,
            digits[1] * 17,
            digits[2] * 17,
        )),
        6 => Ok(PackedRgba::rgb(pair(0), pair(2), pair(4))),
        8 => Ok(PackedRgba::rgba(pair(0), pair(2), pair(4), pair(6))),
        n => Err(ColorParseError::BadLength(n)),
    }
}

fn named(name: &str) -> Option<PackedRgba> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => PackedRgba::TRANSPARENT,
        "black" => PackedRgba::BLACK,
        "white" => PackedRgba::WHITE,
        "gray" | "grey" => PackedRgba::GRAY,
        "red" => PackedRgba::rgb(255, 0, 0),
        "green" => PackedRgba::rgb(0, 128, 0),
        "blue" => PackedRgba::rgb(0, 0, 255),
        "orange" => PackedRgba::rgb(255, 165, 0),
        _ => return None,
    };
    Some(color)
}
