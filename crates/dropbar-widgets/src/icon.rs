#![forbid(unsafe_code)]

//! Icon widget: a named glyph.
//!
//! Icons are looked up by name. Sizes at or below [`Icon::SMALL_MAX`] pick
//! the small variant of a glyph where one exists. Unknown names fall back
//! to a bullet so a misspelled icon stays visible; an empty name draws
//! nothing.

use crate::{Widget, apply_style};
use dropbar_core::geometry::Rect;
use dropbar_render::cell::Cell;
use dropbar_render::frame::Frame;
use dropbar_style::Style;

/// A single-glyph icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Icon<'a> {
    name: &'a str,
    size: u16,
    style: Style,
}

impl<'a> Icon<'a> {
    /// Largest size that still uses the small glyph variant.
    pub const SMALL_MAX: u16 = 12;

    /// Create an icon with the default size (10).
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            size: 10,
            style: Style::default(),
        }
    }

    /// Set the nominal size.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The icon name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Resolve the glyph for this name and size.
    #[must_use]
    pub fn glyph(&self) -> Option<char> {
        let small = self.size <= Self::SMALL_MAX;
        let glyph = match self.name {
            "" => return None,
            "arrow-up" => pick(small, '▴', '▲'),
            "down-arrow" | "arrow-down" => pick(small, '▾', '▼'),
            "arrow-right" => pick(small, '▸', '▶'),
            "arrow-left" => pick(small, '◂', '◀'),
            "check" | "checklist" => '✓',
            "close" => '✕',
            "more" => '…',
            _ => '•',
        };
        Some(glyph)
    }

    /// Width in cells (0 or 1).
    #[must_use]
    pub fn width(&self) -> u16 {
        u16::from(self.glyph().is_some())
    }
}

/// Names with a dedicated glyph.
pub const KNOWN_NAMES: [&str; 9] = [
    "arrow-up",
    "down-arrow",
    "arrow-down",
    "arrow-right",
    "arrow-left",
    "check",
    "checklist",
    "close",
    "more",
];

/// Whether `name` has a dedicated glyph (and will not fall back to a bullet).
#[must_use]
pub fn is_known_name(name: &str) -> bool {
    KNOWN_NAMES.contains(&name)
}

fn pick(small: bool, small_glyph: char, large_glyph: char) -> char {
    if small { small_glyph } else { large_glyph }
}

impl Widget for Icon<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let Some(glyph) = self.glyph() else {
            return;
        };
        let mut cell = Cell::from_char(glyph);
        apply_style(&mut cell, self.style);
        frame.buffer.set(area.x, area.y, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropbar_render::cell::PackedRgba;

    #[test]
    fn direction_glyphs() {
        assert_eq!(Icon::new("arrow-up").glyph(), Some('▴'));
        assert_eq!(Icon::new("down-arrow").glyph(), Some('▾'));
        assert_eq!(Icon::new("down-arrow").size(16).glyph(), Some('▼'));
    }

    #[test]
    fn unknown_name_falls_back_to_bullet() {
        assert_eq!(Icon::new("does-not-exist").glyph(), Some('•'));
    }

    #[test]
    fn known_names_have_their_own_glyph() {
        for name in KNOWN_NAMES {
            assert!(is_known_name(name));
            assert_ne!(Icon::new(name).glyph(), Some('•'), "{name}");
        }
        assert!(!is_known_name("does-not-exist"));
        assert!(!is_known_name(""));
    }

    #[test]
    fn empty_name_draws_nothing() {
        let icon = Icon::new("");
        assert_eq!(icon.glyph(), None);
        assert_eq!(icon.width(), 0);

        let mut frame = Frame::new(2, 1);
        icon.render(Rect::new(0, 0, 2, 1), &mut frame);
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
    }

    #[test]
    fn renders_styled_glyph() {
        let red = PackedRgba::rgb(255, 0, 0);
        let mut frame = Frame::new(3, 1);
        Icon::new("check")
            .style(Style::new().fg(red))
            .render(Rect::new(1, 0, 2, 1), &mut frame);
        let cell = frame.buffer.get(1, 0).unwrap();
        assert_eq!(cell.content.as_char(), Some('✓'));
        assert_eq!(cell.fg, red);
    }

    #[test]
    fn empty_area_is_noop() {
        let mut frame = Frame::new(2, 1);
        Icon::new("check").render(Rect::new(0, 0, 0, 0), &mut frame);
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
    }
}
