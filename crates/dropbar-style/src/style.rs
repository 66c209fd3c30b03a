#![forbid(unsafe_code)]

//! Cascading style: every field is optional so styles can be layered.

use dropbar_render::cell::{PackedRgba, StyleFlags};

/// Foreground, background and attribute overrides.
///
/// `None` fields leave the underlying cell untouched when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<PackedRgba>,
    /// Background color override.
    pub bg: Option<PackedRgba>,
    /// Attribute flags to add.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub fn attrs(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    /// Add bold.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attrs(StyleFlags::BOLD)
    }

    /// Add dim.
    #[must_use]
    pub fn dim(self) -> Self {
        self.attrs(StyleFlags::DIM)
    }

    /// Add underline.
    #[must_use]
    pub fn underline(self) -> Self {
        self.attrs(StyleFlags::UNDERLINE)
    }

    /// Check whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Layer `other` on top of `self`: set fields in `other` win, attrs union.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        let attrs = match (self.attrs, other.attrs) {
            (Some(a), Some(b)) => Some(a | b),
            (a, b) => a.or(b),
        };
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs,
        }
    }
}
