#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, and frames with hit testing.

pub mod buffer;
pub mod cell;
pub mod frame;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal cells.
///
/// Sums grapheme widths so combining sequences count once.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Display width of a single grapheme cluster.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    UnicodeWidthStr::width(grapheme)
}
