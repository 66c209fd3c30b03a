#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. A wide character is written whole or not at all

use crate::cell::Cell;
use dropbar_core::geometry::Rect;

/// A 2D grid of terminal cells.
///
/// ```
/// use dropbar_render::buffer::Buffer;
/// use dropbar_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.row_text(0).trim_end(), "Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a new buffer of default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell at (x, y).
    ///
    /// Out-of-bounds writes are ignored. A wide character that would not
    /// fit before the right edge is not written; one that fits also fills
    /// the trailing cells with [`Cell::CONTINUATION`].
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width().max(1);
        if (x as usize + width) > self.width as usize || y >= self.height {
            return;
        }
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
        for dx in 1..width as u16 {
            if let Some(i) = self.index(x + dx, y) {
                self.cells[i] = Cell::CONTINUATION;
            }
        }
    }

    /// Fill a rectangular region with the given cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.bounds().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Get raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Text of row `y`, empty cells rendered as spaces.
    ///
    /// Continuation cells are skipped so wide characters read naturally.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.content.as_char().unwrap_or(' '))
            .collect()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
