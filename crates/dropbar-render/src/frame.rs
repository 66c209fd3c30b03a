#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! Widgets draw into [`Frame::buffer`] and register clickable regions in the
//! optional [`HitGrid`]. The host keeps the frame (or just its hit grid)
//! after drawing and resolves mouse positions with [`Frame::hit_test`].
//!
//! ```
//! use dropbar_core::geometry::Rect;
//! use dropbar_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::with_hit_grid(20, 2);
//! frame.register_hit(Rect::new(0, 0, 5, 1), HitId::new(7), HitRegion::Button, 2);
//! assert_eq!(frame.hit_test(3, 0), Some((HitId::new(7), HitRegion::Button, 2)));
//! assert_eq!(frame.hit_test(6, 0), None);
//! ```

use crate::buffer::Buffer;
use dropbar_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// A resolved hit: owning widget, region tag, and attached data.
pub type Hit = (HitId, HitRegion, HitData);

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRegion {
    /// Main content area.
    Content,
    /// Clickable button.
    Button,
    /// Backdrop behind a popup.
    Overlay,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCell {
    /// Widget that registered this cell.
    pub widget_id: HitId,
    /// Region tag for the hit area.
    pub region: HitRegion,
    /// Extra data attached to this hit cell.
    pub data: HitData,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id,
            region,
            data,
        }
    }
}

/// Hit testing grid for mouse interaction.
///
/// Later registrations overwrite earlier ones, so popups drawn after the
/// bar take precedence where they overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<HitCell>>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the hit cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Register a clickable region with the given hit metadata.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }

        let hit_cell = Some(HitCell::new(widget_id, region, data));
        for y in rect.y as usize..y_end {
            let row_start = y * self.width as usize;
            self.cells[row_start + rect.x as usize..row_start + x_end].fill(hit_cell);
        }
    }

    /// Hit test at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        self.get(x, y)
            .map(|cell| (cell.widget_id, cell.region, cell.data))
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// The render target for one pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Optional hit grid for mouse hit testing.
    ///
    /// When `Some`, widgets can register clickable regions.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Create a new frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Create a new frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    /// Enable hit testing on an existing frame.
    pub fn enable_hit_testing(&mut self) {
        if self.hit_grid.is_none() {
            self.hit_grid = Some(HitGrid::new(self.width(), self.height()));
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Get the bounding rectangle of the frame.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Clear cells and hit regions.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
    }

    /// Register a hit region (if hit grid is enabled).
    ///
    /// Returns `true` if the region was registered, `false` if no hit grid.
    /// The region is clipped to the frame bounds.
    pub fn register_hit(
        &mut self,
        rect: Rect,
        id: HitId,
        region: HitRegion,
        data: HitData,
    ) -> bool {
        let clipped = rect.intersection(&self.bounds());
        match self.hit_grid.as_mut() {
            Some(grid) => {
                if !clipped.is_empty() {
                    grid.register(clipped, id, region, data);
                }
                true
            }
            None => false,
        }
    }

    /// Hit test at the given position (if hit grid is enabled).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }
}
