//! A row or column of visuals laid out edge to edge.
//!
//! # Example
//!
//! ```
//! use zenplate::{Block, Cell, Size, Strip, Visual};
//!
//! let strip = Strip::horizontal([
//!     Cell::new(Block::new().with_size((100, 100))),
//!     Cell::new(Block::new().with_size((200, 100))),
//!     Cell::new(Block::new().with_size((150, 100))),
//! ])
//! .unwrap();
//!
//! assert_eq!(strip.strip_size(), Size::new(470, 100));
//! assert_eq!(strip.size(), Size::new(470, 100));
//! ```

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use image::DynamicImage;

use crate::block::Visual;
use crate::canvas::{self, Mode};
use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::image_block::{Frame, Framed};

/// Default gap between neighbouring children, in pixels.
pub const DEFAULT_SPACE: u32 = 10;

/// Layout axis of a [`Strip`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Extent along the layout axis and across it.
    fn split(self, size: Size) -> (u32, u32) {
        match self {
            Self::Horizontal => (size.width, size.height),
            Self::Vertical => (size.height, size.width),
        }
    }

    fn join(self, along: u32, across: u32) -> Size {
        match self {
            Self::Horizontal => Size::new(along, across),
            Self::Vertical => Size::new(across, along),
        }
    }

    fn offset(self, along: i64) -> (i64, i64) {
        match self {
            Self::Horizontal => (along, 0),
            Self::Vertical => (0, along),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

/// One slot of a container: a shared visual or nothing.
#[derive(Clone, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(Arc<dyn Visual>),
}

impl Cell {
    /// A visual owned by this cell alone.
    pub fn new(visual: impl Visual + 'static) -> Self {
        Self::Block(Arc::new(visual))
    }

    /// A visual that may also sit in other containers.
    ///
    /// Wrap it as `Arc<RwLock<V>>` to change it after placement; every
    /// container holding it sees the change on its next size or render.
    pub fn shared(visual: Arc<dyn Visual>) -> Self {
        Self::Block(visual)
    }

    /// `None` for an empty slot.
    pub fn visual(&self) -> Option<&Arc<dyn Visual>> {
        match self {
            Self::Empty => None,
            Self::Block(v) => Some(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Outer size of the visual, zero for an empty slot.
    pub fn size(&self) -> Size {
        self.visual().map_or(Size::new(0, 0), |v| v.size())
    }
}

impl<V: Visual + 'static> From<V> for Cell {
    fn from(visual: V) -> Self {
        Self::new(visual)
    }
}

/// Children laid out along one axis with a fixed gap, top/left aligned on
/// the other axis.
///
/// Empty cells take no slot and no gap. Every child must share the strip's
/// mode; a mismatch fails with `InconsistentMode` when the child is added and
/// again at render time.
#[derive(Clone, Debug)]
pub struct Strip {
    cells: Vec<Cell>,
    orientation: Orientation,
    space: u32,
    frame: Frame,
}

impl Default for Strip {
    fn default() -> Self {
        Self::new()
    }
}

impl Strip {
    /// Empty horizontal strip with the default gap.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            orientation: Orientation::Horizontal,
            space: DEFAULT_SPACE,
            frame: Frame::default(),
        }
    }

    /// Left-to-right strip of `cells`.
    pub fn horizontal(cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        Self::new().with_cells(cells)
    }

    /// Top-to-bottom strip of `cells`.
    pub fn vertical(cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        Self::new()
            .with_orientation(Orientation::Vertical)
            .with_cells(cells)
    }

    /// Append cells, checking each against the strip's mode.
    pub fn with_cells(mut self, cells: impl IntoIterator<Item = Cell>) -> Result<Self> {
        for cell in cells {
            self.push(cell)?;
        }
        Ok(self)
    }

    /// Axis the children follow.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Gap between neighbouring children, in pixels.
    pub fn with_space(mut self, space: u32) -> Self {
        self.space = space;
        self
    }

    /// Append one cell. Fails with `InconsistentMode` and leaves the strip
    /// unchanged when the child's mode differs from the strip's.
    pub fn push(&mut self, cell: impl Into<Cell>) -> Result<()> {
        let cell = cell.into();
        if let Some(v) = cell.visual() {
            self.check_mode(v.as_ref())?;
        }
        self.cells.push(cell);
        Ok(())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells in order, for replacing, reordering or removing children.
    ///
    /// Nothing is checked here; a child with the wrong mode is reported by
    /// [`blocks`](Self::blocks) and at render.
    pub fn cells_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.cells
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn space(&self) -> u32 {
        self.space
    }

    /// Same as [`with_orientation`](Self::with_orientation) in place.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Same as [`with_space`](Self::with_space) in place.
    pub fn set_space(&mut self, space: u32) {
        self.space = space;
    }

    /// The present children, each checked against the strip's mode.
    pub fn blocks(&self) -> Result<Vec<&Arc<dyn Visual>>> {
        self.cells
            .iter()
            .filter_map(Cell::visual)
            .map(|v| self.check_mode(v.as_ref()).map(|()| v))
            .collect()
    }

    /// Sum of child extents plus gaps along the axis, widest child across it.
    pub fn strip_size(&self) -> Size {
        let mut along = 0u32;
        let mut across = 0u32;
        let mut count = 0u32;
        for cell in self.cells.iter().filter(|c| !c.is_empty()) {
            let (a, c) = self.orientation.split(cell.size());
            along = along.saturating_add(a);
            across = across.max(c);
            count += 1;
        }
        let gaps = self.space.saturating_mul(count.saturating_sub(1));
        self.orientation.join(along.saturating_add(gaps), across)
    }

    /// Children pasted one after another. Gaps stay clear until placement
    /// paints the strip background under them.
    pub fn strip_image(&self) -> Result<DynamicImage> {
        let blocks = self.blocks()?;
        let size = self.strip_size();
        tracing::debug!(
            orientation = %self.orientation,
            children = blocks.len(),
            size = %size,
            "rendering strip"
        );
        let mut out = canvas::blank(size, self.frame.mode, self.frame.content_fill());
        let mut along = 0i64;
        for block in blocks {
            let image = block.render()?;
            canvas::paste(&mut out, &image, self.orientation.offset(along));
            let (a, _) = self.orientation.split(block.size());
            along += i64::from(a) + i64::from(self.space);
        }
        Ok(out)
    }

    pub fn element(&self) -> Result<DynamicImage> {
        Ok(self.frame.element(&self.strip_image()?))
    }

    pub fn element_size(&self) -> Size {
        self.frame.element_size(self.strip_size())
    }

    pub fn xy(&self) -> (i64, i64) {
        self.frame.xy(self.strip_size())
    }

    pub fn image(&self) -> Result<DynamicImage> {
        Ok(self.frame.place(&self.strip_image()?))
    }

    fn check_mode(&self, visual: &dyn Visual) -> Result<()> {
        let found = visual.mode();
        if found != self.frame.mode {
            return Err(Error::InconsistentMode {
                expected: self.frame.mode,
                found,
            });
        }
        Ok(())
    }
}

impl Framed for Strip {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }
}

impl Visual for Strip {
    fn size(&self) -> Size {
        self.frame.outer_size(self.strip_size())
    }

    fn mode(&self) -> Mode {
        self.frame.mode
    }

    fn render(&self) -> Result<DynamicImage> {
        self.image()
    }
}
