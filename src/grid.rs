//! A table of visuals: columns as wide as their widest cell, rows as tall as
//! their tallest.
//!
//! Rows may have different lengths. Cell `i` of every row sits in column `i`;
//! missing and [`Cell::Empty`] cells leave their slot blank.
//!
//! # Example
//!
//! ```
//! use zenplate::{Block, Cell, Grid, Size};
//!
//! let cell = |w: u32, h: u32| Cell::new(Block::new().with_size((w, h)));
//! let grid = Grid::new([
//!     vec![cell(100, 50), cell(200, 80)],
//!     vec![cell(150, 60)],
//! ]);
//!
//! assert_eq!(grid.column_width(0), 150);
//! assert_eq!(grid.row_height(0), 80);
//! assert_eq!(grid.grid_size(), Size::new(150 + 200 + 10, 80 + 60 + 10));
//! ```

use image::DynamicImage;

use crate::block::Visual;
use crate::canvas::{self, Mode};
use crate::error::Result;
use crate::geometry::Size;
use crate::image_block::{Frame, Framed};
use crate::strip::{Cell, DEFAULT_SPACE};

/// Rows of cells rendered as a simple table.
///
/// Children whose mode differs from the grid's are logged and converted on
/// paste rather than rejected.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    x_space: u32,
    y_space: u32,
    frame: Frame,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Vec::<Vec<Cell>>::new())
    }
}

impl Grid {
    /// Grid of `rows` with the default gaps, opaque white, RGBA.
    pub fn new(rows: impl IntoIterator<Item = Vec<Cell>>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            x_space: DEFAULT_SPACE,
            y_space: DEFAULT_SPACE,
            frame: Frame::default(),
        }
    }

    /// Horizontal and vertical gaps.
    pub fn with_spaces(mut self, x_space: u32, y_space: u32) -> Self {
        self.x_space = x_space;
        self.y_space = y_space;
        self
    }

    /// Append a row below the others.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Rows in order, for replacing or removing cells after construction.
    pub fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    pub fn x_space(&self) -> u32 {
        self.x_space
    }

    pub fn y_space(&self) -> u32 {
        self.y_space
    }

    /// Same as [`with_spaces`](Self::with_spaces) in place.
    pub fn set_spaces(&mut self, x_space: u32, y_space: u32) {
        self.x_space = x_space;
        self.y_space = y_space;
    }

    /// Number of rows, empty ones included.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn n_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Tallest cell in row `n`; 0 when the row is empty or absent.
    pub fn row_height(&self, n: usize) -> u32 {
        self.rows
            .get(n)
            .into_iter()
            .flatten()
            .map(|c| c.size().height)
            .max()
            .unwrap_or(0)
    }

    /// Widest cell in column `n` across all rows; 0 when no row reaches it.
    pub fn column_width(&self, n: usize) -> u32 {
        self.rows
            .iter()
            .filter_map(|row| row.get(n))
            .map(|c| c.size().width)
            .max()
            .unwrap_or(0)
    }

    /// Column widths and row heights summed, plus one gap between neighbours.
    pub fn grid_size(&self) -> Size {
        let (widths, heights) = self.tracks();
        Size::new(
            total(&widths, self.x_space),
            total(&heights, self.y_space),
        )
    }

    /// Every cell pasted at the top-left corner of its slot. Gaps and empty
    /// slots stay clear until placement paints the grid background.
    pub fn grid_image(&self) -> Result<DynamicImage> {
        let (widths, heights) = self.tracks();
        let size = Size::new(
            total(&widths, self.x_space),
            total(&heights, self.y_space),
        );
        tracing::debug!(rows = self.n_rows(), columns = widths.len(), size = %size, "rendering grid");

        let mut out = canvas::blank(size, self.frame.mode, self.frame.content_fill());
        let mut y = 0i64;
        for (r, row) in self.rows.iter().enumerate() {
            let mut x = 0i64;
            for (c, cell) in row.iter().enumerate() {
                if let Some(block) = cell.visual() {
                    if block.mode() != self.frame.mode {
                        tracing::warn!(
                            row = r,
                            column = c,
                            expected = %self.frame.mode,
                            found = %block.mode(),
                            "grid cell mode differs from grid mode"
                        );
                    }
                    canvas::paste(&mut out, &block.render()?, (x, y));
                }
                x += i64::from(widths[c]) + i64::from(self.x_space);
            }
            y += i64::from(heights[r]) + i64::from(self.y_space);
        }
        Ok(out)
    }

    pub fn element(&self) -> Result<DynamicImage> {
        Ok(self.frame.element(&self.grid_image()?))
    }

    pub fn element_size(&self) -> Size {
        self.frame.element_size(self.grid_size())
    }

    pub fn xy(&self) -> (i64, i64) {
        self.frame.xy(self.grid_size())
    }

    pub fn image(&self) -> Result<DynamicImage> {
        Ok(self.frame.place(&self.grid_image()?))
    }

    /// Every column width and row height.
    fn tracks(&self) -> (Vec<u32>, Vec<u32>) {
        let widths = (0..self.n_columns()).map(|i| self.column_width(i)).collect();
        let heights = (0..self.n_rows()).map(|i| self.row_height(i)).collect();
        (widths, heights)
    }
}

fn total(extents: &[u32], space: u32) -> u32 {
    let sum = extents.iter().fold(0u32, |acc, &e| acc.saturating_add(e));
    let gaps = space.saturating_mul((extents.len() as u32).saturating_sub(1));
    sum.saturating_add(gaps)
}

impl Framed for Grid {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }
}

impl Visual for Grid {
    fn size(&self) -> Size {
        self.frame.outer_size(self.grid_size())
    }

    fn mode(&self) -> Mode {
        self.frame.mode
    }

    fn render(&self) -> Result<DynamicImage> {
        self.image()
    }
}
