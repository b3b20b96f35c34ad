//! Lay a collection of rasters out as a captioned contact sheet.
//!
//! [`CollectionGrid`] decides the table shape and cell size from whatever is
//! fixed (columns, rows or cell size) and the sheet dimensions, then builds a
//! [`Grid`] of [`ImageBlock`]s, each optionally stacked with a caption.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, RgbaImage};
//! use zenplate::{CollectionGrid, Size, Visual};
//!
//! let items = (0..5).map(|_| DynamicImage::ImageRgba8(RgbaImage::new(40, 30)));
//! let grid = CollectionGrid::new(items)
//!     .with_columns(2)
//!     .with_dimensions((210, 320))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(grid.n_rows(), 3);
//! assert_eq!(grid.n_columns(), 2);
//! assert_eq!(grid.column_width(0), 100);
//! assert_eq!(grid.size(), Size::new(210, 320));
//! ```

use std::sync::Arc;

use image::DynamicImage;

use crate::error::{Error, Result};
use crate::geometry::{Position, Size};
use crate::grid::Grid;
use crate::image_block::{Framed, ImageBlock};
use crate::strip::{Cell, DEFAULT_SPACE, Strip};
use crate::text::{self, TextBlock, Typeface};

/// Letter paper at 300 DPI, landscape.
pub const DEFAULT_DIMENSIONS: Size = Size::new(3300, 2250);

/// Where a caption goes relative to its image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CaptionPlacement {
    Top,
    #[default]
    Bottom,
}

/// One raster and its optional caption.
#[derive(Clone, Debug)]
pub struct CollectionItem {
    pub image: DynamicImage,
    pub caption: Option<String>,
}

impl From<DynamicImage> for CollectionItem {
    fn from(image: DynamicImage) -> Self {
        Self {
            image,
            caption: None,
        }
    }
}

impl<S: Into<String>> From<(DynamicImage, S)> for CollectionItem {
    fn from((image, caption): (DynamicImage, S)) -> Self {
        Self {
            image,
            caption: Some(caption.into()),
        }
    }
}

/// Builder for a [`Grid`] of equally sized image cells.
///
/// At least one of columns, rows or cell size must be set. Missing values
/// are derived in that order of precedence:
///
/// - columns: given, else `ceil(items / rows)`, else as many cells as fit
///   across the sheet width;
/// - rows: `ceil(items / columns)`, or more when a larger count is given;
/// - cell size: given, else the largest square that fits the sheet.
#[derive(Clone, Debug)]
pub struct CollectionGrid {
    items: Vec<CollectionItem>,
    n_columns: Option<usize>,
    n_rows: Option<usize>,
    image_dimensions: Option<Size>,
    dimensions: Size,
    x_space: u32,
    y_space: u32,
    caption_placement: CaptionPlacement,
    caption_font: Option<Arc<dyn Typeface>>,
    caption_position: Position,
    image_position: Position,
    position: Position,
}

impl CollectionGrid {
    /// Items in reading order, letter landscape sheet, default gaps.
    pub fn new(items: impl IntoIterator<Item = impl Into<CollectionItem>>) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            n_columns: None,
            n_rows: None,
            image_dimensions: None,
            dimensions: DEFAULT_DIMENSIONS,
            x_space: DEFAULT_SPACE,
            y_space: DEFAULT_SPACE,
            caption_placement: CaptionPlacement::default(),
            caption_font: None,
            caption_position: Position::default(),
            image_position: Position::default(),
            position: Position::default(),
        }
    }

    /// Fixed column count.
    pub fn with_columns(mut self, n: usize) -> Self {
        self.n_columns = Some(n);
        self
    }

    /// Minimum row count. When the items do not fit in `columns × n`, rows
    /// are added until they do; no item is dropped.
    pub fn with_rows(mut self, n: usize) -> Self {
        self.n_rows = Some(n);
        self
    }

    /// Fixed cell size for every image.
    pub fn with_image_dimensions(mut self, size: impl Into<Size>) -> Self {
        self.image_dimensions = Some(size.into());
        self
    }

    /// Size of the finished sheet.
    pub fn with_dimensions(mut self, size: impl Into<Size>) -> Self {
        self.dimensions = size.into();
        self
    }

    /// Gaps between cells, also used between an image and its caption.
    pub fn with_spaces(mut self, x_space: u32, y_space: u32) -> Self {
        self.x_space = x_space;
        self.y_space = y_space;
        self
    }

    /// Font for captions. Items with a caption and no font render without it.
    pub fn with_caption_font(mut self, font: Arc<dyn Typeface>) -> Self {
        self.caption_font = Some(font);
        self
    }

    /// Caption above or below its image.
    pub fn with_caption_placement(mut self, placement: CaptionPlacement) -> Self {
        self.caption_placement = placement;
        self
    }

    /// Placement of the caption text inside its row of the cell.
    pub fn with_caption_position(mut self, position: impl Into<Position>) -> Self {
        self.caption_position = position.into();
        self
    }

    /// Placement of each image inside its cell.
    pub fn with_image_position(mut self, position: impl Into<Position>) -> Self {
        self.image_position = position.into();
        self
    }

    /// Placement of the table on the sheet.
    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    pub fn n_columns(&self) -> Result<usize> {
        if let Some(n) = self.n_columns {
            return Ok(n.max(1));
        }
        if let Some(rows) = self.n_rows {
            return Ok(self.items.len().div_ceil(rows.max(1)).max(1));
        }
        let cell = self.image_dimensions.ok_or(Error::MissingGridShape)?;
        let across = (u64::from(self.dimensions.width) + u64::from(self.x_space))
            / (u64::from(cell.width) + u64::from(self.x_space)).max(1);
        Ok((across as usize).max(1))
    }

    pub fn n_rows(&self) -> Result<usize> {
        let needed = self.items.len().div_ceil(self.n_columns()?).max(1);
        Ok(self.n_rows.map_or(needed, |n| n.max(needed)))
    }

    /// Cell size: given, or the largest square fitting the sheet.
    pub fn image_dimensions(&self) -> Result<Size> {
        if let Some(size) = self.image_dimensions {
            return Ok(size);
        }
        let width = fit_track(self.dimensions.width, self.x_space, self.n_columns()?);
        let height = fit_track(self.dimensions.height, self.y_space, self.n_rows()?);
        let side = width.min(height);
        Ok(Size::new(side, side))
    }

    /// Lay the items out, every item in its own cell.
    pub fn build(&self) -> Result<Grid> {
        let columns = self.n_columns()?;
        let rows = self.n_rows()?;
        let cell = self.image_dimensions()?;
        if let Some(requested) = self.n_rows.filter(|&n| n < rows) {
            tracing::warn!(
                items = self.items.len(),
                requested,
                rows,
                "collection larger than requested rows, grid grown"
            );
        }
        tracing::debug!(columns, rows, cell = %cell, "building collection grid");

        let mut cells = Vec::with_capacity(self.items.len());
        for item in &self.items {
            cells.push(self.item_cell(item, cell)?);
        }
        let table: Vec<Vec<Cell>> = cells.chunks(columns).map(<[Cell]>::to_vec).collect();

        Ok(Grid::new(table)
            .with_spaces(self.x_space, self.y_space)
            .with_size(self.dimensions)
            .with_position(self.position))
    }

    fn item_cell(&self, item: &CollectionItem, cell: Size) -> Result<Cell> {
        let image = ImageBlock::new(item.image.clone())
            .with_size(cell)
            .with_position(self.image_position);
        let (Some(caption), Some(font)) = (&item.caption, &self.caption_font) else {
            return Ok(Cell::new(image));
        };
        let line = text::measure(caption, font.as_ref());
        let caption = TextBlock::with_shared_font(caption.as_str(), Arc::clone(font))
            .with_size((cell.width, line.height))
            .with_position(self.caption_position);
        let stack = match self.caption_placement {
            CaptionPlacement::Top => [Cell::new(caption), Cell::new(image)],
            CaptionPlacement::Bottom => [Cell::new(image), Cell::new(caption)],
        };
        Ok(Cell::new(Strip::vertical(stack)?.with_space(self.y_space)))
    }
}

/// Largest equal extent for `count` tracks with gaps inside `total`.
fn fit_track(total: u32, space: u32, count: usize) -> u32 {
    let count = count.max(1) as u64;
    let gaps = u64::from(space) * (count - 1);
    (u64::from(total).saturating_sub(gaps) / count) as u32
}
