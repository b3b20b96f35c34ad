//! Compose raster images from nested blocks: color fills, placed images,
//! rendered text, strips and grids.
//!
//! Every piece implements [`Visual`]; containers hold their children as
//! [`Cell`]s and are visuals themselves, so strips nest in grids and grids in
//! strips. Rendering is a pure function of the current tree.
//!
//! # Modules
//!
//! - [`color`] — RGB colors, named colors, hex and HSV conversions
//! - [`geometry`] — sizes, anchors, contain-fit and anchor offsets
//! - [`canvas`] — pixel modes, blank canvases, compositing paste
//! - [`block`] — the [`Visual`] trait and the plain color [`Block`]
//! - [`image_block`] — placement settings ([`Frame`]) and [`ImageBlock`]
//! - [`text`] — the [`Typeface`] seam and [`TextBlock`]
//! - [`strip`], [`grid`] — containers
//! - [`collection`] — contact-sheet layout of many rasters
//! - [`raster`] — loading and encoding through the `image` crate
//!
//! # Example
//!
//! ```
//! use zenplate::{Block, Cell, Framed, Grid, Mode, Size, Strip, Visual};
//!
//! let red = Block::new().with_size((100, 100)).with_background("red").unwrap();
//! let blue = Block::new().with_size((50, 100)).with_background("#0000FF").unwrap();
//! let strip = Strip::horizontal([Cell::new(red), Cell::new(blue)]).unwrap();
//!
//! let sheet = Grid::new([vec![Cell::new(strip.clone())], vec![Cell::new(strip)]])
//!     .with_size((400, 400));
//! let image = sheet.render().unwrap();
//!
//! assert_eq!(sheet.grid_size(), Size::new(160, 210));
//! assert_eq!((image.width(), image.height()), (400, 400));
//! assert_eq!(Mode::of(&image), Mode::Rgba);
//! ```

#![forbid(unsafe_code)]

pub mod block;
pub mod canvas;
pub mod collection;
pub mod color;
pub mod error;
#[cfg(feature = "fontdue")]
pub mod font;
pub mod geometry;
pub mod grid;
pub mod image_block;
pub mod raster;
pub mod strip;
pub mod text;

pub use block::{Background, Block, DEFAULT_SIZE, Visual};
pub use canvas::Mode;
pub use collection::{CaptionPlacement, CollectionGrid, CollectionItem, DEFAULT_DIMENSIONS};
pub use color::{Color, ColorValue};
pub use error::{Error, Result};
#[cfg(feature = "fontdue")]
pub use font::{FontCache, FontdueFace};
pub use geometry::{Anchor, Position, Size};
pub use grid::Grid;
pub use image_block::{Frame, Framed, ImageBlock};
pub use raster::{ImageCrateRasters, RasterProvider, RasterSource};
pub use strip::{Cell, DEFAULT_SPACE, Orientation, Strip};
pub use text::{LineMetrics, TextBlock, Typeface};
