//! Placing a raster inside a block: resize policy, anchoring and compositing.
//!
//! [`Frame`] holds the placement settings shared by every visual that wraps
//! content (images, text, strips, grids). [`ImageBlock`] is the plain case:
//! the content is a raster supplied by the caller.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, RgbaImage};
//! use zenplate::{Framed, ImageBlock, Size, Visual};
//!
//! let source = DynamicImage::ImageRgba8(RgbaImage::new(1000, 500));
//! let block = ImageBlock::new(source).with_size((500, 500));
//!
//! assert_eq!(block.element_size(), Size::new(500, 250));
//! assert_eq!(block.xy(), (0, 125));
//! assert_eq!(block.render().unwrap().width(), 500);
//! ```

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, Rgba};

use crate::block::{Background, Visual};
use crate::canvas::{self, Mode};
use crate::color::{Color, ColorValue};
use crate::error::Result;
use crate::geometry::{self, Position, Size};
use crate::raster::{ImageCrateRasters, RasterProvider, RasterSource};

/// Resampling filter for fitted elements (bicubic).
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Placement settings for content inside a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Outer size. `None` follows the content size.
    pub size: Option<Size>,
    pub background: Background,
    pub mode: Mode,
    pub position: Position,
    /// Shrink (or stretch) content so it stays inside the block.
    pub fit_block: bool,
    /// Preserve the content's aspect ratio when fitting.
    pub keep_proportion: bool,
}

impl Default for Frame {
    /// Content-sized, opaque white, RGBA, centered, fit with proportion.
    fn default() -> Self {
        Self {
            size: None,
            background: Background::default(),
            mode: Mode::Rgba,
            position: Position::default(),
            fit_block: true,
            keep_proportion: true,
        }
    }
}

impl Frame {
    /// Outer size for content of `content` size.
    pub fn outer_size(&self, content: Size) -> Size {
        self.size.unwrap_or(content)
    }

    /// Size the content is drawn at.
    pub fn element_size(&self, content: Size) -> Size {
        geometry::fit_element(
            content,
            self.outer_size(content),
            self.fit_block,
            self.keep_proportion,
        )
    }

    /// Top-left offset of the drawn content.
    pub fn xy(&self, content: Size) -> (i64, i64) {
        let outer = self.outer_size(content);
        self.position.resolve(outer, self.element_size(content))
    }

    /// The content as drawn: resized when the policy asks for it.
    pub fn element(&self, content: &DynamicImage) -> DynamicImage {
        let native = canvas::size_of(content);
        let target = self.element_size(native);
        if target == native {
            return content.clone();
        }
        tracing::debug!(from = %native, to = %target, "resizing element");
        if target.is_empty() {
            return canvas::blank(target, Mode::of(content), Rgba([0, 0, 0, 0]));
        }
        content.resize_exact(target.width, target.height, RESIZE_FILTER)
    }

    /// Background canvas with the drawn content pasted on top.
    ///
    /// The background is painted here and only here; content meant to show
    /// it through should start from [`content_fill`](Self::content_fill).
    pub fn place(&self, content: &DynamicImage) -> DynamicImage {
        let native = canvas::size_of(content);
        let element = self.element(content);
        let xy = self.position.resolve(self.outer_size(native), canvas::size_of(&element));
        let mut out = canvas::blank(self.outer_size(native), self.mode, self.background.rgba());
        canvas::paste(&mut out, &element, xy);
        out
    }

    /// Fill for content rasters drawn before placement.
    ///
    /// RGBA content starts transparent so the block background shows through
    /// exactly once. RGB paste replaces pixels, so RGB content starts from
    /// the opaque background color instead.
    pub fn content_fill(&self) -> Rgba<u8> {
        match self.mode {
            Mode::Rgba => Rgba([0, 0, 0, 0]),
            Mode::Rgb => {
                let mut fill = self.background.rgba();
                fill.0[3] = 255;
                fill
            }
        }
    }
}

/// Builders and setters for anything that owns a [`Frame`].
///
/// Setters call [`frame_changed`](Self::frame_changed) afterwards so
/// implementors with derived content can refresh it.
pub trait Framed {
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    /// Hook run after any frame setter.
    fn frame_changed(&mut self) {}

    fn with_size(mut self, size: impl Into<Size>) -> Self
    where
        Self: Sized,
    {
        self.set_size(size);
        self
    }

    fn with_position(mut self, position: impl Into<Position>) -> Self
    where
        Self: Sized,
    {
        self.set_position(position);
        self
    }

    /// Position from one of the nine anchor literals, e.g. `"top-left"`.
    fn with_anchor(mut self, name: &str) -> Result<Self>
    where
        Self: Sized,
    {
        self.set_position(Position::parse(name)?);
        Ok(self)
    }

    fn with_fit_block(mut self, fit_block: bool) -> Self
    where
        Self: Sized,
    {
        self.set_fit_block(fit_block);
        self
    }

    fn with_keep_proportion(mut self, keep_proportion: bool) -> Self
    where
        Self: Sized,
    {
        self.set_keep_proportion(keep_proportion);
        self
    }

    fn with_background(mut self, color: impl Into<ColorValue>) -> Result<Self>
    where
        Self: Sized,
    {
        self.set_background_color(color)?;
        Ok(self)
    }

    fn with_opacity(mut self, opacity: f64) -> Result<Self>
    where
        Self: Sized,
    {
        self.set_background_opacity(opacity)?;
        Ok(self)
    }

    fn with_mode(mut self, mode: Mode) -> Self
    where
        Self: Sized,
    {
        self.set_mode(mode);
        self
    }

    fn set_size(&mut self, size: impl Into<Size>) {
        self.frame_mut().size = Some(size.into());
        self.frame_changed();
    }

    /// Go back to following the content size.
    fn clear_size(&mut self) {
        self.frame_mut().size = None;
        self.frame_changed();
    }

    fn set_position(&mut self, position: impl Into<Position>) {
        self.frame_mut().position = position.into();
        self.frame_changed();
    }

    fn set_fit_block(&mut self, fit_block: bool) {
        self.frame_mut().fit_block = fit_block;
        self.frame_changed();
    }

    fn set_keep_proportion(&mut self, keep_proportion: bool) {
        self.frame_mut().keep_proportion = keep_proportion;
        self.frame_changed();
    }

    fn set_background_color(&mut self, color: impl Into<ColorValue>) -> Result<()> {
        let color = Color::create(color)?;
        self.frame_mut().background.set_color(color);
        self.frame_changed();
        Ok(())
    }

    fn set_background_opacity(&mut self, opacity: f64) -> Result<()> {
        self.frame_mut().background.set_opacity(opacity)?;
        self.frame_changed();
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) {
        self.frame_mut().mode = mode;
        self.frame_changed();
    }

    fn background_hex(&self) -> String {
        self.frame().background.hex()
    }

    fn position(&self) -> Position {
        self.frame().position
    }
}

/// A caller-supplied raster placed inside a block.
#[derive(Clone, Debug)]
pub struct ImageBlock {
    source: DynamicImage,
    frame: Frame,
}

impl ImageBlock {
    /// Block sized to the raster, centered, fit with proportion, opaque white.
    pub fn new(source: DynamicImage) -> Self {
        Self {
            source,
            frame: Frame::default(),
        }
    }

    /// Load a raster from disk with the `image` crate.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_source(
            &ImageCrateRasters,
            RasterSource::Path(path.as_ref().to_path_buf()),
        )
    }

    /// Load a raster through any provider.
    pub fn from_source(provider: &dyn RasterProvider, source: RasterSource) -> Result<Self> {
        Ok(Self::new(provider.load(source)?))
    }

    /// The raster as supplied.
    pub fn source(&self) -> &DynamicImage {
        &self.source
    }

    pub fn source_size(&self) -> Size {
        canvas::size_of(&self.source)
    }

    pub fn width(&self) -> u32 {
        self.size().width
    }

    pub fn height(&self) -> u32 {
        self.size().height
    }

    /// The source as drawn: resized under the current fit policy.
    pub fn element(&self) -> DynamicImage {
        self.frame.element(&self.source)
    }

    pub fn element_size(&self) -> Size {
        self.frame.element_size(self.source_size())
    }

    /// Top-left corner of the element inside the block.
    pub fn xy(&self) -> (i64, i64) {
        self.frame.xy(self.source_size())
    }

    /// The composited block.
    pub fn image(&self) -> DynamicImage {
        self.frame.place(&self.source)
    }
}

impl Framed for ImageBlock {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }
}

impl Visual for ImageBlock {
    fn size(&self) -> Size {
        self.frame.outer_size(self.source_size())
    }

    fn mode(&self) -> Mode {
        self.frame.mode
    }

    fn render(&self) -> Result<DynamicImage> {
        Ok(self.image())
    }
}
