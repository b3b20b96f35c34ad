//! Text rendered to a raster, then placed like any other image.
//!
//! Fonts are reached through [`Typeface`]; the `fontdue` feature provides
//! [`FontdueFace`](crate::font::FontdueFace).

use core::fmt;
use std::sync::Arc;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::block::Visual;
use crate::canvas::{self, Mode};
use crate::color::{self, Color, ColorValue};
use crate::error::Result;
use crate::geometry::Size;
use crate::image_block::{Frame, Framed};

/// Vertical metrics of one line, in pixels. Both values are magnitudes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line.
    pub descent: f32,
}

impl LineMetrics {
    /// Whole-pixel line height.
    pub fn height(&self) -> u32 {
        (self.ascent + self.descent).ceil().max(0.0) as u32
    }
}

/// A font at a fixed pixel size.
pub trait Typeface: fmt::Debug + Send + Sync {
    fn line_metrics(&self) -> LineMetrics;

    /// Horizontal advance of a single line.
    fn advance(&self, line: &str) -> f32;

    /// Draw one line with its pen starting at `x` on the given baseline,
    /// blending `color` (alpha included) over existing pixels.
    fn draw(&self, canvas: &mut RgbaImage, line: &str, x: f32, baseline: f32, color: Rgba<u8>);
}

/// Bounding box of `text` under `font`: the widest line by the sum of line
/// heights. A trailing newline adds an empty line.
pub fn measure(text: &str, font: &dyn Typeface) -> Size {
    let line_h = font.line_metrics().height();
    let mut width = 0.0f32;
    let mut lines = 0u32;
    for line in split_lines(text) {
        width = width.max(font.advance(line));
        lines += 1;
    }
    Size::new(width.ceil() as u32, line_h * lines)
}

/// Draw `text` on a canvas of exactly its bounding box filled with `background`.
pub fn rasterize(
    text: &str,
    font: &dyn Typeface,
    color: Rgba<u8>,
    background: Rgba<u8>,
) -> RgbaImage {
    let size = measure(text, font);
    let metrics = font.line_metrics();
    let line_h = metrics.height();
    let mut canvas = RgbaImage::from_pixel(size.width, size.height, background);
    for (i, line) in split_lines(text).enumerate() {
        let baseline = (i as u32 * line_h) as f32 + metrics.ascent;
        font.draw(&mut canvas, line, 0.0, baseline, color);
    }
    canvas
}

fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Text drawn with a font and placed inside a block.
///
/// The text raster is regenerated whenever the text, font, text color or
/// background changes, so renders never see a stale raster.
#[derive(Clone, Debug)]
pub struct TextBlock {
    text: String,
    font: Arc<dyn Typeface>,
    text_color: Color,
    text_opacity: f64,
    text_alpha: u8,
    source: DynamicImage,
    frame: Frame,
}

impl TextBlock {
    /// Black text, opaque white background, block sized to the text.
    pub fn new(text: impl Into<String>, font: impl Typeface + 'static) -> Self {
        Self::with_shared_font(text, Arc::new(font))
    }

    /// Same as [`new`](Self::new) with a font shared between blocks.
    pub fn with_shared_font(text: impl Into<String>, font: Arc<dyn Typeface>) -> Self {
        let mut block = Self {
            text: text.into(),
            font,
            text_color: Color::BLACK,
            text_opacity: 1.0,
            text_alpha: 255,
            source: DynamicImage::new_rgba8(0, 0),
            frame: Frame::default(),
        };
        block.regenerate();
        block
    }

    pub fn with_text_color(mut self, color: impl Into<ColorValue>) -> Result<Self> {
        self.set_text_color(color)?;
        Ok(self)
    }

    pub fn with_text_opacity(mut self, opacity: f64) -> Result<Self> {
        self.set_text_opacity(opacity)?;
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Arc<dyn Typeface> {
        &self.font
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn text_opacity(&self) -> f64 {
        self.text_opacity
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.regenerate();
    }

    pub fn set_font(&mut self, font: impl Typeface + 'static) {
        self.set_shared_font(Arc::new(font));
    }

    pub fn set_shared_font(&mut self, font: Arc<dyn Typeface>) {
        self.font = font;
        self.regenerate();
    }

    pub fn set_text_color(&mut self, color: impl Into<ColorValue>) -> Result<()> {
        self.text_color = Color::create(color)?;
        self.regenerate();
        Ok(())
    }

    pub fn set_text_opacity(&mut self, opacity: f64) -> Result<()> {
        self.text_alpha = color::alpha(opacity)?;
        self.text_opacity = opacity;
        self.regenerate();
        Ok(())
    }

    /// The rendered text before placement.
    pub fn source(&self) -> &DynamicImage {
        &self.source
    }

    pub fn source_size(&self) -> Size {
        canvas::size_of(&self.source)
    }

    pub fn element(&self) -> DynamicImage {
        self.frame.element(&self.source)
    }

    pub fn element_size(&self) -> Size {
        self.frame.element_size(self.source_size())
    }

    pub fn xy(&self) -> (i64, i64) {
        self.frame.xy(self.source_size())
    }

    pub fn image(&self) -> DynamicImage {
        self.frame.place(&self.source)
    }

    fn regenerate(&mut self) {
        let Color { red, green, blue } = self.text_color;
        let ink = Rgba([red, green, blue, self.text_alpha]);
        let raster = rasterize(&self.text, self.font.as_ref(), ink, self.frame.content_fill());
        self.source = DynamicImage::ImageRgba8(raster);
    }
}

impl Framed for TextBlock {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn frame_changed(&mut self) {
        self.regenerate();
    }
}

impl Visual for TextBlock {
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

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use image::Pixel;

    /// Monospace stand-in: every glyph is a `advance`-wide cell, drawn as a
    /// solid box from the ascent line to the baseline unless it is a space.
    #[derive(Copy, Clone, Debug)]
    pub(crate) struct BoxFace {
        pub advance: f32,
        pub ascent: f32,
        pub descent: f32,
    }

    impl Default for BoxFace {
        fn default() -> Self {
            Self {
                advance: 10.0,
                ascent: 8.0,
                descent: 2.0,
            }
        }
    }

    impl Typeface for BoxFace {
        fn line_metrics(&self) -> LineMetrics {
            LineMetrics {
                ascent: self.ascent,
                descent: self.descent,
            }
        }

        fn advance(&self, line: &str) -> f32 {
            line.chars().count() as f32 * self.advance
        }

        fn draw(&self, canvas: &mut RgbaImage, line: &str, x: f32, baseline: f32, color: Rgba<u8>) {
            for (i, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let left = (x + i as f32 * self.advance) as u32;
                let top = (baseline - self.ascent).max(0.0) as u32;
                for py in top..baseline as u32 {
                    for px in left..left + self.advance as u32 {
                        if px < canvas.width() && py < canvas.height() {
                            canvas.get_pixel_mut(px, py).blend(&color);
                        }
                    }
                }
            }
        }
    }
}
