//! The [`Visual`] contract and the plain color-fill [`Block`].

use core::fmt;
use std::sync::{PoisonError, RwLock};

use image::{DynamicImage, Rgba};

use crate::canvas::{self, Mode};
use crate::color::{self, Color, ColorValue};
use crate::error::Result;
use crate::geometry::Size;

/// Default block size when nothing else determines it.
pub const DEFAULT_SIZE: Size = Size::new(500, 500);

/// Anything that occupies a rectangle and can paint itself.
///
/// Rendering is a pure function of the current state: nothing is cached, and
/// two renders of an unchanged tree are pixel-identical.
pub trait Visual: fmt::Debug + Send + Sync {
    /// Outer size, as seen by a parent container.
    fn size(&self) -> Size;

    /// Pixel mode of the rendered raster.
    fn mode(&self) -> Mode;

    /// Paint the full block.
    fn render(&self) -> Result<DynamicImage>;
}

/// A visual behind a lock can be shared as `Arc<RwLock<V>>` and still be
/// changed after it was placed: every parent reads the current value.
impl<V: Visual> Visual for RwLock<V> {
    fn size(&self) -> Size {
        self.read().unwrap_or_else(PoisonError::into_inner).size()
    }

    fn mode(&self) -> Mode {
        self.read().unwrap_or_else(PoisonError::into_inner).mode()
    }

    fn render(&self) -> Result<DynamicImage> {
        self.read().unwrap_or_else(PoisonError::into_inner).render()
    }
}

/// Background color with a validated opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Background {
    color: Color,
    opacity: f64,
    alpha: u8,
}

impl Background {
    /// Fails with `OutOfRange` unless `opacity` is within `0.0..=1.0`.
    pub fn new(color: Color, opacity: f64) -> Result<Self> {
        let alpha = color::alpha(opacity)?;
        Ok(Self {
            color,
            opacity,
            alpha,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Opacity as given, before rounding to an alpha byte.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// `#RRGGBBAA` of the color at this opacity.
    pub fn hex(&self) -> String {
        color::format_hex(self.color, self.alpha)
    }

    /// Fill pixel with the rounded alpha.
    pub fn rgba(&self) -> Rgba<u8> {
        let Color { red, green, blue } = self.color;
        Rgba([red, green, blue, self.alpha])
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        *self = Self::new(self.color, opacity)?;
        Ok(())
    }
}

impl Default for Background {
    /// Opaque white.
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            alpha: 255,
        }
    }
}

/// A rectangle filled with its background color.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    size: Size,
    background: Background,
    mode: Mode,
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

impl Block {
    /// 500×500, opaque white, RGBA.
    pub fn new() -> Self {
        Self {
            size: DEFAULT_SIZE,
            background: Background::default(),
            mode: Mode::Rgba,
        }
    }

    /// Replace the 500×500 default.
    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    /// Any [`ColorValue`]: a name, hex string, `Color` or RGB triple.
    pub fn with_background(mut self, color: impl Into<ColorValue>) -> Result<Self> {
        self.set_background_color(color)?;
        Ok(self)
    }

    /// Background opacity in `0.0..=1.0`.
    pub fn with_opacity(mut self, opacity: f64) -> Result<Self> {
        self.set_background_opacity(opacity)?;
        Ok(self)
    }

    /// Pixel mode of the rendered raster.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// `#RRGGBBAA` of the background.
    pub fn background_hex(&self) -> String {
        self.background.hex()
    }

    pub fn set_size(&mut self, size: impl Into<Size>) {
        self.size = size.into();
    }

    /// Change the width and keep the height.
    pub fn set_width(&mut self, width: u32) {
        self.size.width = width;
    }

    /// Change the height and keep the width.
    pub fn set_height(&mut self, height: u32) {
        self.size.height = height;
    }

    /// Fails with `InvalidFormat` or `UnsupportedType`; the old color stays.
    pub fn set_background_color(&mut self, color: impl Into<ColorValue>) -> Result<()> {
        self.background.set_color(Color::create(color)?);
        Ok(())
    }

    /// Fails with `OutOfRange`; the old opacity stays.
    pub fn set_background_opacity(&mut self, opacity: f64) -> Result<()> {
        self.background.set_opacity(opacity)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Same as [`Visual::render`]; a plain block cannot fail.
    pub fn image(&self) -> DynamicImage {
        canvas::blank(self.size, self.mode, self.background.rgba())
    }
}

impl Visual for Block {
    fn size(&self) -> Size {
        self.size
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn render(&self) -> Result<DynamicImage> {
        Ok(self.image())
    }
}
