//! Blank rasters and pasting one raster onto another.
//!
//! Every container paints into a canvas made here. Two pixel modes exist:
//! [`Mode::Rgba`] keeps alpha and composites source-over, [`Mode::Rgb`]
//! drops alpha and replaces destination pixels.

use core::fmt;
use core::str::FromStr;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage, imageops};

use crate::error::{Error, Result};
use crate::geometry::Size;

/// Pixel format of a canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// 8-bit RGB with alpha.
    #[default]
    Rgba,
    /// 8-bit RGB, alpha ignored.
    Rgb,
}

impl Mode {
    /// Mode of an existing raster. Anything without an alpha channel is RGB.
    pub fn of(image: &DynamicImage) -> Self {
        if image.color().has_alpha() {
            Self::Rgba
        } else {
            Self::Rgb
        }
    }

    /// Convert a raster into this mode (no-op when it already matches).
    pub fn convert(self, image: &DynamicImage) -> DynamicImage {
        match (self, image) {
            (Self::Rgba, DynamicImage::ImageRgba8(_)) | (Self::Rgb, DynamicImage::ImageRgb8(_)) => {
                image.clone()
            }
            (Self::Rgba, _) => DynamicImage::ImageRgba8(image.to_rgba8()),
            (Self::Rgb, _) => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rgba => "RGBA",
            Self::Rgb => "RGB",
        })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("rgba") {
            Ok(Self::Rgba)
        } else if s.eq_ignore_ascii_case("rgb") {
            Ok(Self::Rgb)
        } else {
            Err(Error::UnsupportedType(format!("pixel mode {s:?}")))
        }
    }
}

/// A canvas of `size` filled with `fill`. RGB canvases drop the fill's alpha.
pub fn blank(size: Size, mode: Mode, fill: Rgba<u8>) -> DynamicImage {
    match mode {
        Mode::Rgba => {
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(size.width, size.height, fill))
        }
        Mode::Rgb => {
            let [r, g, b, _] = fill.0;
            DynamicImage::ImageRgb8(RgbImage::from_pixel(size.width, size.height, Rgb([r, g, b])))
        }
    }
}

/// Paint `src` onto `dst` with its top-left corner at `xy`.
///
/// `src` is converted to the destination mode first. Offsets may be negative
/// or past the far edge; whatever falls outside `dst` is clipped.
pub fn paste(dst: &mut DynamicImage, src: &DynamicImage, xy: (i64, i64)) {
    let (x, y) = xy;
    match dst {
        DynamicImage::ImageRgba8(bottom) => {
            let converted;
            let top = match src {
                DynamicImage::ImageRgba8(top) => top,
                other => {
                    converted = other.to_rgba8();
                    &converted
                }
            };
            imageops::overlay(bottom, top, x, y);
        }
        DynamicImage::ImageRgb8(bottom) => {
            let converted;
            let top = match src {
                DynamicImage::ImageRgb8(top) => top,
                other => {
                    converted = other.to_rgb8();
                    &converted
                }
            };
            imageops::replace(bottom, top, x, y);
        }
        other => {
            // Foreign destination formats are normalized to RGBA once.
            let mut bottom = other.to_rgba8();
            imageops::overlay(&mut bottom, &src.to_rgba8(), x, y);
            *other = DynamicImage::ImageRgba8(bottom);
        }
    }
}

/// Size of a raster.
pub fn size_of(image: &DynamicImage) -> Size {
    Size::new(image.width(), image.height())
}
