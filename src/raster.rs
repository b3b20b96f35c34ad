//! Raster loading and encoding.
//!
//! Decoding and encoding are delegated to the `image` crate. The
//! [`RasterProvider`] trait is the seam for other sources (a remote
//! thumbnail service, an in-memory cache) that hand back decoded rasters.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat};

use crate::error::{Error, Result};

/// Where a raster comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterSource {
    /// A file on disk; format guessed from the extension, then the content.
    Path(PathBuf),
    /// Encoded bytes; format guessed from the content.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for RasterSource {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for RasterSource {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<Vec<u8>> for RasterSource {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

/// Produces decoded rasters.
pub trait RasterProvider {
    /// Fails with `NotFound` or `Decode`.
    fn load(&self, source: RasterSource) -> Result<DynamicImage>;
}

/// Decodes with the `image` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImageCrateRasters;

impl RasterProvider for ImageCrateRasters {
    fn load(&self, source: RasterSource) -> Result<DynamicImage> {
        match source {
            RasterSource::Path(path) => {
                if !path.is_file() {
                    return Err(Error::NotFound(path));
                }
                let reader = image::ImageReader::open(&path)?
                    .with_guessed_format()
                    .map_err(Error::Io)?;
                reader.decode().map_err(|e| decode_error(e, &path))
            }
            RasterSource::Bytes(bytes) => {
                image::load_from_memory(&bytes).map_err(Error::Decode)
            }
        }
    }
}

fn decode_error(e: ImageError, path: &Path) -> Error {
    match e {
        ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            Error::NotFound(path.to_path_buf())
        }
        other => Error::Decode(other),
    }
}

/// Encode a raster as PNG.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(out.into_inner())
}

/// Write a raster to `path`, format chosen by the extension.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path).map_err(Error::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn png_bytes_round_trip() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 6])));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let back = ImageCrateRasters.load(RasterSource::Bytes(bytes)).unwrap();
        assert_eq!(back.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let r = ImageCrateRasters.load(RasterSource::Bytes(b"not an image".to_vec()));
        assert!(matches!(r, Err(Error::Decode(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let r = ImageCrateRasters.load(RasterSource::Path("/definitely/not/here.png".into()));
        assert!(matches!(r, Err(Error::NotFound(_))));
    }
}
