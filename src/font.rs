//! TrueType/OpenType faces rasterized with `fontdue`.

use core::fmt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use image::{Pixel, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::text::{LineMetrics, Typeface};

/// A parsed font face at a fixed pixel size.
///
/// The parsed face is shared, so [`with_size`](Self::with_size) is cheap.
#[derive(Clone)]
pub struct FontdueFace {
    font: Arc<Font>,
    px: f32,
}

impl fmt::Debug for FontdueFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontdueFace")
            .field("name", &self.font.name())
            .field("px", &self.px)
            .finish()
    }
}

impl FontdueFace {
    /// Parse font bytes.
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::FontLoad(e.to_string()))?;
        Ok(Self {
            font: Arc::new(font),
            px,
        })
    }

    /// Read and parse a font file.
    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Self::from_bytes(&std::fs::read(path)?, px)
    }

    /// The same face at another size.
    pub fn with_size(&self, px: f32) -> Self {
        Self {
            font: Arc::clone(&self.font),
            px,
        }
    }

    pub fn px(&self) -> f32 {
        self.px
    }
}

impl Typeface for FontdueFace {
    fn line_metrics(&self) -> LineMetrics {
        match self.font.horizontal_line_metrics(self.px) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: -m.descent,
            },
            None => LineMetrics {
                ascent: self.px,
                descent: 0.0,
            },
        }
    }

    fn advance(&self, line: &str) -> f32 {
        let mut width = 0.0;
        let mut prev = None;
        for ch in line.chars() {
            if let Some(p) = prev {
                width += self.font.horizontal_kern(p, ch, self.px).unwrap_or(0.0);
            }
            width += self.font.metrics(ch, self.px).advance_width;
            prev = Some(ch);
        }
        width
    }

    fn draw(&self, canvas: &mut RgbaImage, line: &str, x: f32, baseline: f32, color: Rgba<u8>) {
        let (w, h) = (canvas.width() as i64, canvas.height() as i64);
        let mut pen = x;
        let mut prev = None;
        for ch in line.chars() {
            if let Some(p) = prev {
                pen += self.font.horizontal_kern(p, ch, self.px).unwrap_or(0.0);
            }
            let (m, coverage) = self.font.rasterize(ch, self.px);
            let left = (pen + m.xmin as f32).round() as i64;
            let top = (baseline - m.ymin as f32 - m.height as f32).round() as i64;
            for gy in 0..m.height {
                for gx in 0..m.width {
                    let cov = coverage[gy * m.width + gx];
                    if cov == 0 {
                        continue;
                    }
                    let (px, py) = (left + gx as i64, top + gy as i64);
                    if px < 0 || py < 0 || px >= w || py >= h {
                        continue;
                    }
                    let mut ink = color;
                    ink.0[3] = (color.0[3] as u16 * cov as u16 / 255) as u8;
                    canvas.get_pixel_mut(px as u32, py as u32).blend(&ink);
                }
            }
            pen += m.advance_width;
            prev = Some(ch);
        }
    }
}

/// Loads faces by name or path and keeps each parsed file.
///
/// Names without an extension get `.ttf`; relative names resolve against the
/// cache directory when one is set.
#[derive(Debug, Default)]
pub struct FontCache {
    dir: Option<PathBuf>,
    faces: HashMap<PathBuf, FontdueFace>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative names against `dir`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            faces: HashMap::new(),
        }
    }

    /// Load (or reuse) `name` at `px` pixels.
    pub fn get(&mut self, name: impl AsRef<Path>, px: f32) -> Result<FontdueFace> {
        let path = self.resolve(name.as_ref());
        if let Some(face) = self.faces.get(&path) {
            return Ok(face.with_size(px));
        }
        let face = FontdueFace::load(&path, px)?;
        tracing::debug!(path = %path.display(), "loaded font");
        self.faces.insert(path, face.clone());
        Ok(face)
    }

    /// Number of distinct files parsed so far.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    fn resolve(&self, name: &Path) -> PathBuf {
        let mut path = name.to_path_buf();
        if path.extension().is_none() {
            path.set_extension("ttf");
        }
        match &self.dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }
}
