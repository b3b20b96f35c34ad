//! Error type shared by every composition step.

use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::Mode;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Composition error.
///
/// Validation errors are raised where the bad value enters (construction or
/// a setter). Geometry is resolved again on every render, so a render can
/// still fail when a tree was mutated into an invalid combination.
#[derive(Debug, Error)]
pub enum Error {
    /// A color string is neither a known name nor a hex triple.
    #[error("invalid color format: {0:?}")]
    InvalidFormat(String),

    /// A numeric value is outside its allowed range.
    #[error("{what} must be between {min} and {max}, found {value}")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A dispatcher received a value it cannot interpret.
    #[error("unsupported value: {0}")]
    UnsupportedType(String),

    /// A named position is not one of the nine anchors.
    #[error("position {0:?} not in [top|center|bottom]-[left|center|right]")]
    InvalidPosition(String),

    /// A strip orientation is neither `horizontal` nor `vertical`.
    #[error("invalid orientation {0:?}")]
    InvalidOrientation(String),

    /// Children of one container disagree on pixel mode.
    #[error("all blocks must have the same mode: expected {expected}, found {found}")]
    InconsistentMode { expected: Mode, found: Mode },

    /// A raster or font file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A raster could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[source] image::ImageError),

    /// A raster could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(#[source] image::ImageError),

    /// Reading or writing a file failed for a reason other than absence.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Font bytes were rejected by the rasterizer.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// A collection grid was given neither columns, rows nor cell size.
    #[error("at least one of n_columns, n_rows or image_dimensions is required")]
    MissingGridShape,
}

impl Error {
    pub(crate) fn out_of_range(what: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }
}
