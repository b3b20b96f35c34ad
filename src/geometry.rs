//! Placement geometry: how a source raster is sized and anchored inside a
//! block. Pure integer math, no pixel operations.
//!
//! # Example
//!
//! ```
//! use zenplate::{Anchor, Size, geometry};
//!
//! let container = Size::new(500, 500);
//! let element = geometry::fit_element(Size::new(1000, 500), container, true, true);
//! assert_eq!(element, Size::new(500, 250));
//!
//! let xy = geometry::anchor_offset(container, element, Anchor::CenterCenter);
//! assert_eq!(xy, (0, 125));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Width and height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// One of nine named anchor points inside a block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    CenterCenter,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// All anchors in reading order.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::CenterCenter,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The literal this anchor parses from, e.g. `"bottom-right"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::CenterCenter => "center-center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Fraction of free space placed before the element, in halves: 0, 1 or 2.
    const fn halves(self) -> (i64, i64) {
        match self {
            Self::TopLeft => (0, 0),
            Self::TopCenter => (1, 0),
            Self::TopRight => (2, 0),
            Self::CenterLeft => (0, 1),
            Self::CenterCenter => (1, 1),
            Self::CenterRight => (2, 1),
            Self::BottomLeft => (0, 2),
            Self::BottomCenter => (1, 2),
            Self::BottomRight => (2, 2),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::InvalidPosition(s.to_string()))
    }
}

/// Where an element sits inside its block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// A named anchor, resolved against the free space on every render.
    Anchor(Anchor),
    /// Explicit top-left offset, used verbatim. May be negative or past the edge.
    Offset(i64, i64),
}

impl Position {
    /// Parse one of the nine anchor literals.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse().map(Self::Anchor)
    }

    /// Top-left offset of `element` inside `container`.
    pub fn resolve(self, container: Size, element: Size) -> (i64, i64) {
        match self {
            Self::Anchor(a) => anchor_offset(container, element, a),
            Self::Offset(x, y) => (x, y),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::Anchor(Anchor::CenterCenter)
    }
}

impl From<Anchor> for Position {
    fn from(a: Anchor) -> Self {
        Self::Anchor(a)
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self::Offset(x, y)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Size of the element drawn for a `source` raster inside a `container`.
///
/// - `fit_block == false`: native size, even if it overflows.
/// - `keep_proportion == false`: stretched to the container.
/// - otherwise: shrunk to fit (never enlarged), aspect ratio preserved,
///   the derived side floored. A resized side is at least 1 px.
///
/// A source with a zero side is never resized.
pub fn fit_element(source: Size, container: Size, fit_block: bool, keep_proportion: bool) -> Size {
    if !fit_block {
        return source;
    }
    if !keep_proportion {
        return container;
    }
    if source.is_empty() {
        return source;
    }
    let wider = source.width > container.width;
    let higher = source.height > container.height;
    if !wider && !higher {
        return source;
    }
    let (w, h) = shrink_inside(source.width, source.height, container.width, container.height);
    Size::new(w, h)
}

/// Top-left offset for `element` at `anchor` inside `container`.
///
/// Free space is split as `{0, space/2, space}` per axis. It is negative
/// when the element overflows; halves truncate toward zero.
pub fn anchor_offset(container: Size, element: Size, anchor: Anchor) -> (i64, i64) {
    let x_space = container.width as i64 - element.width as i64;
    let y_space = container.height as i64 - element.height as i64;
    let (hx, hy) = anchor.halves();
    (x_space * hx / 2, y_space * hy / 2)
}

// ============================================================================
// Internal geometry
// ============================================================================

/// Largest size with the source aspect ratio that fits the container.
/// The binding axis matches the container; the other is floored.
fn shrink_inside(sw: u32, sh: u32, cw: u32, ch: u32) -> (u32, u32) {
    // Cross-multiplication picks the binding axis without float comparison.
    let width_binds = cw as u64 * sh as u64 <= ch as u64 * sw as u64;
    if width_binds {
        let h = (sh as u64 * cw as u64 / sw as u64) as u32;
        (cw, h.max(1))
    } else {
        let w = (sw as u64 * ch as u64 / sh as u64) as u32;
        (w.max(1), ch)
    }
}
