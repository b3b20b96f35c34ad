//! RGB colors: hex (`#RGB`, `#RRGGBB`, `#RRGGBBAA`), a small table of named
//! colors, HSV conversion and opacity-aware hex serialization.

use core::fmt;
use core::str::FromStr;

use image::Rgba;

use crate::error::{Error, Result};

/// An opaque RGB color. Opacity is supplied where the color is used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build from wide integer channels, failing when any is outside `0..=255`.
    pub fn try_from_channels(red: i64, green: i64, blue: i64) -> Result<Self> {
        Ok(Self::new(
            channel("red", red)?,
            channel("green", green)?,
            channel("blue", blue)?,
        ))
    }

    /// Parse `RGB`, `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    ///
    /// Three-digit input expands each nibble (`f` → `ff`). The alpha pair of
    /// the eight-digit form is accepted and ignored, so the output of
    /// [`hex`](Self::hex) parses back to the same color.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        parse_hex(hex).ok_or_else(|| Error::InvalidFormat(s.to_string()))
    }

    /// Look up a named color (case-insensitive), falling back to hex.
    pub fn from_name(s: &str) -> Result<Self> {
        match lookup_named(s.trim()) {
            Some(c) => Ok(c),
            None => Self::from_hex(s),
        }
    }

    /// Hue in degrees, saturation and value in `0.0..=1.0`.
    ///
    /// Channels are truncated, not rounded, when scaled back to `0..=255`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&saturation) {
            return Err(Error::out_of_range("saturation", saturation, 0.0, 1.0));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::out_of_range("value", value, 0.0, 1.0));
        }
        let (r, g, b) = hsv_to_rgb((hue / 360.0).rem_euclid(1.0), saturation, value);
        Ok(Self::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        ))
    }

    /// Resolve any accepted color input.
    pub fn create(value: impl Into<ColorValue>) -> Result<Self> {
        match value.into() {
            ColorValue::Text(s) => Self::from_name(&s),
            ColorValue::Channels(c) => match c.as_slice() {
                &[r, g, b] => Self::try_from_channels(r, g, b),
                other => Err(Error::UnsupportedType(format!(
                    "expected 3 color channels, found {}",
                    other.len()
                ))),
            },
            ColorValue::Color(c) => Ok(c),
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Hue in degrees, saturation and value in `0.0..=1.0`.
    pub fn hsv(self) -> (f64, f64, f64) {
        let r = self.red as f64 / 255.0;
        let g = self.green as f64 / 255.0;
        let b = self.blue as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max == min {
            return (0.0, 0.0, max);
        }
        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        ((h / 6.0).rem_euclid(1.0) * 360.0, s, max)
    }

    /// `#RRGGBBAA`, with alpha `round(opacity * 255)`.
    pub fn hex(self, opacity: f64) -> Result<String> {
        Ok(format_hex(self, alpha(opacity)?))
    }

    /// Pixel value at the given opacity.
    pub fn to_rgba(self, opacity: f64) -> Result<Rgba<u8>> {
        Ok(Rgba([self.red, self.green, self.blue, alpha(opacity)?]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// Anything [`Color::create`] accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorValue {
    /// A color name or hex string.
    Text(String),
    /// An `(r, g, b)` sequence; length and range are checked on resolve.
    Channels(Vec<i64>),
    /// An already-built color.
    Color(Color),
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<i64>> for ColorValue {
    fn from(c: Vec<i64>) -> Self {
        Self::Channels(c)
    }
}

impl From<&[i64]> for ColorValue {
    fn from(c: &[i64]) -> Self {
        Self::Channels(c.to_vec())
    }
}

impl From<[u8; 3]> for ColorValue {
    fn from(c: [u8; 3]) -> Self {
        Self::Color(c.into())
    }
}

impl From<Color> for ColorValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

/// Opacity in `0.0..=1.0` to an 8-bit alpha.
pub(crate) fn alpha(opacity: f64) -> Result<u8> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(Error::out_of_range("opacity", opacity, 0.0, 1.0));
    }
    Ok((opacity * 255.0).round() as u8)
}

pub(crate) fn format_hex(c: Color, alpha: u8) -> String {
    format!("#{:02X}{:02X}{:02X}{:02X}", c.red, c.green, c.blue, alpha)
}

fn channel(what: &'static str, v: i64) -> Result<u8> {
    u8::try_from(v).map_err(|_| Error::out_of_range(what, v as f64, 0.0, 255.0))
}

/// `RGB`, `RRGGBB` or `RRGGBBAA` digits, alpha ignored.
fn parse_hex(hex: &str) -> Option<Color> {
    // from_str_radix accepts a leading sign, so vet the digits first.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digits: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex[..6].to_owned(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
}

fn lookup_named(name: &str) -> Option<Color> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by_key(&lower.as_str(), |&(n, _)| n)
        .ok()
        .map(|idx| Color::from(NAMED_COLORS[idx].1))
}

/// Named colors, sorted alphabetically for binary search.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("green", [0, 255, 0]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("red", [255, 0, 0]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_strictly_ascending() {
        // lookup_named binary-searches the table.
        assert!(NAMED_COLORS.windows(2).all(|pair| pair[0].0 < pair[1].0));
        for &(name, rgb) in NAMED_COLORS {
            assert_eq!(lookup_named(name), Some(Color::from(rgb)), "{name}");
        }
    }

    #[test]
    fn hex_3_digit() {
        assert_eq!(Color::from_hex("f00").unwrap(), Color::new(255, 0, 0));
    }

    #[test]
    fn hex_3_digit_with_hash() {
        assert_eq!(Color::from_hex("#0af").unwrap(), Color::new(0, 170, 255));
    }

    #[test]
    fn hex_6_digit() {
        assert_eq!(Color::from_hex("ff8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::new(255, 128, 0));
    }

    #[test]
    fn hex_8_digit_ignores_alpha() {
        assert_eq!(
            Color::from_hex("#12345600").unwrap(),
            Color::new(0x12, 0x34, 0x56)
        );
    }

    #[test]
    fn hex_invalid() {
        for bad in ["", "zzz", "#12345", "f008", "#ggg", "12 456"] {
            assert!(
                matches!(Color::from_hex(bad), Err(Error::InvalidFormat(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn named_color_case_insensitive() {
        assert_eq!(Color::from_name("Orange").unwrap(), Color::new(255, 165, 0));
        assert_eq!(Color::from_name("GREEN").unwrap(), Color::new(0, 255, 0));
    }

    #[test]
    fn named_falls_back_to_hex() {
        assert_eq!(Color::from_name("#00ff00").unwrap(), Color::new(0, 255, 0));
        assert!(matches!(
            Color::from_name("notacolor"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn hex_with_opacity() {
        let blue = Color::from_name("blue").unwrap();
        assert_eq!(blue.hex(1.0).unwrap(), "#0000FFFF");
        assert_eq!(blue.hex(0.0).unwrap(), "#0000FF00");
        assert_eq!(blue.hex(0.5).unwrap(), "#0000FF80");
    }

    #[test]
    fn hex_opacity_bounds() {
        let c = Color::WHITE;
        assert!(matches!(c.hex(-0.01), Err(Error::OutOfRange { .. })));
        assert!(matches!(c.hex(1.01), Err(Error::OutOfRange { .. })));
        assert!(c.hex(f64::NAN).is_err());
    }

    #[test]
    fn hex_round_trip_all_grays_and_primaries() {
        for v in (0..=255u8).step_by(17) {
            for c in [Color::new(v, 0, 0), Color::new(0, v, 0), Color::new(v, v, v)] {
                let hex = c.hex(1.0).unwrap();
                assert!(hex.ends_with("FF"), "{hex}");
                assert_eq!(Color::from_hex(&hex).unwrap(), c);
            }
        }
    }

    #[test]
    fn create_dispatch() {
        assert_eq!(Color::create("red").unwrap(), Color::new(255, 0, 0));
        assert_eq!(
            Color::create(vec![1i64, 2, 3]).unwrap(),
            Color::new(1, 2, 3)
        );
        assert_eq!(Color::create(Color::BLACK).unwrap(), Color::BLACK);
        assert_eq!(Color::create([9u8, 8, 7]).unwrap(), Color::new(9, 8, 7));
    }

    #[test]
    fn create_rejects_wrong_arity_and_range() {
        assert!(matches!(
            Color::create(vec![1i64, 2]),
            Err(Error::UnsupportedType(_))
        ));
        assert!(matches!(
            Color::create(vec![0i64, 256, 0]),
            Err(Error::OutOfRange { what: "green", .. })
        ));
        assert!(matches!(
            Color::create(vec![-1i64, 0, 0]),
            Err(Error::OutOfRange { what: "red", .. })
        ));
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0).unwrap(), Color::new(255, 0, 0));
        assert_eq!(
            Color::from_hsv(120.0, 1.0, 1.0).unwrap(),
            Color::new(0, 255, 0)
        );
        assert_eq!(
            Color::from_hsv(240.0, 1.0, 1.0).unwrap(),
            Color::new(0, 0, 255)
        );
        assert_eq!(Color::from_hsv(0.0, 0.0, 1.0).unwrap(), Color::WHITE);
    }

    #[test]
    fn hsv_of_color() {
        let (h, s, v) = Color::new(0, 0, 255).hsv();
        assert!((h - 240.0).abs() < 1e-9);
        assert_eq!((s, v), (1.0, 1.0));
        assert_eq!(Color::new(10, 10, 10).hsv().1, 0.0);
    }

    #[test]
    fn rgba_pixel() {
        let c = Color::new(1, 2, 3);
        assert_eq!(c.to_rgba(0.2).unwrap(), Rgba([1, 2, 3, 51]));
        assert_eq!(c.rgb(), (1, 2, 3));
        assert!(c.to_rgba(2.0).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Color::new(1, 2, 3).to_string(), "Color(1, 2, 3)");
    }
}
