//! Color math shared by every extraction strategy.
//!
//! Covers hex encoding, WCAG 2.0 relative luminance and contrast, an HSV-style
//! saturation measure used to spot neutral colors, and the OKLCH round trip
//! used when editing a brand color by hand.
//!
//! All functions are pure and operate on 8-bit sRGB [`Color`] values.

use std::fmt;
use std::str::FromStr;

use palette::convert::IntoColorUnclamped;
use palette::{LinSrgb, Srgb};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use crate::error::ParseColorError;

/// Saturation below this is treated as gray.
const NEUTRAL_SATURATION: f64 = 0.15;
/// Luminance above this is treated as near-white.
const NEUTRAL_LIGHT: f64 = 0.9;
/// Luminance below this is treated as near-black.
const NEUTRAL_DARK: f64 = 0.1;

/// Minimum contrast for normal text at WCAG AA.
pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;
pub const AAA_LARGE: f64 = 4.5;

/// An 8-bit sRGB color, optionally weighted by the number of source pixels
/// it stands for.
///
/// Identity is the `(r, g, b)` triple, i.e. the canonical hex string. `count`
/// is a frequency weight attached by the extraction algorithms and is not part
/// of what makes two colors "the same"; compare with [`Color::same_color`] or
/// [`Color::key`]. The derived `==` and `Hash` are structural and include the
/// weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub count: Option<usize>,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, count: None }
    }

    /// Same color, carrying a pixel weight.
    #[inline]
    pub const fn with_count(self, count: usize) -> Self {
        Self {
            count: Some(count),
            ..self
        }
    }

    /// Same color with the weight stripped.
    #[inline]
    pub const fn without_count(self) -> Self {
        Self { count: None, ..self }
    }

    /// Build a color from floating-point channel means, rounding half up and
    /// clamping to `0..=255`.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        Self::new(round_channel(r), round_channel(g), round_channel(b))
    }

    /// Canonical lowercase `#rrggbb` encoding.
    pub fn hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// Packed `0xRRGGBB` identity. Two colors share a key iff their hex
    /// strings match.
    #[inline]
    pub const fn key(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Inverse of [`Color::key`]; bits above `0xFFFFFF` are ignored.
    #[inline]
    pub const fn from_key(key: u32) -> Self {
        Self::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
    }

    /// Same hex, regardless of weight.
    #[inline]
    pub const fn same_color(&self, other: &Color) -> bool {
        self.key() == other.key()
    }

    /// Pixel weight, treating an unweighted color as a single pixel.
    #[inline]
    pub fn weight(&self) -> usize {
        self.count.unwrap_or(1)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        let value = digits.chars().try_fold(0u32, |acc, c| {
            c.to_digit(16)
                .map(|d| (acc << 4) | d)
                .ok_or(ParseColorError::InvalidDigit(c))
        })?;
        if digits.len() != 6 {
            return Err(ParseColorError::InvalidLength(digits.len()));
        }
        Ok(Color::from_key(value))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.count.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("Color", fields)?;
        state.serialize_field("r", &self.r)?;
        state.serialize_field("g", &self.g)?;
        state.serialize_field("b", &self.b)?;
        state.serialize_field("hex", &self.hex())?;
        match self.count {
            Some(count) => state.serialize_field("count", &count)?,
            None => state.skip_field("count")?,
        }
        state.end()
    }
}

/// A color in OKLCH: lightness `l` in `[0, 1]`, chroma `c` (roughly
/// `0..0.4` for sRGB colors) and hue `h` in degrees, `[0, 360)`.
///
/// Never stored on its own; always derived from, or converted back to, a
/// [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

/// Pass/fail flags for one WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContrastLevel {
    pub normal: bool,
    pub large: bool,
}

/// WCAG AA/AAA verdicts for a contrast ratio. Only obtainable through
/// [`ContrastRating::from_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContrastRating {
    aa: ContrastLevel,
    aaa: ContrastLevel,
}

impl ContrastRating {
    pub fn from_ratio(ratio: f64) -> Self {
        Self {
            aa: ContrastLevel {
                normal: ratio >= AA_NORMAL,
                large: ratio >= AA_LARGE,
            },
            aaa: ContrastLevel {
                normal: ratio >= AAA_NORMAL,
                large: ratio >= AAA_LARGE,
            },
        }
    }

    pub fn aa(&self) -> ContrastLevel {
        self.aa
    }

    pub fn aaa(&self) -> ContrastLevel {
        self.aaa
    }
}

/// Round half up and clamp into the 8-bit channel range.
#[inline]
pub(crate) fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Encode channels as lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse a hex color, returning `None` on malformed input.
///
/// Use `str::parse::<Color>()` to learn why a string was rejected.
pub fn hex_to_rgb(hex: &str) -> Option<Color> {
    hex.parse().ok()
}

/// Euclidean distance in raw 0-255 RGB. A clustering heuristic, not a
/// perceptual metric.
pub fn color_distance(a: Color, b: Color) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// WCAG 2.0 sRGB decoding of one channel.
#[inline]
fn channel_to_linear(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.039_28 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
pub fn luminance(color: Color) -> f64 {
    0.2126 * channel_to_linear(color.r)
        + 0.7152 * channel_to_linear(color.g)
        + 0.0722 * channel_to_linear(color.b)
}

/// `(max - min) / max` over normalized channels; `0` for black.
pub fn saturation(color: Color) -> f64 {
    let max = color.r.max(color.g).max(color.b);
    let min = color.r.min(color.g).min(color.b);
    if max == 0 {
        return 0.0;
    }
    f64::from(max - min) / f64::from(max)
}

/// Gray, near-white, or near-black: not usable as a brand color.
pub fn is_neutral(color: Color) -> bool {
    let lum = luminance(color);
    saturation(color) < NEUTRAL_SATURATION || lum > NEUTRAL_LIGHT || lum < NEUTRAL_DARK
}

/// WCAG contrast ratio, always `>= 1`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_rating(ratio: f64) -> ContrastRating {
    ContrastRating::from_ratio(ratio)
}

/// Pick black or white text for `background` from its perceived brightness
/// `(299R + 587G + 114B) / 1000`.
///
/// Cheaper than comparing two contrast ratios and close enough for choosing
/// a legible foreground.
pub fn contrast_color(background: Color) -> Color {
    let weighted = 299 * u32::from(background.r)
        + 587 * u32::from(background.g)
        + 114 * u32::from(background.b);
    let brightness = f64::from(weighted) / 1000.0;
    if brightness > 125.0 {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// sRGB -> linear -> LMS -> OKLab -> OKLCH.
pub fn rgb_to_oklch(color: Color) -> Oklch {
    let linear: LinSrgb<f64> = Srgb::new(color.r, color.g, color.b)
        .into_format::<f64>()
        .into_linear();
    let lch: palette::Oklch<f64> = linear.into_color_unclamped();
    Oklch {
        l: lch.l,
        c: lch.chroma,
        h: lch.hue.into_positive_degrees(),
    }
}

/// Inverse of [`rgb_to_oklch`]. Out-of-gamut inputs clamp per channel.
pub fn oklch_to_rgb(oklch: Oklch) -> Color {
    let lch = palette::Oklch::new(oklch.l, oklch.c, oklch.h);
    let linear: LinSrgb<f64> = lch.into_color_unclamped();
    let rgb: Srgb<f64> = Srgb::from_linear(linear);
    Color::from_rgb_f64(rgb.red * 255.0, rgb.green * 255.0, rgb.blue * 255.0)
}
