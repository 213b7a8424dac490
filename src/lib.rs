//! Brand color extraction for application branding metadata.
//!
//! Samples a decoded image, summarizes the sample with one of six palette
//! strategies, keeps the colors that can carry legible text and recommends a
//! light-theme and a dark-theme brand color with matching foregrounds.
//!
//! The engine is pure and synchronous. The `wasm-bindgen` entry points below
//! are the browser-facing boundary; [`analyze_bytes`] is the native
//! equivalent used by the `brandcolors` CLI.

pub mod algorithms;
pub mod analysis;
pub mod branding;
pub mod color;
pub mod error;
pub mod sample;
pub mod theme;

pub use algorithms::{ALGORITHMS, Algorithm, AlgorithmInfo};
pub use analysis::{Analysis, AnalysisOptions, analyze, analyze_with_rng};
pub use branding::{BrandSelection, BrandingOptions, select_brand_colors, select_with_rng};
pub use color::{Color, ContrastLevel, ContrastRating, Oklch};
pub use error::{BrandingError, ParseColorError};
pub use sample::{PixelBuffer, average_color, sample_pixels};
pub use theme::{IconContrast, ThemeColor, ThemeRecommendation, icon_contrast, recommend_themes};

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::color::{oklch_to_rgb, rgb_to_oklch};

/// Decode an encoded image (PNG, JPEG, ...) into RGBA8.
fn decode_rgba(input: &[u8]) -> Result<(u32, u32, Vec<u8>), BrandingError> {
    let rgba = image::load_from_memory(input)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}

// ------------------------------------------------------------
// JS object builders
// ------------------------------------------------------------

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn set(target: &Object, key: &str, value: impl AsRef<JsValue>) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value.as_ref()).map(|_| ())
}

fn color_js(color: &Color) -> Result<Object, JsValue> {
    let obj = Object::new();
    set(&obj, "r", JsValue::from(color.r))?;
    set(&obj, "g", JsValue::from(color.g))?;
    set(&obj, "b", JsValue::from(color.b))?;
    set(&obj, "hex", JsValue::from_str(&color.hex()))?;
    if let Some(count) = color.count {
        set(&obj, "count", JsValue::from(count))?;
    }
    Ok(obj)
}

fn rating_js(rating: &ContrastRating) -> Result<Object, JsValue> {
    let level = |l: ContrastLevel| -> Result<Object, JsValue> {
        let obj = Object::new();
        set(&obj, "normal", JsValue::from_bool(l.normal))?;
        set(&obj, "large", JsValue::from_bool(l.large))?;
        Ok(obj)
    };
    let obj = Object::new();
    set(&obj, "aa", level(rating.aa())?)?;
    set(&obj, "aaa", level(rating.aaa())?)?;
    Ok(obj)
}

fn theme_js(theme: &ThemeColor) -> Result<Object, JsValue> {
    let obj = Object::new();
    set(&obj, "background", color_js(&theme.background)?)?;
    set(&obj, "foreground", color_js(&theme.foreground)?)?;
    set(&obj, "contrastRatio", JsValue::from_f64(theme.contrast_ratio))?;
    set(&obj, "rating", rating_js(&theme.rating)?)?;
    Ok(obj)
}

fn analysis_js(analysis: &Analysis) -> Result<Object, JsValue> {
    let colors = Array::new();
    for color in &analysis.colors {
        colors.push(&color_js(color)?.into());
    }

    let result = Object::new();
    set(&result, "algorithm", JsValue::from_str(analysis.algorithm.id()))?;
    set(&result, "sampled", JsValue::from(analysis.sampled))?;
    set(&result, "colors", colors)?;
    set(&result, "fallback", JsValue::from_bool(analysis.fallback))?;
    match &analysis.themes {
        Some(themes) => {
            set(&result, "light", theme_js(&themes.light)?)?;
            set(&result, "dark", theme_js(&themes.dark)?)?;
            set(&result, "brandingXml", JsValue::from_str(&themes.appstream_xml()))?;
        }
        None => {
            set(&result, "light", JsValue::NULL)?;
            set(&result, "dark", JsValue::NULL)?;
            set(&result, "brandingXml", JsValue::NULL)?;
        }
    }
    Ok(result)
}

fn analysis_options(algorithm: &str, count: Option<usize>) -> Result<AnalysisOptions, JsValue> {
    let algorithm: Algorithm = algorithm.parse().map_err(js_error)?;
    let defaults = AnalysisOptions::default();
    Ok(AnalysisOptions {
        algorithm,
        count: count.unwrap_or(defaults.count),
        ..defaults
    })
}

// ------------------------------------------------------------
// Browser entry points
// ------------------------------------------------------------

/// Analyze an encoded image file.
///
/// Returns `{ algorithm, sampled, colors, fallback, light, dark, brandingXml }`
/// where `light`/`dark` are `{ background, foreground, contrastRatio, rating }`
/// or `null` when no brand color was found.
#[wasm_bindgen]
pub fn analyze_image(input: Vec<u8>, algorithm: &str, count: Option<usize>) -> Result<Object, JsValue> {
    let options = analysis_options(algorithm, count)?;
    let (width, height, raw) = decode_rgba(&input).map_err(js_error)?;
    let buffer = PixelBuffer::new(width, height, &raw).map_err(js_error)?;
    analysis_js(&analyze(&buffer, &options))
}

/// Analyze raw RGBA bytes, e.g. a canvas `ImageData.data`.
#[wasm_bindgen]
pub fn analyze_pixels(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    algorithm: &str,
    count: Option<usize>,
) -> Result<Object, JsValue> {
    let options = analysis_options(algorithm, count)?;
    let buffer = PixelBuffer::new(width, height, &rgba).map_err(js_error)?;
    analysis_js(&analyze(&buffer, &options))
}

/// `[{ id, name, description }]` for every strategy, in display order.
#[wasm_bindgen]
pub fn algorithms() -> Result<Array, JsValue> {
    let list = Array::new();
    for info in &ALGORITHMS {
        let obj = Object::new();
        set(&obj, "id", JsValue::from_str(info.id.id()))?;
        set(&obj, "name", JsValue::from_str(info.name))?;
        set(&obj, "description", JsValue::from_str(info.description))?;
        list.push(&obj);
    }
    Ok(list)
}

/// `{ l, c, h }` for a hex color.
#[wasm_bindgen]
pub fn hex_to_oklch(hex: &str) -> Result<Object, JsValue> {
    let color: Color = hex.parse().map_err(js_error)?;
    let lch = rgb_to_oklch(color);
    let obj = Object::new();
    set(&obj, "l", JsValue::from_f64(lch.l))?;
    set(&obj, "c", JsValue::from_f64(lch.c))?;
    set(&obj, "h", JsValue::from_f64(lch.h))?;
    Ok(obj)
}

/// Hex color for OKLCH coordinates, clamped into sRGB.
#[wasm_bindgen]
pub fn oklch_to_hex(l: f64, c: f64, h: f64) -> String {
    oklch_to_rgb(Oklch::new(l, c, h)).hex()
}

/// Best black-or-white foreground for a hand-picked background.
#[wasm_bindgen]
pub fn theme_for_background(hex: &str) -> Result<Object, JsValue> {
    theme_js(&theme_for_hex(hex).map_err(js_error)?)
}

/// `{ average, contrastRatio, rating }` for an encoded icon against a
/// background, or `null` when the icon is fully transparent.
#[wasm_bindgen]
pub fn icon_contrast_for_image(input: Vec<u8>, background: &str) -> Result<JsValue, JsValue> {
    match icon_contrast_bytes(&input, background).map_err(js_error)? {
        Some(result) => {
            let obj = Object::new();
            set(&obj, "average", color_js(&result.average)?)?;
            set(&obj, "contrastRatio", JsValue::from_f64(result.contrast_ratio))?;
            set(&obj, "rating", rating_js(&result.rating)?)?;
            Ok(obj.into())
        }
        None => Ok(JsValue::NULL),
    }
}

// ------------------------------------------------------------
// Native entry points
// ------------------------------------------------------------

/// [`ThemeColor`] for a background given as hex.
pub fn theme_for_hex(hex: &str) -> Result<ThemeColor, BrandingError> {
    let background: Color = hex.parse()?;
    Ok(ThemeColor::for_background(background))
}

/// Contrast of an encoded icon's average opaque color against a hex
/// `background`.
pub fn icon_contrast_bytes(
    input: &[u8],
    background: &str,
) -> Result<Option<IconContrast>, BrandingError> {
    let background: Color = background.parse()?;
    let (width, height, raw) = decode_rgba(input)?;
    let buffer = PixelBuffer::new(width, height, &raw)?;
    let opaque = sample_pixels(&buffer, buffer.pixel_count());
    Ok(icon_contrast(&opaque, background))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn analyze_bytes(input: &[u8], options: &AnalysisOptions) -> Result<Analysis, BrandingError> {
    analyze_bytes_with_rng(input, options, &mut rand::rng())
}

/// Like [`analyze_bytes`], with K-Means seeded from `rng`.
#[cfg(not(target_arch = "wasm32"))]
pub fn analyze_bytes_with_rng<R: rand::Rng + ?Sized>(
    input: &[u8],
    options: &AnalysisOptions,
    rng: &mut R,
) -> Result<Analysis, BrandingError> {
    let (width, height, raw) = decode_rgba(input)?;
    let buffer = PixelBuffer::new(width, height, &raw)?;
    Ok(analyze_with_rng(&buffer, options, rng))
}
