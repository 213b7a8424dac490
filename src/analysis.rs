//! One-shot analysis: sample a decoded image, select brand colors and
//! recommend light/dark themes.

use rand::Rng;
use serde::Serialize;

use crate::algorithms::Algorithm;
use crate::branding::{BrandingOptions, DEFAULT_BRAND_COLORS, select_with_rng};
use crate::color::Color;
use crate::sample::{DEFAULT_SAMPLE_SIZE, PixelBuffer, sample_pixels};
use crate::theme::{ThemeRecommendation, recommend_themes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub algorithm: Algorithm,
    /// Maximum number of brand colors.
    pub count: usize,
    /// Upper bound on sampled pixels.
    pub sample_size: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Vibrant,
            count: DEFAULT_BRAND_COLORS,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub algorithm: Algorithm,
    /// Opaque pixels that made it into the sample.
    pub sampled: usize,
    pub colors: Vec<Color>,
    pub fallback: bool,
    /// `None` when no brand color was found.
    pub themes: Option<ThemeRecommendation>,
}

pub fn analyze(buffer: &PixelBuffer<'_>, options: &AnalysisOptions) -> Analysis {
    analyze_with_rng(buffer, options, &mut rand::rng())
}

pub fn analyze_with_rng<R: Rng + ?Sized>(
    buffer: &PixelBuffer<'_>,
    options: &AnalysisOptions,
    rng: &mut R,
) -> Analysis {
    let pixels = sample_pixels(buffer, options.sample_size);
    let selection = select_with_rng(
        &pixels,
        options.algorithm,
        &BrandingOptions::with_count(options.count),
        rng,
    );
    // An empty palette is the only failure mode here.
    let themes = recommend_themes(&selection.colors).ok();

    tracing::debug!(
        algorithm = %options.algorithm,
        sampled = pixels.len(),
        colors = selection.colors.len(),
        fallback = selection.fallback,
        "analysis finished"
    );

    Analysis {
        algorithm: options.algorithm,
        sampled: pixels.len(),
        colors: selection.colors,
        fallback: selection.fallback,
        themes,
    }
}
