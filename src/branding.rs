//! Brand color selection.
//!
//! Runs one extraction strategy with head-room, drops neutral colors, then
//! keeps only colors that can host legible text (WCAG AA, 4.5:1) against
//! their own black-or-white foreground, best contrast first.
//!
//! When that leaves fewer than two colors out of a palette that had at least
//! two candidates, the selection falls back to the non-neutral candidates
//! ranked by saturation. Only an image without a single non-neutral candidate
//! falls back to its neutral colors.

use rand::Rng;
use serde::Serialize;

use crate::algorithms::Algorithm;
use crate::color::{AA_NORMAL, Color, contrast_color, contrast_ratio, is_neutral, saturation};

/// Number of brand colors returned by default.
pub const DEFAULT_BRAND_COLORS: usize = 6;

/// Tuning knobs for [`select_with_rng`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandingOptions {
    /// Maximum number of colors returned.
    pub count: usize,
    /// Candidates requested from the algorithm per returned color.
    pub oversample: usize,
    /// Minimum contrast against the paired foreground.
    pub min_contrast: f64,
}

impl Default for BrandingOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_BRAND_COLORS,
            oversample: 2,
            min_contrast: AA_NORMAL,
        }
    }
}

impl BrandingOptions {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn candidate_count(&self) -> usize {
        self.count.saturating_mul(self.oversample.max(1))
    }
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSelection {
    pub colors: Vec<Color>,
    /// Set when the contrast filter left too few colors and the result was
    /// ranked by saturation instead. Fallback colors may miss the contrast
    /// threshold. They are neutral only when the image has no other colors.
    pub fallback: bool,
}

/// Select up to `count` brand colors with the default options.
///
/// K-Means runs off the thread RNG here; see [`select_with_rng`].
pub fn select_brand_colors(pixels: &[Color], algorithm: Algorithm, count: usize) -> Vec<Color> {
    select_with_rng(
        pixels,
        algorithm,
        &BrandingOptions::with_count(count),
        &mut rand::rng(),
    )
    .colors
}

pub fn select_with_rng<R: Rng + ?Sized>(
    pixels: &[Color],
    algorithm: Algorithm,
    options: &BrandingOptions,
    rng: &mut R,
) -> BrandSelection {
    if options.count == 0 {
        return BrandSelection {
            colors: Vec::new(),
            fallback: false,
        };
    }

    let candidates = algorithm.extract_with_rng(pixels, options.candidate_count(), rng);
    let vivid: Vec<Color> = candidates.iter().copied().filter(|&c| !is_neutral(c)).collect();

    let mut scored: Vec<(f64, Color)> = vivid
        .iter()
        .map(|&c| (contrast_ratio(c, contrast_color(c)), c))
        .filter(|&(ratio, _)| ratio >= options.min_contrast)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    tracing::debug!(
        %algorithm,
        candidates = candidates.len(),
        non_neutral = vivid.len(),
        legible = scored.len(),
        "filtered brand color candidates"
    );

    if scored.len() < 2 && candidates.len() >= 2 {
        let pool = if vivid.is_empty() { candidates } else { vivid };
        tracing::debug!(
            %algorithm,
            pool = pool.len(),
            "too few legible colors, ranking candidates by saturation"
        );
        return BrandSelection {
            colors: by_saturation(pool, options.count),
            fallback: true,
        };
    }

    BrandSelection {
        colors: scored
            .into_iter()
            .take(options.count)
            .map(|(_, color)| color)
            .collect(),
        fallback: false,
    }
}

/// Most saturated first; ties keep their incoming order.
fn by_saturation(mut colors: Vec<Color>, count: usize) -> Vec<Color> {
    colors.sort_by(|a, b| saturation(*b).total_cmp(&saturation(*a)));
    colors.truncate(count);
    colors
}
