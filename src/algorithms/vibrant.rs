//! Saturated colors, ranked by saturation times log-dampened frequency.
//!
//! The logarithm keeps a handful of oversaturated stray pixels from
//! outranking a large vibrant region.

use super::tally;
use crate::color::Color;

/// Colors at or below this saturation are ignored.
const MIN_SATURATION: f64 = 0.3;

pub fn extract(pixels: &[Color], count: usize) -> Vec<Color> {
    let mut scored: Vec<(f64, Color)> = tally(pixels)
        .into_iter()
        .filter(|s| s.saturation > MIN_SATURATION)
        .map(|s| (s.saturation * (s.count as f64 + 1.0).ln(), s.weighted()))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(count).map(|(_, color)| color).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_dull_colors() {
        let pixels = [Color::new(128, 128, 128), Color::new(200, 180, 170)];
        assert!(extract(&pixels, 4).is_empty());
    }

    #[test]
    fn frequency_is_log_dampened() {
        // 1.0 * ln 2 = 0.69 for the lone pure red;
        // 0.6 * ln 11 = 1.44 for the frequent, less saturated orange.
        let orange = Color::new(250, 150, 100);
        let mut pixels = vec![orange; 10];
        pixels.push(Color::new(255, 0, 0));
        let colors = extract(&pixels, 2);
        assert_eq!(colors, vec![orange.with_count(10), Color::new(255, 0, 0).with_count(1)]);
    }

    #[test]
    fn saturation_breaks_equal_frequency() {
        let pixels = [Color::new(200, 100, 100), Color::new(200, 0, 0)];
        let colors = extract(&pixels, 1);
        assert_eq!(colors, vec![Color::new(200, 0, 0).with_count(1)]);
    }
}
