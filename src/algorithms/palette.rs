//! Balanced palette: one pick per category, then fill by frequency.
//!
//! Categories, in order: most frequent overall, most saturated (> 0.4), most
//! frequent light color (luminance > 0.7), most frequent dark color
//! (luminance < 0.3). A category with no member is skipped and a color is
//! never picked twice.

use super::{ColorStats, sort_by_count, tally};
use crate::color::Color;

const VIBRANT_SATURATION: f64 = 0.4;
const LIGHT_LUMINANCE: f64 = 0.7;
const DARK_LUMINANCE: f64 = 0.3;

pub fn extract(pixels: &[Color], count: usize) -> Vec<Color> {
    let mut stats = tally(pixels);
    // Every lookup below scans in frequency order, so ties in a category
    // resolve to the more frequent color.
    sort_by_count(&mut stats);

    let most_saturated = stats
        .iter()
        .filter(|s| s.saturation > VIBRANT_SATURATION)
        .fold(None::<&ColorStats>, |best, s| match best {
            Some(b) if b.saturation >= s.saturation => Some(b),
            _ => Some(s),
        });

    let picks = [
        stats.first(),
        most_saturated,
        stats.iter().find(|s| s.luminance > LIGHT_LUMINANCE),
        stats.iter().find(|s| s.luminance < DARK_LUMINANCE),
    ];

    let mut palette: Vec<Color> = Vec::with_capacity(count);
    for pick in picks.into_iter().flatten() {
        push_unique(&mut palette, pick);
    }
    for s in &stats {
        if palette.len() >= count {
            break;
        }
        push_unique(&mut palette, s);
    }

    palette.truncate(count);
    palette
}

fn push_unique(palette: &mut Vec<Color>, stats: &ColorStats) {
    if !palette.iter().any(|c| c.same_color(&stats.color)) {
        palette.push(stats.weighted());
    }
}
