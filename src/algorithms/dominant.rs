//! Most frequent exact colors.

use super::{sort_by_count, tally};
use crate::color::Color;

pub fn extract(pixels: &[Color], count: usize) -> Vec<Color> {
    let mut stats = tally(pixels);
    sort_by_count(&mut stats);
    stats.iter().take(count).map(|s| s.weighted()).collect()
}
