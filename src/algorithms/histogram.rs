//! Coarse 16x16x16 RGB histogram, one mean color per occupied bin.

use crate::color::Color;

/// Channel values per bin.
const BIN_SIZE: u8 = 16;
const BINS_PER_CHANNEL: usize = 256 / BIN_SIZE as usize;

#[derive(Debug, Clone, Copy, Default)]
struct Bin {
    r: u64,
    g: u64,
    b: u64,
    count: usize,
}

impl Bin {
    fn add(&mut self, px: Color) {
        self.r += u64::from(px.r);
        self.g += u64::from(px.g);
        self.b += u64::from(px.b);
        self.count += 1;
    }

    fn mean(&self) -> Color {
        let n = self.count as f64;
        Color::from_rgb_f64(self.r as f64 / n, self.g as f64 / n, self.b as f64 / n)
            .with_count(self.count)
    }
}

#[inline]
fn bin_index(px: Color) -> usize {
    let q = |v: u8| usize::from(v / BIN_SIZE);
    (q(px.r) * BINS_PER_CHANNEL + q(px.g)) * BINS_PER_CHANNEL + q(px.b)
}

pub fn extract(pixels: &[Color], count: usize) -> Vec<Color> {
    // Slot per cell pointing into `bins`, which stays in first-seen order.
    let mut slots: Vec<Option<usize>> = vec![None; BINS_PER_CHANNEL.pow(3)];
    let mut bins: Vec<Bin> = Vec::new();

    for &px in pixels {
        let cell = bin_index(px);
        let slot = match slots[cell] {
            Some(slot) => slot,
            None => {
                bins.push(Bin::default());
                slots[cell] = Some(bins.len() - 1);
                bins.len() - 1
            }
        };
        bins[slot].add(px);
    }

    bins.sort_by(|a, b| b.count.cmp(&a.count));
    bins.iter().take(count).map(Bin::mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn averages_within_a_bin() {
        // 0..=15 share a bin on every channel.
        let pixels = [Color::new(0, 0, 0), Color::new(15, 15, 15), Color::new(200, 0, 0)];
        let colors = extract(&pixels, 4);
        assert_eq!(
            colors,
            vec![Color::new(8, 8, 8).with_count(2), Color::new(200, 0, 0).with_count(1)]
        );
    }

    #[test]
    fn neighbouring_bins_stay_apart() {
        let pixels = [Color::new(15, 0, 0), Color::new(16, 0, 0)];
        assert_eq!(extract(&pixels, 4).len(), 2);
    }

    #[test]
    fn bin_index_covers_all_cells() {
        assert_eq!(bin_index(Color::BLACK), 0);
        assert_eq!(bin_index(Color::WHITE), 4095);
    }
}
