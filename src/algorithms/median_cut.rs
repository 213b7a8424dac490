//! Median cut quantization.
//!
//! Starts from one box holding every pixel and keeps splitting the box with
//! the widest single-channel range at its median until `2^depth` boxes exist
//! or every box is a single color. Each box then collapses to its mean.

use crate::color::Color;

/// Deepest split honoured; `2^16` boxes is already far beyond any sample.
const MAX_DEPTH: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    #[inline]
    fn of(self, px: &Color) -> u8 {
        match self {
            Channel::Red => px.r,
            Channel::Green => px.g,
            Channel::Blue => px.b,
        }
    }
}

#[derive(Debug, Clone)]
struct ColorBox {
    pixels: Vec<Color>,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    /// `pixels` must not be empty.
    fn new(pixels: Vec<Color>) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for px in &pixels {
            for (i, v) in [px.r, px.g, px.b].into_iter().enumerate() {
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }
        Self { pixels, min, max }
    }

    fn range(&self, channel: Channel) -> u8 {
        let i = channel as usize;
        self.max[i] - self.min[i]
    }

    fn widest_range(&self) -> u8 {
        self.range(Channel::Red)
            .max(self.range(Channel::Green))
            .max(self.range(Channel::Blue))
    }

    /// Channel to cut along. Green wins ties, then blue.
    fn split_channel(&self) -> Channel {
        let (r, g, b) = (
            self.range(Channel::Red),
            self.range(Channel::Green),
            self.range(Channel::Blue),
        );
        if g >= r && g >= b {
            Channel::Green
        } else if b >= r {
            Channel::Blue
        } else {
            Channel::Red
        }
    }

    /// Split at the median. Only called on boxes with a non-zero range, which
    /// hold at least two pixels, so both halves are non-empty.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let channel = self.split_channel();
        self.pixels.sort_by_key(|px| channel.of(px));
        let upper = self.pixels.split_off(self.pixels.len() / 2);
        (ColorBox::new(self.pixels), ColorBox::new(upper))
    }

    fn mean(&self) -> Color {
        let (r, g, b) = self.pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), px| {
            (r + u64::from(px.r), g + u64::from(px.g), b + u64::from(px.b))
        });
        let n = self.pixels.len() as f64;
        Color::from_rgb_f64(r as f64 / n, g as f64 / n, b as f64 / n).with_count(self.pixels.len())
    }
}

/// Smallest depth whose box budget covers `count` colors.
pub fn depth_for(count: usize) -> u32 {
    count.max(1).next_power_of_two().trailing_zeros()
}

/// Quantize to at most `2^depth` colors, heaviest first.
///
/// `depth` controls the split budget; it does not cap the output length.
pub fn extract(pixels: &[Color], depth: u32) -> Vec<Color> {
    if pixels.is_empty() {
        return Vec::new();
    }

    let target = 1usize << depth.min(MAX_DEPTH);
    let mut boxes = vec![ColorBox::new(pixels.to_vec())];

    while boxes.len() < target {
        // First box with the widest range.
        let mut widest = 0;
        let mut widest_range = 0;
        for (i, b) in boxes.iter().enumerate() {
            let range = b.widest_range();
            if range > widest_range {
                widest_range = range;
                widest = i;
            }
        }
        if widest_range == 0 {
            break;
        }

        let (lower, upper) = boxes.remove(widest).split();
        boxes.insert(widest, upper);
        boxes.insert(widest, lower);
    }

    let mut colors: Vec<Color> = boxes.iter().map(ColorBox::mean).collect();
    colors.sort_by(|a, b| b.count.cmp(&a.count));
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn depth_one_splits_black_from_white() {
        let colors = extract(&[Color::BLACK, Color::WHITE], 1);
        assert_eq!(
            colors,
            vec![Color::BLACK.with_count(1), Color::WHITE.with_count(1)]
        );
    }

    #[test]
    fn stops_when_nothing_left_to_split() {
        let pixels = vec![Color::new(9, 9, 9); 8];
        assert_eq!(extract(&pixels, 4), vec![Color::new(9, 9, 9).with_count(8)]);
    }

    #[test]
    fn depth_zero_is_the_overall_mean() {
        let colors = extract(&[Color::new(0, 0, 0), Color::new(10, 20, 30)], 0);
        assert_eq!(colors, vec![Color::new(5, 10, 15).with_count(2)]);
    }

    #[test]
    fn heavier_boxes_sort_first() {
        let mut pixels = vec![Color::new(250, 0, 0); 5];
        pixels.push(Color::new(0, 0, 250));
        let colors = extract(&pixels, 1);
        // Cut along blue: [red, red, red] | [red, red, blue]
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].count, Some(3));
        assert_eq!(colors.iter().filter_map(|c| c.count).sum::<usize>(), 6);
    }

    #[test]
    fn split_prefers_green_on_ties() {
        let b = ColorBox::new(vec![Color::new(0, 0, 0), Color::new(10, 10, 10)]);
        assert_eq!(b.split_channel(), Channel::Green);
        let b = ColorBox::new(vec![Color::new(0, 0, 0), Color::new(10, 0, 10)]);
        assert_eq!(b.split_channel(), Channel::Blue);
    }

    #[test]
    fn depth_for_counts() {
        assert_eq!(depth_for(1), 0);
        assert_eq!(depth_for(2), 1);
        assert_eq!(depth_for(6), 3);
        assert_eq!(depth_for(12), 4);
        assert_eq!(depth_for(16), 4);
    }
}
