//! Decimation of a decoded RGBA buffer into a bounded pixel sample.

use crate::color::Color;
use crate::error::BrandingError;

/// Default upper bound on the number of sampled pixels.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// Pixels with alpha below this are treated as transparent.
const ALPHA_CUTOFF: u8 = 128;

/// A borrowed, row-major RGBA8 image whose length matches its dimensions.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, BrandingError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BrandingError::ImageTooLarge { width, height })?;
        if data.len() != expected {
            return Err(BrandingError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_raw(&self) -> &'a [u8] {
        self.data
    }
}

/// Take every `step`-th pixel, `step = max(1, total / target)`, in scan
/// order.
///
/// The stride is positional: a transparent pixel (alpha < 128) that lands on
/// a stride position is dropped rather than replaced by its neighbour, so the
/// same buffer always yields the same sample.
pub fn sample_pixels(buffer: &PixelBuffer<'_>, target: usize) -> Vec<Color> {
    let step = (buffer.pixel_count() / target.max(1)).max(1);

    let pixels: Vec<Color> = buffer
        .as_raw()
        .chunks_exact(4)
        .step_by(step)
        .filter(|px| px[3] >= ALPHA_CUTOFF)
        .map(|px| Color::new(px[0], px[1], px[2]))
        .collect();

    tracing::trace!(
        width = buffer.width(),
        height = buffer.height(),
        step,
        sampled = pixels.len(),
        "sampled pixels"
    );
    pixels
}

/// Mean color of a pixel sample, or `None` when it is empty.
pub fn average_color(pixels: &[Color]) -> Option<Color> {
    if pixels.is_empty() {
        return None;
    }
    let (r, g, b) = pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), px| {
        (r + u64::from(px.r), g + u64::from(px.g), b + u64::from(px.b))
    });
    let n = pixels.len() as f64;
    Some(Color::from_rgb_f64(r as f64 / n, g as f64 / n, b as f64 / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rgba(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let data = vec![0u8; 15];
        let err = PixelBuffer::new(2, 2, &data).unwrap_err();
        assert!(matches!(
            err,
            BrandingError::BufferSize {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX, &[]).unwrap_err();
        assert!(matches!(
            err,
            BrandingError::ImageTooLarge {
                width: u32::MAX,
                height: u32::MAX
            }
        ));
    }

    #[test]
    fn small_image_is_taken_whole() {
        let data = rgba(&[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]);
        let buffer = PixelBuffer::new(3, 1, &data).unwrap();
        let sample = sample_pixels(&buffer, DEFAULT_SAMPLE_SIZE);
        assert_eq!(
            sample,
            vec![
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255)
            ]
        );
    }

    #[test]
    fn strides_and_skips_transparent() {
        // Ten pixels, target four: step 2 visits indices 0, 2, 4, 6, 8.
        let mut pixels = Vec::new();
        for i in 0..10u8 {
            let alpha = if i == 4 { 127 } else { 255 };
            pixels.push([i, i, i, alpha]);
        }
        let data = rgba(&pixels);
        let buffer = PixelBuffer::new(10, 1, &data).unwrap();
        let sample: Vec<u8> = sample_pixels(&buffer, 4).iter().map(|c| c.r).collect();
        assert_eq!(sample, vec![0, 2, 6, 8]);
    }

    #[test]
    fn fully_transparent_image_yields_nothing() {
        let data = vec![200u8, 10, 10, 0].repeat(64);
        let buffer = PixelBuffer::new(8, 8, &data).unwrap();
        assert!(sample_pixels(&buffer, 16).is_empty());
    }

    #[test]
    fn sampling_is_reproducible() {
        let data: Vec<u8> = (0..400u32).flat_map(|i| [i as u8, 7, 9, 255]).collect();
        let buffer = PixelBuffer::new(20, 20, &data).unwrap();
        assert_eq!(sample_pixels(&buffer, 37), sample_pixels(&buffer, 37));
        assert_eq!(sample_pixels(&buffer, 37).len(), 40);
    }

    #[test]
    fn average_rounds_channel_means() {
        let pixels = [Color::new(0, 0, 0), Color::new(255, 1, 10)];
        assert_eq!(average_color(&pixels), Some(Color::new(128, 1, 5)));
        assert_eq!(average_color(&[]), None);
    }
}
