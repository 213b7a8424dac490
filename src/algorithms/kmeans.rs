//! Lloyd's k-means over raw RGB.
//!
//! Initial centroids are distinct pixels drawn without replacement, so the
//! result depends on the random source. [`extract`] uses the thread RNG;
//! pass a seeded generator to [`extract_with_rng`] for repeatable output.

use rand::Rng;
use rand::seq::index;

use crate::color::{Color, color_distance};

/// Upper bound on assignment/update rounds.
pub const MAX_ITERATIONS: usize = 10;

pub fn extract(pixels: &[Color], k: usize) -> Vec<Color> {
    extract_with_rng(pixels, k, &mut rand::rng())
}

pub fn extract_with_rng<R: Rng + ?Sized>(pixels: &[Color], k: usize, rng: &mut R) -> Vec<Color> {
    let k = k.min(pixels.len());
    if k == 0 {
        return Vec::new();
    }

    let mut centroids: Vec<Color> = index::sample(rng, pixels.len(), k)
        .into_iter()
        .map(|i| pixels[i].without_count())
        .collect();
    let mut sizes = vec![0usize; k];

    for iteration in 0..MAX_ITERATIONS {
        let mut sums = vec![[0u64; 3]; k];
        sizes.fill(0);

        for &px in pixels {
            let nearest = nearest_centroid(&centroids, px);
            sums[nearest][0] += u64::from(px.r);
            sums[nearest][1] += u64::from(px.g);
            sums[nearest][2] += u64::from(px.b);
            sizes[nearest] += 1;
        }

        let mut changed = false;
        for ((centroid, sum), &size) in centroids.iter_mut().zip(&sums).zip(&sizes) {
            if size == 0 {
                continue;
            }
            let n = size as f64;
            let mean = Color::from_rgb_f64(sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n);
            if mean != *centroid {
                *centroid = mean;
                changed = true;
            }
        }

        if !changed {
            tracing::trace!(iteration, k, "k-means converged");
            break;
        }
    }

    let mut clusters: Vec<Color> = centroids
        .into_iter()
        .zip(sizes)
        .filter(|&(_, size)| size > 0)
        .map(|(centroid, size)| centroid.with_count(size))
        .collect();
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
    clusters
}

/// Index of the closest centroid; the lowest index wins a tie.
fn nearest_centroid(centroids: &[Color], px: Color) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let dist = color_distance(px, c);
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}
