//! Palette extraction strategies.
//!
//! Every strategy turns an unordered pixel sample into a short list of colors
//! ranked by how strongly the sample supports them. Each returned color carries
//! its supporting pixel weight in [`Color::count`]. An empty sample always
//! produces an empty palette.

pub mod dominant;
pub mod histogram;
pub mod kmeans;
pub mod median_cut;
pub mod palette;
pub mod vibrant;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::color::{Color, luminance, saturation};
use crate::error::BrandingError;

/// The closed set of extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dominant,
    Histogram,
    KMeans,
    MedianCut,
    Vibrant,
    Palette,
}

/// Display metadata for one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: Algorithm,
    pub name: &'static str,
    pub description: &'static str,
}

/// All strategies, in presentation order.
pub static ALGORITHMS: [AlgorithmInfo; 6] = [
    AlgorithmInfo {
        id: Algorithm::Vibrant,
        name: "Vibrant Colors",
        description: "Extracts highly saturated, vibrant colors",
    },
    AlgorithmInfo {
        id: Algorithm::Palette,
        name: "Balanced Palette",
        description: "Diverse palette with light, dark, and vibrant colors",
    },
    AlgorithmInfo {
        id: Algorithm::Dominant,
        name: "Dominant Colors",
        description: "Most frequently occurring colors",
    },
    AlgorithmInfo {
        id: Algorithm::MedianCut,
        name: "Median Cut",
        description: "Color quantization by recursive subdivision",
    },
    AlgorithmInfo {
        id: Algorithm::KMeans,
        name: "K-Means Clustering",
        description: "Groups similar colors using k-means algorithm",
    },
    AlgorithmInfo {
        id: Algorithm::Histogram,
        name: "Histogram Analysis",
        description: "Color distribution analysis with binning",
    },
];

impl Algorithm {
    /// Stable lowercase identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Algorithm::Dominant => "dominant",
            Algorithm::Histogram => "histogram",
            Algorithm::KMeans => "kmeans",
            Algorithm::MedianCut => "mediancut",
            Algorithm::Vibrant => "vibrant",
            Algorithm::Palette => "palette",
        }
    }

    pub fn info(self) -> &'static AlgorithmInfo {
        let index = match self {
            Algorithm::Vibrant => 0,
            Algorithm::Palette => 1,
            Algorithm::Dominant => 2,
            Algorithm::MedianCut => 3,
            Algorithm::KMeans => 4,
            Algorithm::Histogram => 5,
        };
        &ALGORITHMS[index]
    }

    pub fn all() -> impl Iterator<Item = Algorithm> {
        ALGORITHMS.iter().map(|info| info.id)
    }

    /// Run this strategy, returning at most `count` colors.
    ///
    /// K-Means draws its initial centroids from the thread RNG; use
    /// [`Algorithm::extract_with_rng`] for reproducible output.
    pub fn extract(self, pixels: &[Color], count: usize) -> Vec<Color> {
        self.extract_with_rng(pixels, count, &mut rand::rng())
    }

    /// Like [`Algorithm::extract`], with K-Means seeded from `rng`.
    ///
    /// Median cut splits to the smallest depth whose `2^depth` boxes cover
    /// `count`, then keeps the `count` heaviest boxes.
    pub fn extract_with_rng<R: Rng + ?Sized>(
        self,
        pixels: &[Color],
        count: usize,
        rng: &mut R,
    ) -> Vec<Color> {
        match self {
            Algorithm::Dominant => dominant::extract(pixels, count),
            Algorithm::Histogram => histogram::extract(pixels, count),
            Algorithm::KMeans => kmeans::extract_with_rng(pixels, count, rng),
            Algorithm::MedianCut => {
                let mut boxes = median_cut::extract(pixels, median_cut::depth_for(count));
                boxes.truncate(count);
                boxes
            }
            Algorithm::Vibrant => vibrant::extract(pixels, count),
            Algorithm::Palette => palette::extract(pixels, count),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = BrandingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .find(|algorithm| algorithm.id() == s)
            .ok_or_else(|| BrandingError::UnknownAlgorithm(s.to_string()))
    }
}

/// Per-unique-color statistics gathered in one pass over the sample.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorStats {
    pub color: Color,
    pub count: usize,
    pub saturation: f64,
    pub luminance: f64,
}

impl ColorStats {
    pub fn weighted(&self) -> Color {
        self.color.with_count(self.count)
    }
}

/// Group pixels by exact color. Entries keep first-occurrence order, so a
/// stable sort over them breaks ties by input order.
pub(crate) fn tally(pixels: &[Color]) -> Vec<ColorStats> {
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut stats: Vec<ColorStats> = Vec::new();

    for &pixel in pixels {
        match index.get(&pixel.key()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(pixel.key(), stats.len());
                stats.push(ColorStats {
                    color: pixel,
                    count: 1,
                    saturation: saturation(pixel),
                    luminance: luminance(pixel),
                });
            }
        }
    }
    stats
}

/// Stable sort, most frequent first.
pub(crate) fn sort_by_count(stats: &mut [ColorStats]) {
    stats.sort_by(|a, b| b.count.cmp(&a.count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noisy_sample() -> Vec<Color> {
        let mut rng = StdRng::seed_from_u64(17);
        (0..500)
            .map(|_| Color::new(rng.random(), rng.random(), rng.random()))
            .chain(std::iter::repeat_n(Color::new(200, 30, 40), 120))
            .collect()
    }

    #[test]
    fn ids_round_trip() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.id().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.to_string(), algorithm.id());
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "octree".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, BrandingError::UnknownAlgorithm(ref id) if id == "octree"));
        assert!("KMeans".parse::<Algorithm>().is_err());
    }

    #[test]
    fn registry_lists_each_algorithm_once() {
        let ids: Vec<&str> = ALGORITHMS.iter().map(|info| info.id.id()).collect();
        assert_eq!(
            ids,
            vec!["vibrant", "palette", "dominant", "mediancut", "kmeans", "histogram"]
        );
        assert_eq!(Algorithm::KMeans.info().name, "K-Means Clustering");
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.info().id, algorithm);
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let mut rng = StdRng::seed_from_u64(1);
        for algorithm in Algorithm::all() {
            assert!(algorithm.extract_with_rng(&[], 6, &mut rng).is_empty());
        }
    }

    #[test]
    fn output_respects_count_and_weights() {
        let pixels = noisy_sample();
        let mut rng = StdRng::seed_from_u64(2);
        for algorithm in Algorithm::all() {
            for count in [1, 3, 6, 12] {
                let colors = algorithm.extract_with_rng(&pixels, count, &mut rng);
                assert!(colors.len() <= count, "{algorithm} returned too many");
                assert!(!colors.is_empty(), "{algorithm} returned nothing");
                for color in colors {
                    let weight = color.count.expect("extracted colors are weighted");
                    assert!(weight >= 1 && weight <= pixels.len());
                }
            }
        }
    }

    #[test]
    fn tally_keeps_first_occurrence_order() {
        let pixels = [
            Color::new(1, 1, 1),
            Color::new(2, 2, 2),
            Color::new(1, 1, 1),
        ];
        let stats = tally(&pixels);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].color, Color::new(1, 1, 1));
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].count, 1);
    }
}
