//! Light/dark theme recommendations for a brand palette.

use serde::Serialize;

use crate::color::{AA_NORMAL, Color, ContrastRating, contrast_ratio, luminance};
use crate::error::BrandingError;
use crate::sample::average_color;

/// A background with its most legible black-or-white foreground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColor {
    pub background: Color,
    pub foreground: Color,
    pub contrast_ratio: f64,
    pub rating: ContrastRating,
}

impl ThemeColor {
    /// Pair `background` with whichever of black or white contrasts more.
    /// Black wins a tie.
    pub fn for_background(background: Color) -> Self {
        let on_white = contrast_ratio(background, Color::WHITE);
        let on_black = contrast_ratio(background, Color::BLACK);
        let (foreground, ratio) = if on_white > on_black {
            (Color::WHITE, on_white)
        } else {
            (Color::BLACK, on_black)
        };
        Self {
            background,
            foreground,
            contrast_ratio: ratio,
            rating: ContrastRating::from_ratio(ratio),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThemeRecommendation {
    pub light: ThemeColor,
    pub dark: ThemeColor,
}

impl ThemeRecommendation {
    /// AppStream `<branding>` block for a metainfo file.
    pub fn appstream_xml(&self) -> String {
        let mut xml = String::from("  <branding>\n");
        for (scheme, theme) in [("light", &self.light), ("dark", &self.dark)] {
            xml.push_str(&format!(
                "    <color type=\"primary\" scheme_preference=\"{scheme}\">{}</color>\n",
                theme.background.hex()
            ));
        }
        xml.push_str("  </branding>");
        xml
    }
}

/// Pick the lightest and darkest legible colors of `palette`.
///
/// Colors reaching 4.5:1 against black or white are preferred; when none do,
/// the whole palette is considered. On equal luminance the light pick is the
/// earlier color and the dark pick the later one.
pub fn recommend_themes(palette: &[Color]) -> Result<ThemeRecommendation, BrandingError> {
    let ranked: Vec<(Color, f64, f64)> = palette
        .iter()
        .map(|&c| {
            let best = contrast_ratio(c, Color::WHITE).max(contrast_ratio(c, Color::BLACK));
            (c, luminance(c), best)
        })
        .collect();

    let legible: Vec<(Color, f64, f64)> = ranked
        .iter()
        .copied()
        .filter(|&(_, _, best)| best >= AA_NORMAL)
        .collect();
    let pool = if legible.is_empty() { &ranked } else { &legible };

    let mut lightest = pool.first().ok_or(BrandingError::EmptyPalette)?;
    let mut darkest = lightest;
    for entry in pool.iter().skip(1) {
        if entry.1 > lightest.1 {
            lightest = entry;
        }
        if entry.1 <= darkest.1 {
            darkest = entry;
        }
    }

    tracing::debug!(
        palette = palette.len(),
        legible = legible.len(),
        light = %lightest.0,
        dark = %darkest.0,
        "recommended theme colors"
    );

    Ok(ThemeRecommendation {
        light: ThemeColor::for_background(lightest.0),
        dark: ThemeColor::for_background(darkest.0),
    })
}

/// How an icon's average color reads against a background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconContrast {
    pub average: Color,
    pub contrast_ratio: f64,
    pub rating: ContrastRating,
}

/// Contrast between the mean of the opaque icon pixels and `background`.
/// `None` when the icon has no opaque pixels.
pub fn icon_contrast(icon_pixels: &[Color], background: Color) -> Option<IconContrast> {
    let average = average_color(icon_pixels)?;
    let ratio = contrast_ratio(average, background);
    Some(IconContrast {
        average,
        contrast_ratio: ratio,
        rating: ContrastRating::from_ratio(ratio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const AMBER: Color = Color::new(255, 200, 0);
    const RED: Color = Color::new(200, 0, 0);
    const PURPLE: Color = Color::new(150, 0, 220);
    const GREEN: Color = Color::new(0, 140, 0);

    #[test]
    fn empty_palette_is_an_error() {
        assert!(matches!(recommend_themes(&[]), Err(BrandingError::EmptyPalette)));
    }

    #[test]
    fn single_color_serves_both_themes() {
        let themes = recommend_themes(&[RED]).unwrap();
        assert_eq!(themes.light.background, RED);
        assert_eq!(themes.dark.background, RED);
        assert_eq!(themes.light, themes.dark);
    }

    #[test]
    fn picks_lightest_and_darkest_legible() {
        let themes = recommend_themes(&[RED, AMBER, PURPLE]).unwrap();
        assert_eq!(themes.light.background, AMBER);
        assert_eq!(themes.light.foreground, Color::BLACK);
        assert_eq!(themes.dark.background, PURPLE);
        assert_eq!(themes.dark.foreground, Color::WHITE);
        assert!(themes.dark.rating.aa().normal);
    }

    #[test]
    fn mid_tones_pair_with_whichever_extreme_wins() {
        // Perceived brightness says white text, but black reads better.
        let theme = ThemeColor::for_background(GREEN);
        assert_eq!(theme.foreground, Color::BLACK);
        assert!(theme.contrast_ratio > 4.7 && theme.contrast_ratio < 4.8);
        assert!(theme.rating.aa().normal);
    }

    #[test]
    fn luminance_ties_split_between_ends() {
        let twin = Color::new(200, 0, 0);
        let themes = recommend_themes(&[RED.with_count(3), twin.with_count(1)]).unwrap();
        assert_eq!(themes.light.background.count, Some(3));
        assert_eq!(themes.dark.background.count, Some(1));
    }

    #[test]
    fn foreground_maximises_contrast() {
        let on_white = ThemeColor::for_background(Color::WHITE);
        assert_eq!(on_white.foreground, Color::BLACK);
        assert!((on_white.contrast_ratio - 21.0).abs() < 1e-9);
        assert!(on_white.rating.aaa().normal);

        let on_black = ThemeColor::for_background(Color::BLACK);
        assert_eq!(on_black.foreground, Color::WHITE);
    }

    #[test]
    fn appstream_snippet() {
        let themes = recommend_themes(&[RED, AMBER]).unwrap();
        assert_eq!(
            themes.appstream_xml(),
            "  <branding>\n\
             \x20   <color type=\"primary\" scheme_preference=\"light\">#ffc800</color>\n\
             \x20   <color type=\"primary\" scheme_preference=\"dark\">#c80000</color>\n\
             \x20 </branding>"
        );
    }

    #[test]
    fn icon_contrast_uses_average_color() {
        let icon = [Color::BLACK, Color::BLACK];
        let result = icon_contrast(&icon, Color::WHITE).unwrap();
        assert_eq!(result.average, Color::BLACK);
        assert!((result.contrast_ratio - 21.0).abs() < 1e-9);
        assert!(icon_contrast(&[], Color::WHITE).is_none());
    }
}
