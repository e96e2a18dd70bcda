// src/figure/colors.rs

use once_cell::sync::Lazy;
use serde::Serialize;

/// Plotly colorscale: `[[0.0, "rgb(..)"], .., [1.0, "rgb(..)"]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorScale(pub Vec<(f64, String)>);

impl ColorScale {
    /// Evenly spaced stops from the first to the last color.
    pub fn from_colors(colors: &[&str]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        ColorScale(
            colors
                .iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / last, c.to_string()))
                .collect(),
        )
    }

    pub fn reversed(&self) -> Self {
        ColorScale(
            self.0
                .iter()
                .rev()
                .map(|(stop, c)| (1.0 - stop, c.clone()))
                .collect(),
        )
    }
}

/// CARTO "Agsunset" sequential palette.
const AGSUNSET: &[&str] = &[
    "rgb(75, 41, 145)",
    "rgb(135, 44, 162)",
    "rgb(192, 54, 157)",
    "rgb(234, 79, 136)",
    "rgb(250, 120, 118)",
    "rgb(246, 169, 122)",
    "rgb(237, 217, 163)",
];

/// cmocean "speed": pale yellow through green to near black.
const SPEED: &[&str] = &[
    "rgb(254, 252, 205)",
    "rgb(239, 225, 156)",
    "rgb(221, 201, 106)",
    "rgb(194, 182, 59)",
    "rgb(157, 167, 21)",
    "rgb(116, 153, 5)",
    "rgb(75, 138, 20)",
    "rgb(35, 121, 36)",
    "rgb(11, 100, 44)",
    "rgb(18, 78, 43)",
    "rgb(25, 56, 34)",
    "rgb(23, 35, 18)",
];

/// Bright fuchsia-to-cream ramp for map markers over satellite imagery.
pub static AGSUNSET_R: Lazy<ColorScale> = Lazy::new(|| ColorScale::from_colors(AGSUNSET).reversed());

pub static SPEED_SCALE: Lazy<ColorScale> = Lazy::new(|| ColorScale::from_colors(SPEED));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_span_zero_to_one() {
        for scale in [&*AGSUNSET_R, &*SPEED_SCALE] {
            let stops: Vec<f64> = scale.0.iter().map(|(s, _)| *s).collect();
            assert_eq!(stops.first(), Some(&0.0));
            assert_eq!(stops.last(), Some(&1.0));
            assert!(stops.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn reversed_swaps_endpoints() {
        assert_eq!(AGSUNSET_R.0[0].1, "rgb(237, 217, 163)");
        assert_eq!(AGSUNSET_R.0.last().unwrap().1, "rgb(75, 41, 145)");
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let scale = ColorScale::from_colors(&["red", "blue"]);
        let json = serde_json::to_string(&scale).unwrap();
        assert_eq!(json, r#"[[0.0,"red"],[1.0,"blue"]]"#);
    }
}
