// src/figure/mod.rs
//! Plotly-compatible figure descriptions. The browser hands these to
//! `Plotly.react` unchanged; nothing here knows how to draw.

use serde::Serialize;
use serde_json::Value;

pub mod colors;
pub mod density;
pub mod map;
pub mod risk;

pub use colors::ColorScale;
pub use density::density_range_figure;
pub use map::{map_figure, MapStyle};
pub use risk::trade_risk_figure;

/// Brown used for all chart text.
pub const FONT_COLOR: &str = "#483628";
/// Paper background shared by the static charts.
pub const PAPER_BG: &str = "#e8ece8";
/// Plot area background shared by the static charts.
pub const PLOT_BG: &str = "#f7f5fc";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scattermapbox(PointTrace),
    Scatter(PointTrace),
    Bar(BarTrace),
}

impl Trace {
    pub fn marker(&self) -> &Marker {
        match self {
            Trace::Scattermapbox(t) | Trace::Scatter(t) => &t.marker,
            Trace::Bar(t) => &t.marker,
        }
    }
}

/// Fields shared by `scatter` and `scattermapbox`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PointTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customdata: Vec<Vec<Value>>,
    pub marker: Marker,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub customdata: Vec<Vec<Value>>,
    pub marker: Marker,
    pub hovertemplate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Fixed(String),
    Values(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: ColorBarTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBarTitle {
    pub text: String,
}

impl ColorBar {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: ColorBarTitle { text: text.into() },
        }
    }
}
