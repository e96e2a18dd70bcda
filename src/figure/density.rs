// src/figure/density.rs

use serde_json::{json, Value};

use super::{
    colors::SPEED_SCALE, BarTrace, ColorBar, Figure, Marker, MarkerColor, Trace, FONT_COLOR,
    PAPER_BG, PLOT_BG,
};
use crate::aggregate::SoilTable;
use crate::data::Continent;

/// Range of country-mean SOCD per continent. Bars are overlaid so each
/// continent column shows the spread of its countries' means.
pub fn density_range_figure(soil: &SoilTable) -> Figure {
    let means = soil.country_means();

    let x: Vec<String> = means.iter().map(|m| m.continent.as_str().to_string()).collect();
    let y: Vec<f64> = means.iter().map(|m| m.socd_country_mean).collect();
    let customdata: Vec<Vec<Value>> = means
        .iter()
        .map(|m| {
            vec![
                json!(m.reporter_country_name),
                json!(m.continent.as_str()),
                json!(m.socd_country_mean),
                json!(m.human_readable_population),
            ]
        })
        .collect();

    let trace = BarTrace {
        x,
        marker: Marker {
            color: Some(MarkerColor::Values(y.clone())),
            colorscale: Some(SPEED_SCALE.clone()),
            showscale: Some(true),
            colorbar: Some(ColorBar::titled("Avg.<br>SOCD")),
            ..Default::default()
        },
        y,
        customdata,
        hovertemplate: [
            "<b>%{customdata[0]} </b><br>",
            "%{customdata[1]}",
            "Average SOCD: %{customdata[2]:.1f} t ha<sup>−1</sup>",
            "Estimated Population (2019): %{customdata[3]} people",
        ]
        .join("<br>"),
        opacity: Some(0.20),
    };

    let order: Vec<&str> = Continent::CHART_ORDER.iter().map(|c| c.as_str()).collect();
    let layout = json!({
        "barmode": "overlay",
        "xaxis": {
            "categoryorder": "array",
            "categoryarray": order,
            "title": { "text": null },
        },
        "yaxis": {
            "gridcolor": PAPER_BG,
            "title": { "text": null },
        },
        "paper_bgcolor": PAPER_BG,
        "plot_bgcolor": PLOT_BG,
        "font": { "color": FONT_COLOR },
    });

    Figure {
        data: vec![Trace::Bar(trace)],
        layout,
    }
}
