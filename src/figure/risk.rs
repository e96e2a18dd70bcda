// src/figure/risk.rs

use serde_json::{json, Value};

use super::{Figure, Marker, MarkerColor, PointTrace, Trace, FONT_COLOR, PAPER_BG, PLOT_BG};
use crate::aggregate::TradeTable;
use crate::humanize::intcomma;

const POINT_COLOR: &str = "#a99e54";
/// Diameter in px of the largest bubble.
const MAX_MARKER_PX: f64 = 20.0;
const MIN_MARKER_PX: f64 = 10.0;

/// Food security risk: each importing country placed by how many distinct
/// foods it imports (x) against how many tonnes (y, also bubble area).
pub fn trade_risk_figure(trade: &TradeTable) -> Figure {
    let partners: Vec<_> = trade.partners().collect();

    let x: Vec<f64> = partners.iter().map(|p| p.export_items_count as f64).collect();
    let y: Vec<f64> = partners.iter().map(|p| p.export_quantity_sum).collect();
    let customdata: Vec<Vec<Value>> = partners
        .iter()
        .map(|p| {
            vec![
                json!(p.partner_country_name),
                json!(intcomma(p.export_quantity_sum)),
                json!(p.export_items_count),
            ]
        })
        .collect();

    let max_size = y.iter().cloned().fold(0.0_f64, f64::max);
    let sizeref = if max_size > 0.0 {
        2.0 * max_size / (MAX_MARKER_PX * MAX_MARKER_PX)
    } else {
        1.0
    };

    let trace = PointTrace {
        mode: "markers".into(),
        x: Some(x),
        marker: Marker {
            size: y.clone(),
            color: Some(MarkerColor::Fixed(POINT_COLOR.into())),
            sizemode: Some("area".into()),
            sizeref: Some(sizeref),
            sizemin: Some(MIN_MARKER_PX),
            ..Default::default()
        },
        y: Some(y),
        customdata,
        hovertemplate: [
            "<b>%{customdata[0]} </b><br>",
            "Trade Volume: %{customdata[1]} tonnes imported",
            "Trade Diversity: %{customdata[2]} unique food products imported",
        ]
        .join("<br>"),
        ..Default::default()
    };

    let layout = json!({
        "xaxis": {
            "title": { "text": "Diversity of Foods Imported (How many unique items?)" },
        },
        "title": {
            "text": "Volume as Total Quantity of Foods Imported (tonnes)",
            "xref": "container",
        },
        "yaxis": {
            "title": { "text": "" },
            "gridcolor": PAPER_BG,
        },
        "paper_bgcolor": PAPER_BG,
        "plot_bgcolor": PLOT_BG,
        "font": { "color": FONT_COLOR },
    });

    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}
