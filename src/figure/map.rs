// src/figure/map.rs

use serde_json::json;

use super::{colors::AGSUNSET_R, ColorBar, Figure, Marker, MarkerColor, PointTrace, Trace};
use crate::aggregate::SoilTable;

/// USGS imagery tiles drawn beneath the markers.
pub const BASE_IMAGERY_TILES: &str =
    "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}";

/// Fixed, selection-independent map settings.
#[derive(Debug, Clone, Default)]
pub struct MapStyle {
    /// Mapbox access token; without it only the raster layer renders.
    pub access_token: Option<String>,
}

impl MapStyle {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Map of SOCD for the samples of `selection`.
///
/// The name must match a country exactly. `None`, an empty string, or a name
/// with no samples all produce the same figure with an empty marker layer.
pub fn map_figure(selection: Option<&str>, soil: &SoilTable, style: &MapStyle) -> Figure {
    let selected = selection.filter(|s| !s.is_empty());

    let mut lon = Vec::new();
    let mut lat = Vec::new();
    let mut socd = Vec::new();
    if let Some(name) = selected {
        for row in soil.samples_for(name) {
            lon.push(row.sample.lon);
            lat.push(row.sample.lat);
            socd.push(row.sample.socd_depth4_5);
        }
    }

    let trace = PointTrace {
        name: Some("SOCD at Surface Depth to 4.5cm".into()),
        mode: "markers".into(),
        lon: Some(lon),
        lat: Some(lat),
        marker: Marker {
            size: socd.clone(),
            color: Some(MarkerColor::Values(socd)),
            colorscale: Some(AGSUNSET_R.clone()),
            showscale: Some(true),
            colorbar: Some(ColorBar::titled("SOCD")),
            opacity: Some(0.8),
            ..Default::default()
        },
        hovertemplate: "Longitude: %{lon}<br>Latitude: %{lat}<br><extra></extra>".into(),
        ..Default::default()
    };

    // no uirevision: each selection resets zoom and pan
    let layout = json!({
        "paper_bgcolor": "#e4ebf5",
        "font": { "color": super::FONT_COLOR },
        "clickmode": "event+select",
        "hovermode": "closest",
        "hoverdistance": 2,
        "autosize": true,
        "margin": { "l": 0, "r": 0, "t": 35, "b": 0 },
        "mapbox": {
            "accesstoken": style.access_token,
            "style": "white-bg",
            "layers": [{
                "below": "traces",
                "sourcetype": "raster",
                "source": [BASE_IMAGERY_TILES],
            }],
        },
    });

    Figure {
        data: vec![Trace::Scattermapbox(trace)],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Continent, SoilSample};

    fn sample(name: &str, lon: f64, lat: f64, socd: f64) -> SoilSample {
        SoilSample {
            reporter_country_name: name.into(),
            reporter_country_continent: Continent::Africa,
            lon,
            lat,
            socd_depth4_5: socd,
            population_estimate: 1,
        }
    }

    fn table() -> SoilTable {
        SoilTable::derive(vec![
            sample("Kenya", 36.8, -1.3, 12.0),
            sample("Kenya", 37.1, 0.2, 8.0),
            sample("Brazil", -47.9, -15.8, 20.0),
        ])
    }

    fn points(fig: &Figure) -> &PointTrace {
        match &fig.data[0] {
            Trace::Scattermapbox(t) => t,
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn kenya_has_two_markers_sized_by_socd() {
        let fig = map_figure(Some("Kenya"), &table(), &MapStyle::default());
        let t = points(&fig);
        assert_eq!(t.lon.as_deref(), Some(&[36.8, 37.1][..]));
        assert_eq!(t.lat.as_deref(), Some(&[-1.3, 0.2][..]));
        assert_eq!(t.marker.size, vec![12.0, 8.0]);
        assert_eq!(t.marker.color, Some(MarkerColor::Values(vec![12.0, 8.0])));
    }

    #[test]
    fn marker_count_matches_rows_for_every_country() {
        let soil = table();
        for name in soil.countries() {
            let fig = map_figure(Some(&name), &soil, &MapStyle::default());
            let expected: Vec<f64> = soil
                .samples_for(&name)
                .map(|r| r.sample.socd_depth4_5)
                .collect();
            assert_eq!(fig.data[0].marker().size, expected);
        }
    }

    #[test]
    fn absent_or_empty_selection_renders_empty_layer() {
        let soil = table();
        for sel in [Some("France"), Some(""), None] {
            let fig = map_figure(sel, &soil, &MapStyle::default());
            let t = points(&fig);
            assert_eq!(t.lon.as_deref(), Some(&[][..]));
            assert!(t.marker.size.is_empty());
            assert_eq!(fig.data.len(), 1);
        }
    }

    #[test]
    fn selection_is_not_trimmed() {
        let soil = table();
        for sel in [" Kenya ", "Kenya ", "kenya"] {
            let fig = map_figure(Some(sel), &soil, &MapStyle::default());
            assert!(fig.data[0].marker().size.is_empty(), "{:?}", sel);
        }
    }

    #[test]
    fn layout_carries_token_and_base_layer() {
        let style = MapStyle::new(Some("pk.test".into()));
        let fig = map_figure(Some("Brazil"), &table(), &style);
        assert_eq!(fig.layout["mapbox"]["accesstoken"], "pk.test");
        assert_eq!(fig.layout["mapbox"]["layers"][0]["below"], "traces");
        assert!(fig.layout.get("uirevision").is_none());

        let bare = map_figure(Some("Brazil"), &table(), &MapStyle::new(Some("  ".into())));
        assert!(bare.layout["mapbox"]["accesstoken"].is_null());
    }

    #[test]
    fn serializes_as_scattermapbox() {
        let fig = map_figure(Some("Kenya"), &table(), &MapStyle::default());
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(v["data"][0]["type"], "scattermapbox");
        assert_eq!(v["data"][0]["marker"]["colorbar"]["title"]["text"], "SOCD");
        assert_eq!(v["data"][0]["marker"]["size"][1], 8.0);
    }
}
