// src/view/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::aggregate::{SoilTable, TradeTable};
use crate::config::Config;
use crate::data::{self, SoilSample, TradeRecord};
use crate::figure::{density_range_figure, map_figure, trade_risk_figure, Figure, MapStyle};

pub mod modal;
pub mod page;

pub use modal::{toggle_modal, ModalEvent, ModalToggle};

/// Everything the server needs, computed once at startup and then only read.
#[derive(Debug)]
pub struct Dashboard {
    soil: SoilTable,
    trade: TradeTable,
    map_style: MapStyle,
    countries: Vec<String>,
    density: Figure,
    risk: Figure,
    page: String,
    loaded_at: DateTime<Utc>,
}

impl Dashboard {
    /// Load both files named by `cfg` and build the dashboard. Any I/O or
    /// parse failure is returned; nothing is served from a partial load.
    pub fn load(cfg: &Config) -> Result<Self> {
        let trade_path = cfg.trade_path();
        let soil_path = cfg.soil_path();

        let trade = data::load_trade_records(&trade_path)
            .with_context(|| format!("loading trade matrix from {}", trade_path.display()))?;
        let soil = data::load_soil_samples(&soil_path)
            .with_context(|| format!("loading soil samples from {}", soil_path.display()))?;

        Ok(Self::build(soil, trade, map_style(cfg)))
    }

    /// Aggregation pass, static figures and page, in that order.
    pub fn build(soil: Vec<SoilSample>, trade: Vec<TradeRecord>, map_style: MapStyle) -> Self {
        let soil = SoilTable::derive(soil);
        let trade = TradeTable::derive(trade);

        let density = density_range_figure(&soil);
        let risk = trade_risk_figure(&trade);
        let countries = soil.countries();
        let page = page::render_page(&countries);

        info!(
            countries = countries.len(),
            partners = trade.partners().count(),
            "dashboard ready"
        );

        Self {
            soil,
            trade,
            map_style,
            countries,
            density,
            risk,
            page,
            loaded_at: Utc::now(),
        }
    }

    /// Map for the dropdown's current value.
    pub fn map(&self, selection: Option<&str>) -> Figure {
        map_figure(selection, &self.soil, &self.map_style)
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn density_figure(&self) -> &Figure {
        &self.density
    }

    pub fn risk_figure(&self) -> &Figure {
        &self.risk
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn soil(&self) -> &SoilTable {
        &self.soil
    }

    pub fn trade(&self) -> &TradeTable {
        &self.trade
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Blank tokens count as missing.
fn map_style(cfg: &Config) -> MapStyle {
    let style = MapStyle::new(cfg.mapbox_access_token.clone());
    if style.access_token.is_none() {
        warn!("MAPBOX_ACCESS_TOKEN not set; map renders without mapbox imagery");
    }
    style
}
