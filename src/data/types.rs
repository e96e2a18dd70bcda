// src/data/types.rs

use serde::{de, Deserialize, Deserializer, Serialize};

use super::continent::Continent;

/// One reporter/partner/item trade flow from the 2019 trade matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "Partner_Country_name")]
    pub partner_country_name: String,
    #[serde(rename = "Item")]
    pub item: String,
    /// Blank cells in the export quantity column count as zero.
    #[serde(
        rename = "Export_Quantity_2019_Value_tonnes",
        deserialize_with = "blank_as_zero"
    )]
    pub export_quantity_tonnes: f64,
}

/// One geolocated soil organic carbon density measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    #[serde(rename = "Reporter_Country_name")]
    pub reporter_country_name: String,
    #[serde(rename = "Reporter_Country_continent")]
    pub reporter_country_continent: Continent,
    #[serde(rename = "Reporter_Country_lon")]
    pub lon: f64,
    #[serde(rename = "Reporter_Country_lat")]
    pub lat: f64,
    /// Organic carbon density at 0-4.5cm, t ha-1.
    #[serde(rename = "Reporter_Country_SOCD_depth4_5")]
    pub socd_depth4_5: f64,
    #[serde(
        rename = "Reporter_Country_pop_est",
        deserialize_with = "whole_number"
    )]
    pub population_estimate: u64,
}

fn blank_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| de::Error::custom(format!("invalid quantity `{}`", trimmed)))?;
    if value < 0.0 {
        return Err(de::Error::custom(format!("negative quantity `{}`", trimmed)));
    }
    Ok(value)
}

/// Accepts "1366417754" as well as pandas' float rendering "1366417754.0".
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        // 2^64 is the first f64 past u64::MAX; casting it would saturate
        Ok(v) if v >= 0.0 && v.round() < u64::MAX as f64 => Ok(v.round() as u64),
        _ => Err(de::Error::custom(format!("invalid population `{}`", trimmed))),
    }
}
