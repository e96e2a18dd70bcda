// src/data/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

pub mod continent;
pub mod types;

pub use continent::Continent;
pub use types::{SoilSample, TradeRecord};

/// Deserialize every record of a headed CSV stream into `T`.
/// Unknown columns are ignored; the first bad record aborts the load.
pub fn read_records<T, R>(reader: R, label: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, result) in rdr.deserialize::<T>().enumerate() {
        // +2: header line plus 1-based numbering
        let record =
            result.with_context(|| format!("CSV parse error in {} at line {}", label, idx + 2))?;
        out.push(record);
    }
    debug!(label, rows = out.len(), "parsed records");
    Ok(out)
}

/// Load the food trade matrix.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_trade_records<P: AsRef<Path>>(path: P) -> Result<Vec<TradeRecord>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open trade file: {:?}", path.as_ref()))?;
    let label = path.as_ref().display().to_string();
    let rows = read_records(file, &label)?;
    info!(rows = rows.len(), "loaded trade records");
    Ok(rows)
}

/// Load the soil organic carbon density samples.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_soil_samples<P: AsRef<Path>>(path: P) -> Result<Vec<SoilSample>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open soil file: {:?}", path.as_ref()))?;
    let label = path.as_ref().display().to_string();
    let rows = read_records(file, &label)?;
    info!(rows = rows.len(), "loaded soil samples");
    Ok(rows)
}
