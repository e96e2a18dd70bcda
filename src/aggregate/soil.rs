// src/aggregate/soil.rs

use serde::Serialize;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};
use tracing::info;

use crate::data::{Continent, SoilSample};
use crate::humanize::intword;

/// A soil sample with its country-level values attached.
#[derive(Debug, Clone)]
pub struct SoilRow {
    pub sample: SoilSample,
    /// Mean `socd_depth4_5` over every sample of the same reporter country.
    pub socd_country_mean: f64,
    pub human_readable_population: Arc<str>,
}

/// Country-level row of the density-range chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMean {
    pub reporter_country_name: String,
    pub continent: Continent,
    pub socd_country_mean: f64,
    pub population_estimate: u64,
    pub human_readable_population: String,
}

/// Soil samples after the aggregation pass. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct SoilTable {
    rows: Vec<SoilRow>,
    means: BTreeMap<String, f64>,
}

impl SoilTable {
    pub fn derive(samples: Vec<SoilSample>) -> Self {
        let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for s in &samples {
            let entry = acc.entry(s.reporter_country_name.clone()).or_insert((0.0, 0));
            entry.0 += s.socd_depth4_5;
            entry.1 += 1;
        }
        let means: BTreeMap<String, f64> = acc
            .into_iter()
            .map(|(name, (sum, n))| (name, sum / n as f64))
            .collect();

        // population estimates repeat for every sample of a country
        let mut words: HashMap<u64, Arc<str>> = HashMap::new();
        let rows: Vec<SoilRow> = samples
            .into_iter()
            .map(|sample| {
                let human = words
                    .entry(sample.population_estimate)
                    .or_insert_with(|| Arc::from(intword(sample.population_estimate as f64)))
                    .clone();
                SoilRow {
                    socd_country_mean: means[&sample.reporter_country_name],
                    human_readable_population: human,
                    sample,
                }
            })
            .collect();

        info!(
            rows = rows.len(),
            countries = means.len(),
            "derived country SOCD means"
        );
        Self { rows, means }
    }

    pub fn rows(&self) -> &[SoilRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn country_mean(&self, name: &str) -> Option<f64> {
        self.means.get(name).copied()
    }

    /// Distinct reporter country names, ascending. Feeds the selection list.
    pub fn countries(&self) -> Vec<String> {
        self.means.keys().cloned().collect()
    }

    /// Rows whose reporter country equals `name` exactly, in file order.
    pub fn samples_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SoilRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.sample.reporter_country_name == name)
    }

    /// Raw SOCD values dropped, rows de-duplicated on
    /// (country, continent, mean, population) and sorted by mean descending,
    /// then continent, then country.
    pub fn country_means(&self) -> Vec<CountryMean> {
        let mut seen: HashSet<(&str, Continent, u64, u64)> = HashSet::new();
        let mut out = Vec::new();
        for r in &self.rows {
            let key = (
                r.sample.reporter_country_name.as_str(),
                r.sample.reporter_country_continent,
                r.socd_country_mean.to_bits(),
                r.sample.population_estimate,
            );
            if !seen.insert(key) {
                continue;
            }
            out.push(CountryMean {
                reporter_country_name: r.sample.reporter_country_name.clone(),
                continent: r.sample.reporter_country_continent,
                socd_country_mean: r.socd_country_mean,
                population_estimate: r.sample.population_estimate,
                human_readable_population: r.human_readable_population.to_string(),
            });
        }

        out.sort_by(|a, b| {
            b.socd_country_mean
                .partial_cmp(&a.socd_country_mean)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.continent.as_str().cmp(b.continent.as_str()))
                .then_with(|| a.reporter_country_name.cmp(&b.reporter_country_name))
        });
        out
    }
}
