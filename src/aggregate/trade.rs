// src/aggregate/trade.rs

use rayon::prelude::*;
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};
use tracing::info;

use crate::data::TradeRecord;
use crate::humanize::intword;

/// Totals for one importing (partner) country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerSummary {
    pub partner_country_name: String,
    /// Sum of `export_quantity_tonnes` over every flow into this partner.
    pub export_quantity_sum: f64,
    /// Number of distinct items flowing into this partner.
    pub export_items_count: usize,
    /// `export_quantity_sum` as words, e.g. "3.2 million".
    pub human_readable_trade_volume: String,
}

/// A trade flow with its partner-level totals attached.
#[derive(Debug, Clone)]
pub struct TradeRow {
    pub record: TradeRecord,
    pub partner: Arc<PartnerSummary>,
}

/// The trade matrix after the aggregation pass. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct TradeTable {
    rows: Vec<TradeRow>,
    partners: BTreeMap<String, Arc<PartnerSummary>>,
}

impl TradeTable {
    /// Group flows by partner and attach the totals to every row.
    ///
    /// Groups are summed in parallel but each group keeps file order, so the
    /// floating point totals do not depend on thread scheduling.
    pub fn derive(records: Vec<TradeRecord>) -> Self {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, r) in records.iter().enumerate() {
            groups
                .entry(r.partner_country_name.as_str())
                .or_default()
                .push(idx);
        }

        let summaries: Vec<PartnerSummary> = groups
            .par_iter()
            .map(|(partner, idxs)| {
                let mut sum = 0.0;
                let mut items: HashSet<&str> = HashSet::new();
                for &i in idxs {
                    sum += records[i].export_quantity_tonnes;
                    items.insert(records[i].item.as_str());
                }
                PartnerSummary {
                    partner_country_name: partner.to_string(),
                    export_quantity_sum: sum,
                    export_items_count: items.len(),
                    human_readable_trade_volume: intword(sum),
                }
            })
            .collect();

        let partners: BTreeMap<String, Arc<PartnerSummary>> = summaries
            .into_iter()
            .map(|s| (s.partner_country_name.clone(), Arc::new(s)))
            .collect();

        let rows = records
            .into_iter()
            .map(|record| {
                let partner = Arc::clone(&partners[&record.partner_country_name]);
                TradeRow { record, partner }
            })
            .collect::<Vec<_>>();

        info!(
            rows = rows.len(),
            partners = partners.len(),
            "derived partner trade totals"
        );
        Self { rows, partners }
    }

    pub fn rows(&self) -> &[TradeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One summary per distinct partner, ordered by partner name.
    pub fn partners(&self) -> impl Iterator<Item = &PartnerSummary> {
        self.partners.values().map(|p| p.as_ref())
    }

    pub fn partner(&self, name: &str) -> Option<&PartnerSummary> {
        self.partners.get(name).map(|p| p.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(partner: &str, item: &str, tonnes: f64) -> TradeRecord {
        TradeRecord {
            partner_country_name: partner.into(),
            item: item.into(),
            export_quantity_tonnes: tonnes,
        }
    }

    #[test]
    fn sums_and_counts_per_partner() {
        let table = TradeTable::derive(vec![
            flow("China", "Soybeans", 1000.0),
            flow("China", "Tea", 250.5),
            flow("China", "Soybeans", 500.0),
            flow("United States of America", "Tea", 40.0),
        ]);

        let china = table.partner("China").unwrap();
        assert_eq!(china.export_quantity_sum, 1750.5);
        assert_eq!(china.export_items_count, 2);
        assert_eq!(china.human_readable_trade_volume, "1750");

        let usa = table.partner("United States of America").unwrap();
        assert_eq!(usa.export_quantity_sum, 40.0);
        assert_eq!(usa.export_items_count, 1);
        assert_eq!(table.partners().count(), 2);
    }

    #[test]
    fn every_row_carries_its_partner_totals() {
        let table = TradeTable::derive(vec![
            flow("China", "Soybeans", 3_000_000.0),
            flow("Japan", "Rice", 10.0),
            flow("China", "Maize", 200_000.0),
        ]);
        assert_eq!(table.len(), 3);
        for row in table.rows() {
            let expected: f64 = table
                .rows()
                .iter()
                .filter(|r| r.record.partner_country_name == row.record.partner_country_name)
                .map(|r| r.record.export_quantity_tonnes)
                .sum();
            assert_eq!(row.partner.export_quantity_sum, expected);
        }
        assert_eq!(
            table.partner("China").unwrap().human_readable_trade_volume,
            "3.2 million"
        );
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = TradeTable::derive(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.partners().count(), 0);
    }
}
