// src/data/mod.rs

pub mod loader;
pub mod row;

use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

pub use loader::{load_dataset, read_dataset};
pub use row::{Header, Row, INDICATOR_COLUMN, YEAR_COLUMN};

/// Every record of one input file, in file order. Read-only after loading.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Arc<Header>,
    rows: Vec<Row>,
}

/// Coverage of one indicator within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorCoverage {
    pub indicator: String,
    pub rows: usize,
    /// `(min, max)` over rows whose year parses.
    pub years: Option<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_rows: usize,
    /// Non-key columns, in header order.
    pub countries: Vec<String>,
    /// Indicators in first-seen order.
    pub indicators: Vec<IndicatorCoverage>,
}

impl Dataset {
    pub fn new(header: Arc<Header>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying `indicator`, in file order.
    pub fn with_indicator<'a>(&'a self, indicator: &'a str) -> impl Iterator<Item = &'a Row> {
        self.rows.iter().filter(move |r| r.has_indicator(indicator))
    }

    pub fn summary(&self) -> DatasetSummary {
        let countries = self
            .header
            .names()
            .iter()
            .filter(|n| !Header::is_key_column(n))
            .cloned()
            .collect();

        let mut order: Vec<IndicatorCoverage> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();
        for row in &self.rows {
            let Some(name) = row.value_for(INDICATOR_COLUMN) else {
                continue;
            };
            let i = *slot.entry(name).or_insert_with(|| {
                order.push(IndicatorCoverage {
                    indicator: name.to_string(),
                    rows: 0,
                    years: None,
                });
                order.len() - 1
            });
            let cov = &mut order[i];
            cov.rows += 1;
            if let Ok(y) = row.year() {
                cov.years = Some(match cov.years {
                    Some((lo, hi)) => (lo.min(y), hi.max(y)),
                    None => (y, y),
                });
            }
        }

        DatasetSummary {
            total_rows: self.rows.len(),
            countries,
            indicators: order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tracks_indicators_in_first_seen_order() {
        let text = "\
Indicator Name,Year,India,Canada
B,1995,1,2
A,1991,3,4
B,1990,5,6
B,n/a,7,8
";
        let ds = read_dataset(text.as_bytes()).unwrap();
        let s = ds.summary();
        assert_eq!(s.total_rows, 4);
        assert_eq!(s.countries, vec!["India", "Canada"]);
        assert_eq!(
            s.indicators,
            vec![
                IndicatorCoverage {
                    indicator: "B".into(),
                    rows: 3,
                    years: Some((1990, 1995)),
                },
                IndicatorCoverage {
                    indicator: "A".into(),
                    rows: 1,
                    years: Some((1991, 1991)),
                },
            ]
        );
        assert_eq!(ds.with_indicator("B").count(), 3);
    }
}
