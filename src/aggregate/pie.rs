// src/aggregate/pie.rs

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::select;
use crate::{
    data::{Dataset, Header},
    error::{DashError, Result},
};

/// Radial offset of the emphasised slice, as a fraction of the radius.
pub const EXPLODE_OFFSET: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Slices for one indicator in one year. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub indicator: String,
    pub year: i32,
    pub slices: Vec<PieSlice>,
    /// Index of the largest slice (first one on ties).
    pub emphasized: usize,
}

/// Take every non-empty country cell of the row(s) for `indicator` in `year`.
///
/// Columns are visited in header order. A repeated column name counts once,
/// with the value of its last cell. If several rows match, later values
/// replace earlier ones for the same column.
#[tracing::instrument(level = "debug", skip(dataset))]
pub fn aggregate_pie(dataset: &Dataset, indicator: &str, year: i32) -> Result<PieChart> {
    let mut slices: Vec<PieSlice> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for hit in select(dataset, indicator, |y| y == year) {
        let (_, row) = hit?;
        let mut visited: HashSet<&str> = HashSet::new();
        for (column, _) in row.columns() {
            if Header::is_key_column(column) || !visited.insert(column) {
                continue;
            }
            // a repeated column name reads its last cell
            if row.value_for(column).map_or(true, |raw| raw.trim().is_empty()) {
                continue;
            }
            let value = row.number_for(column)?;
            match slot.get(column) {
                Some(&i) => slices[i].value = value,
                None => {
                    slot.insert(column.to_string(), slices.len());
                    slices.push(PieSlice {
                        label: column.to_string(),
                        value,
                    });
                }
            }
        }
    }

    let emphasized = largest(&slices).ok_or_else(|| DashError::Lookup {
        indicator: indicator.to_string(),
        year,
    })?;
    debug!(slices = slices.len(), emphasized = %slices[emphasized].label, "pie aggregation done");

    Ok(PieChart {
        indicator: indicator.to_string(),
        year,
        slices,
        emphasized,
    })
}

fn largest(slices: &[PieSlice]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, s) in slices.iter().enumerate() {
        match best {
            Some(b) if s.value <= slices[b].value => {}
            _ => best = Some(i),
        }
    }
    best
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of slice `i` in the drawn total, in percent.
    pub fn share(&self, i: usize) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        self.slices[i].value / total * 100.0
    }

    /// Radial offset of slice `i` as a fraction of the radius.
    pub fn explode(&self, i: usize) -> f64 {
        if i == self.emphasized {
            EXPLODE_OFFSET
        } else {
            0.0
        }
    }

    /// Border width in pixels: the emphasised slice is drawn heavier.
    pub fn border_width(&self, i: usize) -> u32 {
        if i == self.emphasized {
            2
        } else {
            1
        }
    }
}
