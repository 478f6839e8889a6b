// src/aggregate/scatter.rs

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::{dedup_ordered, ensure_columns, select};
use crate::{data::Dataset, error::Result};

/// x/y values of one country, aligned to [`Scatter::years`]. `None` marks a
/// year with no row for that indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub country: String,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub x_indicator: String,
    pub y_indicator: String,
    pub years: Vec<i32>,
    pub series: Vec<ScatterSeries>,
}

/// Pair two indicators per country and year. Each indicator gets its own pass.
#[tracing::instrument(level = "debug", skip(dataset, years, countries))]
pub fn aggregate_scatter(
    dataset: &Dataset,
    x_indicator: &str,
    y_indicator: &str,
    years: &[i32],
    countries: &[String],
) -> Result<Scatter> {
    let countries = dedup_ordered(countries);
    ensure_columns(dataset.header(), &countries)?;

    let x = fill(dataset, x_indicator, years, &countries)?;
    let y = fill(dataset, y_indicator, years, &countries)?;

    let series: Vec<ScatterSeries> = countries
        .into_iter()
        .zip(x.into_iter().zip(y))
        .map(|(country, (x, y))| ScatterSeries { country, x, y })
        .collect();
    debug!(
        missing = series.iter().map(|s| s.missing()).sum::<usize>(),
        "scatter aggregation done"
    );

    Ok(Scatter {
        x_indicator: x_indicator.to_string(),
        y_indicator: y_indicator.to_string(),
        years: years.to_vec(),
        series,
    })
}

/// One pass: per country, a value slot per requested year. A year listed
/// twice fills both of its slots. Last write wins.
fn fill(
    dataset: &Dataset,
    indicator: &str,
    years: &[i32],
    countries: &[String],
) -> Result<Vec<Vec<Option<f64>>>> {
    let mut slots: HashMap<i32, Vec<usize>> = HashMap::new();
    for (i, &year) in years.iter().enumerate() {
        slots.entry(year).or_default().push(i);
    }
    let mut out = vec![vec![None; years.len()]; countries.len()];

    for hit in select(dataset, indicator, |y| slots.contains_key(&y)) {
        let (year, row) = hit?;
        for (c, country) in countries.iter().enumerate() {
            let value = row.number_for(country)?;
            for &slot in &slots[&year] {
                out[c][slot] = Some(value);
            }
        }
    }
    Ok(out)
}

impl ScatterSeries {
    /// Points where both coordinates are known, in year order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
    }

    /// Number of years where at least one coordinate is missing.
    pub fn missing(&self) -> usize {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter(|(x, y)| x.is_none() || y.is_none())
            .count()
    }
}

impl Scatter {
    /// Bounds of the drawable points as `((x_lo, x_hi), (y_lo, y_hi))`.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        self.series
            .iter()
            .flat_map(|s| s.points())
            .fold(None, |acc, (x, y)| match acc {
                None => Some(((x, x), (y, y))),
                Some(((xl, xh), (yl, yh))) => Some((
                    (f64::min(xl, x), f64::max(xh, x)),
                    (f64::min(yl, y), f64::max(yh, y)),
                )),
            })
    }
}
