// src/aggregate/timeseries.rs

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{dedup_ordered, ensure_columns, select};
use crate::{data::Dataset, error::Result};

/// How points of a line are ordered after the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointOrder {
    /// The order rows appear in the input. Only chronological if the file is.
    #[default]
    FileOrder,
    /// Stable sort by year after the scan.
    ByYear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub country: String,
    /// Rank of the country in the request, used as the depth axis.
    pub index: usize,
    pub points: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub indicator: String,
    pub start: i32,
    pub end: i32,
    pub series: Vec<LineSeries>,
}

/// Collect `(year, value)` points per country for rows of `indicator` with a
/// year in `start..=end`.
#[tracing::instrument(level = "debug", skip(dataset, countries))]
pub fn aggregate_time_series(
    dataset: &Dataset,
    indicator: &str,
    start: i32,
    end: i32,
    countries: &[String],
    order: PointOrder,
) -> Result<TimeSeries> {
    let countries = dedup_ordered(countries);
    ensure_columns(dataset.header(), &countries)?;

    let mut series: Vec<LineSeries> = countries
        .into_iter()
        .enumerate()
        .map(|(index, country)| LineSeries {
            country,
            index,
            points: Vec::new(),
        })
        .collect();

    for hit in select(dataset, indicator, |y| (start..=end).contains(&y)) {
        let (year, row) = hit?;
        for s in series.iter_mut() {
            s.points.push((year, row.number_for(&s.country)?));
        }
    }

    if order == PointOrder::ByYear {
        for s in series.iter_mut() {
            s.points.sort_by_key(|&(year, _)| year);
        }
    }
    debug!(
        points = series.first().map_or(0, |s| s.points.len()),
        ?order,
        "time series aggregation done"
    );

    Ok(TimeSeries {
        indicator: indicator.to_string(),
        start,
        end,
        series,
    })
}

impl TimeSeries {
    /// `(min, max)` of all values, `None` when there are no points.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, v)| v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}
