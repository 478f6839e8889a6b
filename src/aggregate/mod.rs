// src/aggregate/mod.rs

//! Filter-and-reshape passes, one per chart type. Each takes the read-only
//! [`Dataset`] and makes exactly one linear scan per indicator it needs.

pub mod pie;
pub mod scatter;
pub mod stacked;
pub mod timeseries;

pub use pie::{aggregate_pie, PieChart, PieSlice, EXPLODE_OFFSET};
pub use scatter::{aggregate_scatter, Scatter, ScatterSeries};
pub use stacked::{aggregate_stacked, Segment, StackedBars};
pub use timeseries::{aggregate_time_series, LineSeries, PointOrder, TimeSeries};

use std::collections::HashSet;

use crate::{
    data::{Dataset, Header, Row},
    error::{DashError, Result},
};

/// Rows carrying `indicator` whose year passes `keep`, paired with that year.
/// The year is only parsed once the indicator matched, so unrelated rows with
/// odd year cells never fail a pass.
fn select<'a, F>(
    dataset: &'a Dataset,
    indicator: &'a str,
    keep: F,
) -> impl Iterator<Item = Result<(i32, &'a Row)>> + 'a
where
    F: Fn(i32) -> bool + 'a,
{
    dataset
        .with_indicator(indicator)
        .filter_map(move |row| match row.year() {
            Ok(year) if keep(year) => Some(Ok((year, row))),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
}

/// Every requested country must be a header column.
fn ensure_columns(header: &Header, countries: &[String]) -> Result<()> {
    match countries.iter().find(|c| !header.contains(c)) {
        Some(missing) => Err(DashError::MissingColumn(missing.clone())),
        None => Ok(()),
    }
}

/// Drop repeated entries, keeping the first occurrence.
fn dedup_ordered<T: Clone + Eq + std::hash::Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|i| seen.insert((*i).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::data::{read_dataset, Dataset};

    pub const SOLID: &str = "CO2 emissions from solid fuel consumption (% of total)";
    pub const LIQUID: &str = "CO2 emissions from liquid fuel consumption (% of total)";
    pub const GAS: &str = "CO2 emissions from gaseous fuel consumption (% of total)";

    /// A small table shaped like the real input: key columns first, then countries.
    pub fn sample() -> Dataset {
        let text = format!(
            "\
Indicator Name,Year,India,Canada,Germany
{SOLID},1991,70.1,21.5,47.8
{LIQUID},1991,27.4,46.6,35.8
{SOLID},1993,73.4,22.0,45.1
{LIQUID},1995,30.2,45.7,37.0
{LIQUID},1993,28.8,46.0,36.4
{GAS},2002,4.78,31.97,
{SOLID},1995,71.0,23.7,44.0
"
        );
        read_dataset(text.as_bytes()).expect("fixture parses")
    }

    pub fn countries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    pub fn init_test_logging() {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,co2dash=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
