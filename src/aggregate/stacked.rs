// src/aggregate/stacked.rs

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

use super::{dedup_ordered, ensure_columns, select};
use crate::{data::Dataset, error::Result};

/// Per-country, per-year sums for one indicator. Every requested
/// `(country, year)` pair is present; pairs without data hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBars {
    pub indicator: String,
    /// Requested years, in stacking order.
    pub years: Vec<i32>,
    /// Requested countries, in bar order.
    pub countries: Vec<String>,
    pub values: BTreeMap<String, BTreeMap<i32, f64>>,
}

/// One stacked piece of a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub year: i32,
    pub bottom: f64,
    pub top: f64,
}

/// Sum `indicator` values per country for each requested year.
///
/// Every matching row adds its value to the bucket of its year, so repeated
/// `(indicator, year)` rows accumulate rather than overwrite.
#[tracing::instrument(level = "debug", skip(dataset, years, countries))]
pub fn aggregate_stacked(
    dataset: &Dataset,
    indicator: &str,
    years: &[i32],
    countries: &[String],
) -> Result<StackedBars> {
    let years = dedup_ordered(years);
    let countries = dedup_ordered(countries);
    ensure_columns(dataset.header(), &countries)?;

    let mut values: BTreeMap<String, BTreeMap<i32, f64>> = countries
        .iter()
        .map(|c| (c.clone(), years.iter().map(|&y| (y, 0.0)).collect()))
        .collect();

    let wanted: HashSet<i32> = years.iter().copied().collect();
    let mut matched = 0usize;
    for hit in select(dataset, indicator, |y| wanted.contains(&y)) {
        let (year, row) = hit?;
        matched += 1;
        trace!(line = row.line(), year, "stacked row");
        for country in &countries {
            let v = row.number_for(country)?;
            if let Some(bucket) = values.get_mut(country).and_then(|m| m.get_mut(&year)) {
                *bucket += v;
            }
        }
    }
    debug!(matched, countries = countries.len(), "stacked aggregation done");

    Ok(StackedBars {
        indicator: indicator.to_string(),
        years,
        countries,
        values,
    })
}

impl StackedBars {
    pub fn value(&self, country: &str, year: i32) -> f64 {
        self.values
            .get(country)
            .and_then(|m| m.get(&year))
            .copied()
            .unwrap_or(0.0)
    }

    /// Segments for each country, bottom to top in year order.
    pub fn stacks(&self) -> Vec<(&str, Vec<Segment>)> {
        self.countries
            .iter()
            .map(|country| {
                let mut base = 0.0;
                let segments = self
                    .years
                    .iter()
                    .map(|&year| {
                        let top = base + self.value(country, year);
                        let seg = Segment {
                            year,
                            bottom: base,
                            top,
                        };
                        base = top;
                        seg
                    })
                    .collect();
                (country.as_str(), segments)
            })
            .collect()
    }

    /// `(lowest, highest)` extent over all stack boundaries, always including 0.
    pub fn value_range(&self) -> (f64, f64) {
        self.stacks()
            .iter()
            .flat_map(|(_, segs)| segs.iter().flat_map(|s| [s.bottom, s.top]))
            .fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fixtures::{countries, init_test_logging, sample, LIQUID, SOLID};
    use crate::data::read_dataset;
    use crate::error::DashError;

    #[test]
    fn single_row_degenerates_to_assignment() -> Result<()> {
        let ds = read_dataset("Indicator Name,Year,India,Canada\nX,2000,50,20\n".as_bytes())?;
        let bars = aggregate_stacked(&ds, "X", &[2000], &countries(&["India", "Canada"]))?;
        assert_eq!(bars.values["India"][&2000], 50.0);
        assert_eq!(bars.values["Canada"][&2000], 20.0);
        assert_eq!(bars.values.len(), 2);
        Ok(())
    }

    #[test]
    fn every_requested_pair_present_and_zero_filled() -> Result<()> {
        init_test_logging();
        let ds = sample();
        let years = [1991, 1993, 1995, 1997];
        let names = countries(&["India", "Canada", "Germany"]);
        let bars = aggregate_stacked(&ds, SOLID, &years, &names)?;

        for c in &names {
            for y in years {
                assert!(bars.values[c].contains_key(&y), "missing {c}/{y}");
            }
        }
        assert_eq!(bars.value("India", 1997), 0.0);
        assert_eq!(bars.value("Germany", 1995), 44.0);
        // liquid rows never leak into the solid buckets
        assert_eq!(bars.value("India", 1991), 70.1);
        Ok(())
    }

    #[test]
    fn repeated_rows_accumulate() -> Result<()> {
        let text = "Indicator Name,Year,India\nX,2000,1.5\nY,2000,9\nX,2000,2.5\n";
        let ds = read_dataset(text.as_bytes())?;
        let bars = aggregate_stacked(&ds, "X", &[2000], &countries(&["India"]))?;
        assert_eq!(bars.value("India", 2000), 4.0);
        Ok(())
    }

    #[test]
    fn idempotent_over_same_dataset() -> Result<()> {
        let ds = sample();
        let names = countries(&["India", "Germany"]);
        let a = aggregate_stacked(&ds, LIQUID, &[1991, 1993], &names)?;
        let b = aggregate_stacked(&ds, LIQUID, &[1991, 1993], &names)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn stacks_are_cumulative_in_year_order() -> Result<()> {
        let ds = sample();
        let bars = aggregate_stacked(&ds, SOLID, &[1993, 1991], &countries(&["Canada"]))?;
        let stacks = bars.stacks();
        let (name, segs) = &stacks[0];
        assert_eq!(*name, "Canada");
        assert_eq!(segs[0].year, 1993);
        assert_eq!(segs[0].bottom, 0.0);
        assert_eq!(segs[0].top, 22.0);
        assert_eq!(segs[1].bottom, 22.0);
        assert!((segs[1].top - 43.5).abs() < 1e-9);
        assert_eq!(bars.value_range(), (0.0, segs[1].top));
        Ok(())
    }

    #[test]
    fn unknown_country_is_missing_column() {
        let ds = sample();
        let err = aggregate_stacked(&ds, SOLID, &[1991], &countries(&["Atlantis"])).unwrap_err();
        assert!(matches!(err, DashError::MissingColumn(c) if c == "Atlantis"));
    }

    #[test]
    fn empty_cell_on_matching_row_fails() -> Result<()> {
        let text = "Indicator Name,Year,India\nX,2000,\n";
        let ds = read_dataset(text.as_bytes())?;
        let err = aggregate_stacked(&ds, "X", &[2000], &countries(&["India"])).unwrap_err();
        assert!(matches!(err, DashError::Parse(_)));
        Ok(())
    }
}
