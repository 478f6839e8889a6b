// src/data/row.rs

use std::{collections::HashMap, sync::Arc};

use crate::error::{DashError, Result};

/// Column holding the indicator name of each record.
pub const INDICATOR_COLUMN: &str = "Indicator Name";
/// Column holding the observation year of each record.
pub const YEAR_COLUMN: &str = "Year";

/// Column names of a loaded file, in file order, with a lookup index.
#[derive(Debug, PartialEq)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    pub fn new(names: Vec<String>) -> Self {
        // later duplicates win, matching dict-style record readers
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// True for the two key columns that are not per-country values.
    pub fn is_key_column(column: &str) -> bool {
        column == INDICATOR_COLUMN || column == YEAR_COLUMN
    }
}

/// One CSV record. Cells are kept as text; numeric parsing happens at the
/// aggregation boundary through [`Row::number_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    header: Arc<Header>,
    values: Vec<String>,
    /// 1-based line of the record in its source, for error messages.
    line: u64,
}

impl Row {
    pub fn new(header: Arc<Header>, values: Vec<String>, line: u64) -> Self {
        Self {
            header,
            values,
            line,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    /// Raw cell text for `column`, `None` if the header has no such column.
    pub fn value_for(&self, column: &str) -> Option<&str> {
        self.header
            .position(column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Raw cell text for `column`, failing when the column is not in the header.
    pub fn require(&self, column: &str) -> Result<&str> {
        self.value_for(column)
            .ok_or_else(|| DashError::MissingColumn(column.to_string()))
    }

    pub fn indicator(&self) -> Result<&str> {
        self.require(INDICATOR_COLUMN)
    }

    pub fn year(&self) -> Result<i32> {
        let raw = self.require(YEAR_COLUMN)?;
        raw.trim().parse::<i32>().map_err(|e| {
            DashError::Parse(format!(
                "line {}: year {:?} is not an integer: {}",
                self.line, raw, e
            ))
        })
    }

    /// Parses the cell for `column` as a float. Empty cells are a parse error.
    pub fn number_for(&self, column: &str) -> Result<f64> {
        let raw = self.require(column)?;
        parse_number(raw).map_err(|e| {
            DashError::Parse(format!(
                "line {}: column {:?} value {:?}: {}",
                self.line, column, raw, e
            ))
        })
    }

    /// `(column, value)` pairs in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .names()
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// True if this row carries `indicator`. Rows without the column never match.
    pub fn has_indicator(&self, indicator: &str) -> bool {
        self.value_for(INDICATOR_COLUMN) == Some(indicator)
    }
}

fn parse_number(raw: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    raw.trim().parse::<f64>()
}
