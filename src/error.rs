// src/error.rs

use plotters::drawing::DrawingAreaErrorKind;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Every failure the library can surface. Nothing is recovered locally; callers
/// propagate these up to the process boundary.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("cannot access {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no row for indicator {indicator:?} in year {year}")]
    Lookup { indicator: String, year: i32 },

    #[error("column {0:?} not present in header")]
    MissingColumn(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("writing summary: {0}")]
    Summary(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DashError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for DashError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        DashError::Render(e.to_string())
    }
}
