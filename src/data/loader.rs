// src/data/loader.rs

use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path, sync::Arc};
use tracing::{debug, info};

use super::{
    row::{Header, Row},
    Dataset,
};
use crate::error::{DashError, Result};

/// Load the whole CSV at `path` into memory, in file order.
///
/// The first record is the header. The file handle is dropped before returning.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DashError::file_access(path, e))?;
    let dataset = read_dataset(file)?;
    info!(rows = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Parse delimited text from any reader. Ragged records are rejected.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let names: Vec<String> = rdr
        .headers()
        .map_err(|e| DashError::Parse(format!("reading header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(DashError::Parse("missing header row".into()));
    }
    debug!(columns = names.len(), "parsed header");
    let header = Arc::new(Header::new(names));

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            DashError::Parse(format!("CSV parse error at record {}: {}", idx + 1, e))
        })?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        let values = record.iter().map(str::to_string).collect();
        rows.push(Row::new(Arc::clone(&header), values, line));
    }

    Ok(Dataset::new(header, rows))
}
