//! CSV ingestion of the measurement dataset and its metadata table.

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use crate::error::Error;
use crate::metadata::MetadataTable;

/// Read the measurement CSV. Column names in the file are irrelevant: the
/// metadata-derived label list addresses columns by position.
pub fn load_dataset(path: &Path, has_header: bool, delimiter: Option<u8>) -> Result<DataFrame, Error> {
    let pl_path = PlPath::Local(Arc::from(path));
    let mut reader = LazyCsvReader::new(pl_path).with_has_header(has_header);
    if let Some(delimiter) = delimiter {
        reader = reader.with_separator(delimiter);
    }
    Ok(reader.finish()?.collect()?)
}

/// Read the two-column (key, value) metadata CSV. The file has no header
/// and both columns are taken as strings.
pub fn load_metadata(path: &Path) -> Result<MetadataTable, Error> {
    let pl_path = PlPath::Local(Arc::from(path));
    let df = LazyCsvReader::new(pl_path)
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;
    MetadataTable::from_dataframe(&df)
}
