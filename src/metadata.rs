//! The flat key/value metadata record attached to an instrument export.
//!
//! The table keeps its rows in file order; the derived map carries defined
//! insertion-order semantics (later duplicate keys win) so that rebuilding
//! the table after a mutation is a documented contract instead of an
//! accident of dictionary iteration.

use indexmap::IndexMap;
use polars::prelude::DataFrame;

use crate::error::Error;

/// Metadata key holding the delimiter-joined column names.
pub const LABEL_KEY: &str = "columns";
/// Metadata key holding the delimiter-joined column units.
pub const UNITS_KEY: &str = "col_units";
/// Delimiter between entries in the label and unit values.
pub const LABEL_DELIMITER: &str = "|";
/// Column name of the time axis.
pub const TIME_LABEL: &str = "time";
/// Metadata key holding the acquisition timestamp.
pub const TIMESTAMP_KEY: &str = "start_time";

/// Key to value mapping derived from a [`MetadataTable`], insertion ordered.
pub type MetadataMap = IndexMap<String, String>;

/// A two-column (key, value) table, one row per key, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTable {
    rows: Vec<(String, String)>,
}

impl MetadataTable {
    pub fn new(rows: Vec<(String, String)>) -> Self {
        Self { rows }
    }

    /// Build from a headerless two-column string DataFrame as read from a
    /// metadata CSV.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, Error> {
        if df.width() != 2 {
            return Err(Error::MalformedMetadata {
                reason: format!("expected 2 columns, found {}", df.width()),
            });
        }
        let columns = df.get_columns();
        let keys = columns[0].as_materialized_series().str()?;
        let values = columns[1].as_materialized_series().str()?;

        let mut rows = Vec::with_capacity(df.height());
        for (key, value) in keys.iter().zip(values.iter()) {
            let key = key.ok_or_else(|| Error::MalformedMetadata {
                reason: "null metadata key".to_string(),
            })?;
            rows.push((key.to_string(), value.unwrap_or_default().to_string()));
        }
        Ok(Self { rows })
    }

    /// Rebuild a table from a map, taking the map's iteration order as the
    /// new row order.
    pub fn from_map(map: &MetadataMap) -> Self {
        Self {
            rows: map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Derive the key/value map. Rows are inserted in order; a later
    /// duplicate key overwrites the earlier value but keeps the earlier
    /// position. An empty table yields an empty map.
    pub fn to_map(&self) -> MetadataMap {
        let mut map = MetadataMap::with_capacity(self.rows.len());
        for (key, value) in &self.rows {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Serialize the derived map as a flat JSON object, insertion order
    /// preserved.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_map())?)
    }

    /// Look up `key` in the derived map and split its value on `delimiter`,
    /// verbatim. Empty tokens from leading, trailing, or doubled delimiters
    /// are kept; downstream positional lookups rely on the raw split.
    pub fn labels(&self, key: &str, delimiter: &str) -> Result<Vec<String>, Error> {
        let map = self.to_map();
        let value = map.get(key).ok_or_else(|| Error::KeyMissing {
            key: key.to_string(),
        })?;
        Ok(value.split(delimiter).map(str::to_string).collect())
    }
}
