//! labdat: interactive exploration of instrument measurement exports.
//!
//! An export pairs a tabular time-series dataset with a flat key/value
//! metadata record. Column names and units live in the metadata as
//! delimiter-joined strings, positionally aligned with the dataset's
//! columns. The session object lets a user pick columns to plot against
//! time or to summarize statistically, and can persist the plot as a PNG
//! or restructure the timestamp metadata.

pub mod chart;
pub mod cli;
pub mod dialog;
pub mod error;
pub mod input;
pub mod loader;
pub mod metadata;
pub mod processor;
pub mod summary;

pub use cli::Args;
pub use error::Error;
pub use input::{ConsoleInput, InputSource, ScriptedInput};
pub use metadata::{MetadataMap, MetadataTable};
pub use processor::{DataProcessor, LabelConfig};

/// Application name used for temp-file prefixes and other app-specific paths
pub const APP_NAME: &str = "labdat";
