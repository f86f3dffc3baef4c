use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for labdat
#[derive(Parser, Debug)]
#[command(version, about = "labdat")]
pub struct Args {
    /// Measurement data CSV
    pub data: PathBuf,

    /// Metadata CSV (two columns: key, value; no header)
    pub metadata: PathBuf,

    /// Specify that the data file has no header row
    #[arg(long = "no-header", action)]
    pub no_header: bool,

    /// Specify the delimiter to use when reading the data file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Metadata key holding the column names
    #[arg(long = "label-key", default_value = "columns")]
    pub label_key: String,

    /// Metadata key holding the column units
    #[arg(long = "units-key", default_value = "col_units")]
    pub units_key: String,

    /// Delimiter between entries in the label and unit metadata values
    #[arg(long = "label-delimiter", default_value = "|")]
    pub label_delimiter: String,

    /// Name of the time-axis column in the label list
    #[arg(long = "time-label", default_value = "time")]
    pub time_label: String,

    /// Metadata key holding the acquisition timestamp
    #[arg(long = "timestamp-key", default_value = "start_time")]
    pub timestamp_key: String,
}
