//! The interactive session object wrapping one dataset and one metadata
//! table.
//!
//! All operations re-derive the metadata map and label lists on every call,
//! so a metadata replacement (timestamp extraction) is visible immediately.
//! The label list's order defines the positional correspondence to dataset
//! columns; that correspondence is taken on trust, never verified.

use polars::prelude::DataFrame;

use crate::chart::{self, ChartSpec};
use crate::dialog::select_columns;
use crate::error::Error;
use crate::input::{read_yes_no, InputSource};
use crate::metadata::{
    MetadataMap, MetadataTable, LABEL_DELIMITER, LABEL_KEY, TIME_LABEL, UNITS_KEY,
};
use crate::summary::{rundown_table, summarize_column, ColumnSummary};

/// Which metadata keys drive label and unit resolution.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    pub label_key: String,
    pub units_key: String,
    pub delimiter: String,
    pub time_label: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_key: LABEL_KEY.to_string(),
            units_key: UNITS_KEY.to_string(),
            delimiter: LABEL_DELIMITER.to_string(),
            time_label: TIME_LABEL.to_string(),
        }
    }
}

/// One interactive session over a dataset and its metadata.
pub struct DataProcessor<I: InputSource> {
    data: DataFrame,
    metadata: MetadataTable,
    config: LabelConfig,
    input: I,
}

impl<I: InputSource> DataProcessor<I> {
    pub fn new(data: DataFrame, metadata: MetadataTable, config: LabelConfig, input: I) -> Self {
        Self {
            data,
            metadata,
            config,
            input,
        }
    }

    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Key/value map derived fresh from the current metadata table.
    pub fn metadata_map(&self) -> MetadataMap {
        self.metadata.to_map()
    }

    /// The metadata map as a flat JSON object, insertion order preserved.
    pub fn metadata_json(&self) -> Result<String, Error> {
        self.metadata.to_json()
    }

    /// Ordered column names from the configured label key.
    pub fn data_labels(&self) -> Result<Vec<String>, Error> {
        self.metadata
            .labels(&self.config.label_key, &self.config.delimiter)
    }

    /// Ordered column units from the configured units key.
    pub fn unit_labels(&self) -> Result<Vec<String>, Error> {
        self.metadata
            .labels(&self.config.units_key, &self.config.delimiter)
    }

    /// Run the selection dialog over the non-time columns.
    pub fn desired_data(&mut self) -> Result<Vec<String>, Error> {
        let labels = self.data_labels()?;
        select_columns(&mut self.input, &labels, &self.config.time_label)
    }

    /// Plot user-selected columns against the time column, render a preview
    /// PNG, and offer to persist it. Returns the saved filename, if any.
    pub fn visualize_data(&mut self) -> Result<Option<String>, Error> {
        let labels = self.data_labels()?;
        let units = self.unit_labels()?;
        // The time column must exist before the user is asked anything.
        if !labels.iter().any(|label| label == &self.config.time_label) {
            return Err(Error::ColumnNotFound {
                column: self.config.time_label.clone(),
            });
        }
        let selected = select_columns(&mut self.input, &labels, &self.config.time_label)?;
        let spec = chart::build_chart(
            &self.data,
            &labels,
            &units,
            &self.config.time_label,
            &selected,
        )?;

        // The preview file is removed when it drops, after the save prompt.
        let preview = tempfile::Builder::new()
            .prefix(&format!("{}-preview-", crate::APP_NAME))
            .suffix(".png")
            .tempfile()?;
        chart::render_png(preview.path(), &spec)?;
        println!("Rendered preview to {}", preview.path().display());

        println!("Would you like to save the plot?");
        if read_yes_no(&mut self.input)? {
            return Ok(Some(self.save_plot(&spec)?));
        }
        Ok(None)
    }

    /// Persist a chart where the user asks. Saving outside the working
    /// directory joins path and filename by plain string concatenation, and
    /// a failed write re-prompts for both with no retry limit.
    pub fn save_plot(&mut self, spec: &ChartSpec) -> Result<String, Error> {
        let cwd = std::env::current_dir()?;
        println!("Your cwd is {}. Would you like to save here?", cwd.display());
        if read_yes_no(&mut self.input)? {
            let name = self.input.read_line("Enter a file name: ")?;
            let file_name = format!("{name}.png");
            chart::render_png(std::path::Path::new(&file_name), spec)?;
            return Ok(file_name);
        }

        loop {
            let path = self.input.read_line("Enter desired file path: ")?;
            let name = self.input.read_line("Enter desired file name: ")?;
            let target = format!("{path}{name}.png");
            match chart::render_png(std::path::Path::new(&target), spec) {
                Ok(()) => return Ok(format!("{name}.png")),
                Err(Error::InputClosed) => return Err(Error::InputClosed),
                Err(e) => {
                    log::debug!("plot save to '{target}' failed: {e}");
                    println!("Please enter a valid file path.");
                }
            }
        }
    }

    /// Print the rundown table of descriptive statistics for user-selected
    /// columns.
    pub fn data_rundown(&mut self) -> Result<(), Error> {
        let summaries = self.rundown_summaries()?;
        println!("{}", rundown_table(&summaries));
        Ok(())
    }

    fn rundown_summaries(&mut self) -> Result<Vec<ColumnSummary>, Error> {
        let labels = self.data_labels()?;
        let units = self.unit_labels()?;
        let selected = select_columns(&mut self.input, &labels, &self.config.time_label)?;

        let mut summaries = Vec::with_capacity(selected.len());
        for name in &selected {
            let index = labels
                .iter()
                .position(|label| label == name)
                .ok_or_else(|| Error::ColumnNotFound {
                    column: name.clone(),
                })?;
            let unit = units.get(index).ok_or_else(|| Error::ColumnNotFound {
                column: name.clone(),
            })?;
            let column =
                self.data
                    .get_columns()
                    .get(index)
                    .ok_or_else(|| Error::ColumnNotFound {
                        column: name.clone(),
                    })?;
            summaries.push(summarize_column(
                column.as_materialized_series(),
                name,
                unit,
            )?);
        }
        Ok(summaries)
    }

    /// Split the timestamp metadata value into date and time, optionally
    /// keeping the date under a user-named key, and replace the metadata
    /// table with the rebuilt record.
    ///
    /// The value must be exactly "DATE TIME" (one space); anything else is
    /// a [`Error::MalformedTimestamp`]. The timestamp key keeps its original
    /// row position; a new date key is appended at the end.
    pub fn extract_timestamp(&mut self, timestamp_key: &str) -> Result<(), Error> {
        let mut map = self.metadata_map();
        let value = map
            .get(timestamp_key)
            .cloned()
            .ok_or_else(|| Error::KeyMissing {
                key: timestamp_key.to_string(),
            })?;

        let parts: Vec<&str> = value.split(' ').collect();
        let [date, time] = parts.as_slice() else {
            return Err(Error::MalformedTimestamp { value });
        };
        let (date, time) = (date.to_string(), time.to_string());

        println!("Would you like to save the date in a separate key?");
        if read_yes_no(&mut self.input)? {
            let date_key = self.input.read_line("Enter a date label name: ")?;
            map.insert(date_key, date);
        }
        map.insert(timestamp_key.to_string(), time);

        self.metadata = MetadataTable::from_map(&map);
        Ok(())
    }
}
