//! The column-selection dialog.
//!
//! Options are presented as a 1-based index over the non-time labels (the
//! number validator only admits strictly positive integers, so indices start
//! at 1). Each accepted pick is removed from the option set, so a column
//! cannot be selected twice. The count prompt is bounded by the option
//! count. The per-pick index prompt is unbounded; out-of-set indices are
//! rejected and re-prompted.

use std::collections::BTreeMap;

use crate::error::Error;
use crate::input::{read_valid_number, InputSource};

fn format_options(options: &BTreeMap<usize, String>) -> String {
    let entries: Vec<String> = options
        .iter()
        .map(|(index, name)| format!("{index}: {name}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Ask the user which columns to work with, excluding `time_label`.
/// Returns the chosen names in pick order, or in original relative order
/// when the full option count is requested.
pub fn select_columns(
    input: &mut dyn InputSource,
    labels: &[String],
    time_label: &str,
) -> Result<Vec<String>, Error> {
    let mut options: BTreeMap<usize, String> = labels
        .iter()
        .filter(|label| label.as_str() != time_label)
        .cloned()
        .enumerate()
        .map(|(i, label)| (i + 1, label))
        .collect();

    println!("DATA OPTIONS: {}", format_options(&options));
    println!("How many columns would you like to select?");
    let requested = read_valid_number(input, Some(options.len()))?;

    let mut picked = Vec::with_capacity(requested);
    if requested == options.len() {
        picked.extend(options.into_values());
        return Ok(picked);
    }

    while picked.len() < requested {
        println!("Select a column number.");
        println!("Options: {}", format_options(&options));
        let mut index = read_valid_number(input, None)?;
        while !options.contains_key(&index) {
            println!("Please enter a valid column number.");
            println!("Options: {}", format_options(&options));
            index = read_valid_number(input, None)?;
        }
        if let Some(name) = options.remove(&index) {
            picked.push(name);
        }
    }
    Ok(picked)
}
