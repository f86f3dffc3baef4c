//! Per-column descriptive statistics and the rundown table.

use comfy_table::Table;
use polars::prelude::*;

use crate::error::Error;

/// Descriptive statistics for one selected column. All measures skip
/// missing values; `missing_pct` reports them against the full row count.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub missing_pct: f64,
}

/// Non-null values of a numeric series as f64.
fn numeric_values(series: &Series) -> Result<Vec<f64>, Error> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.iter().flatten().collect())
}

fn median_of(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

/// Summarize a numeric series. Standard deviation is the sample statistic
/// (ddof = 1).
pub fn summarize_column(series: &Series, name: &str, unit: &str) -> Result<ColumnSummary, Error> {
    let total = series.len();
    let missing = series.null_count();
    let missing_pct = if total == 0 {
        0.0
    } else {
        missing as f64 / total as f64 * 100.0
    };

    let mut values = numeric_values(series)?;
    let min = series.min::<f64>()?.unwrap_or(f64::NAN);
    let max = series.max::<f64>()?.unwrap_or(f64::NAN);
    let mean = series.mean().unwrap_or(f64::NAN);
    let std = series.std(1).unwrap_or(f64::NAN);
    let median = median_of(&mut values);

    Ok(ColumnSummary {
        name: name.to_string(),
        unit: unit.to_string(),
        min,
        max,
        mean,
        median,
        std,
        missing_pct,
    })
}

/// Compact display for a statistic: whole numbers without a fraction,
/// everything else with up to four decimals.
fn format_stat(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if (value - value.round()).abs() < 1e-10 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Assemble the row-labeled rundown table: one column per summary, fixed
/// parameter row order.
pub fn rundown_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();

    let mut header = vec!["Parameter".to_string()];
    header.extend(summaries.iter().map(|s| s.name.clone()));
    table.set_header(header);

    let rows: [(&str, fn(&ColumnSummary) -> String); 7] = [
        ("Column Units", |s| s.unit.clone()),
        ("Min Value", |s| format_stat(s.min)),
        ("Max Value", |s| format_stat(s.max)),
        ("Average", |s| format_stat(s.mean)),
        ("Median", |s| format_stat(s.median)),
        ("Standard Deviation", |s| format_stat(s.std)),
        ("Missing Data %", |s| format_stat(s.missing_pct)),
    ];
    for (label, cell) in rows {
        let mut row = vec![label.to_string()];
        row.extend(summaries.iter().map(cell));
        table.add_row(row);
    }

    table
}
