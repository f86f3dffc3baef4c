//! Chart assembly from the dataset and PNG rendering via plotters.

use std::path::Path;

use polars::prelude::*;

use crate::error::Error;

/// One plotted series: legend name and (time, value) points.
#[derive(Debug)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// A fully assembled chart, ready to render.
#[derive(Debug)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

fn column_values(df: &DataFrame, index: usize, label: &str) -> Result<Vec<Option<f64>>, Error> {
    let column = df
        .get_columns()
        .get(index)
        .ok_or_else(|| Error::ColumnNotFound {
            column: label.to_string(),
        })?;
    let cast = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(cast.f64()?.iter().collect())
}

fn position_of(labels: &[String], name: &str) -> Result<usize, Error> {
    labels
        .iter()
        .position(|label| label == name)
        .ok_or_else(|| Error::ColumnNotFound {
            column: name.to_string(),
        })
}

/// Assemble a chart of `selected` columns against the time column.
///
/// The X-axis label uses the first entry of the unit list, not the time
/// column's own unit index. The Y-axis label is the deduplicated units of
/// the selected columns in first-occurrence order. Rows where either
/// coordinate is missing or non-finite are skipped.
pub fn build_chart(
    df: &DataFrame,
    labels: &[String],
    units: &[String],
    time_label: &str,
    selected: &[String],
) -> Result<ChartSpec, Error> {
    let time_index = position_of(labels, time_label)?;
    let time = column_values(df, time_index, time_label)?;

    let mut series = Vec::with_capacity(selected.len());
    let mut seen_units: Vec<String> = Vec::new();

    for name in selected {
        let index = position_of(labels, name)?;
        let unit = units
            .get(index)
            .ok_or_else(|| Error::ColumnNotFound {
                column: name.clone(),
            })?;
        if !seen_units.contains(unit) {
            seen_units.push(unit.clone());
        }

        let values = column_values(df, index, name)?;
        let points: Vec<(f64, f64)> = time
            .iter()
            .zip(values.iter())
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                _ => None,
            })
            .collect();

        series.push(ChartSeries {
            name: name.clone(),
            points,
        });
    }

    Ok(ChartSpec {
        title: format!("{selected:?} vs Time"),
        x_label: format!("Time ({})", units.first().map(String::as_str).unwrap_or("")),
        y_label: seen_units.join(", "),
        series,
    })
}

fn bounds(series: &[ChartSeries]) -> Option<(f64, f64, f64, f64)> {
    let mut iter = series.iter().flat_map(|s| s.points.iter().copied());
    let first = iter.next()?;
    let init = (first.0, first.0, first.1, first.1);
    Some(iter.fold(init, |(x0, x1, y0, y1), (x, y)| {
        (x0.min(x), x1.max(x), y0.min(y), y1.max(y))
    }))
}

fn render_inner(path: &Path, spec: &ChartSpec) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    let (x_min, x_max, y_min, y_max) =
        bounds(&spec.series).ok_or("no data points to plot")?;
    // Pad degenerate ranges so the axes stay drawable.
    let (x_min, x_max) = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min - 0.5, x_max + 0.5)
    };
    let (y_min, y_max) = if y_max > y_min {
        (y_min, y_max)
    } else {
        (y_min - 0.5, y_max + 0.5)
    };

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 20))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;

    let colors = [
        BLUE,
        RED,
        GREEN,
        MAGENTA,
        CYAN,
        RGBColor(255, 140, 0),
        RGBColor(128, 0, 128),
    ];

    for (index, s) in spec.series.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let color = colors[index % colors.len()];
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color))?
            .label(s.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Write the chart to `path` as a PNG.
pub fn render_png(path: &Path, spec: &ChartSpec) -> Result<(), Error> {
    render_inner(path, spec).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_df() -> DataFrame {
        df!(
            "c0" => &[0.0_f64, 1.0, 2.0],
            "c1" => &[Some(10.0_f64), None, Some(30.0)],
            "c2" => &[5.0_f64, 6.0, 7.0]
        )
        .unwrap()
    }

    #[test]
    fn assembles_series_and_labels() {
        let labels = strings(&["time", "pressure", "temp"]);
        let units = strings(&["s", "bar", "degC"]);
        let spec = build_chart(
            &sample_df(),
            &labels,
            &units,
            "time",
            &strings(&["pressure", "temp"]),
        )
        .unwrap();

        assert_eq!(spec.series.len(), 2);
        // The null pressure row is skipped.
        assert_eq!(spec.series[0].points, vec![(0.0, 10.0), (2.0, 30.0)]);
        assert_eq!(
            spec.series[1].points,
            vec![(0.0, 5.0), (1.0, 6.0), (2.0, 7.0)]
        );
        assert_eq!(spec.x_label, "Time (s)");
        assert_eq!(spec.y_label, "bar, degC");
        assert_eq!(spec.title, r#"["pressure", "temp"] vs Time"#);
    }

    #[test]
    fn duplicate_units_are_deduplicated() {
        let labels = strings(&["time", "a", "b"]);
        let units = strings(&["s", "V", "V"]);
        let spec =
            build_chart(&sample_df(), &labels, &units, "time", &strings(&["a", "b"])).unwrap();
        assert_eq!(spec.y_label, "V");
    }

    #[test]
    fn missing_time_column_errors() {
        let labels = strings(&["a", "b", "c"]);
        let units = strings(&["", "", ""]);
        let err = build_chart(&sample_df(), &labels, &units, "time", &strings(&["a"]))
            .unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { column } if column == "time"));
    }

    #[test]
    fn renders_png_to_disk() {
        let labels = strings(&["time", "pressure", "temp"]);
        let units = strings(&["s", "bar", "degC"]);
        let spec = build_chart(
            &sample_df(),
            &labels,
            &units,
            "time",
            &strings(&["pressure"]),
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        render_png(&path, &spec).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn render_without_points_errors() {
        let spec = ChartSpec {
            title: "empty".to_string(),
            x_label: String::new(),
            y_label: String::new(),
            series: vec![],
        };
        let dir = tempfile::tempdir().unwrap();
        let err = render_png(&dir.path().join("none.png"), &spec).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }
}
