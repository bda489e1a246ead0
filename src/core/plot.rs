use crate::utils::error::{ReportError, Result};

/// Parse a plot data file: one `x;y` point per line.
///
/// Blank lines are skipped. Values must be finite numbers.
pub fn parse_plot_data(path: &str, data: &[u8]) -> Result<Vec<(f64, f64)>> {
    let text = std::str::from_utf8(data).map_err(|e| ReportError::PlotDataError {
        path: path.to_string(),
        line: 0,
        message: format!("file is not valid UTF-8: {}", e),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        points.push(parse_point(line).map_err(|message| ReportError::PlotDataError {
            path: path.to_string(),
            line: index + 1,
            message,
        })?);
    }

    tracing::debug!("Parsed {} points from {}", points.len(), path);
    Ok(points)
}

fn parse_point(line: &str) -> std::result::Result<(f64, f64), String> {
    let mut fields = line.split(';');
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected `x;y`, found '{}'", line));
    };
    Ok((parse_value(x)?, parse_value(y)?))
}

fn parse_value(field: &str) -> std::result::Result<f64, String> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("'{}' is not a finite number", field)),
        Err(e) => Err(format!("'{}' is not a number: {}", field, e)),
    }
}
