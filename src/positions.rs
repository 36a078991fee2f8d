//! Reader for point sets stored one `x,y` pair per line.

use std::str::FromStr;

use thiserror::Error;

use quadtree::geometry::Point;

#[derive(Debug, Error)]
pub enum PositionsError {
    #[error("Line {line}: expected \"x,y\", but got \"{got}\"")]
    MissingSeparator { line: usize, got: String },

    #[error("Line {line}: failed to convert \"{str}\"")]
    InvalidCoordinate { line: usize, str: String },
}

/// Parses every position in `text`. Blank lines and lines starting with `#` are skipped.
pub fn parse_positions(text: &str) -> Result<Vec<Point>, PositionsError> {
    let mut positions = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        let n = i + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((x, y)) = line.split_once(',') else {
            return Err(PositionsError::MissingSeparator {
                line: n,
                got: line.to_string(),
            });
        };

        positions.push(Point::new(convert(n, x)?, convert(n, y)?));
    }

    Ok(positions)
}

/// Converts one trimmed coordinate. Infinities and NaN are refused since they can't be stored.
fn convert(line: usize, s: &str) -> Result<f32, PositionsError> {
    let s = s.trim();

    match f32::from_str(s) {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PositionsError::InvalidCoordinate {
            line,
            str: s.to_string(),
        }),
    }
}
