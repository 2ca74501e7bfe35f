use crate::common::PathParseError;
use crate::domains::grid::GridCoord;

/// Ordered cells one agent visits, one per simulation tick.
pub type DronePath = Vec<GridCoord>;

/// Parse free text into one path per line.
///
/// Each line holds whitespace-separated `x,y` tokens with both values in
/// `0..grid_size`. The first bad token or empty line fails the whole input.
pub fn parse_paths(input: &str, grid_size: usize) -> Result<Vec<DronePath>, PathParseError> {
    if input.trim().is_empty() {
        return Err(PathParseError::EmptyInput);
    }

    let mut paths = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let path = line
            .split_whitespace()
            .map(|token| parse_coord(token, grid_size))
            .collect::<Result<DronePath, _>>()?;
        if path.is_empty() {
            return Err(PathParseError::EmptyPath { line: index + 1 });
        }
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(PathParseError::EmptyInput);
    }
    Ok(paths)
}

fn parse_coord(token: &str, grid_size: usize) -> Result<GridCoord, PathParseError> {
    let invalid = || PathParseError::InvalidCoordinate { token: token.to_string() };

    let mut parts = token.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let x: i64 = x.trim().parse().map_err(|_| invalid())?;
    let y: i64 = y.trim().parse().map_err(|_| invalid())?;

    let in_range = |v: i64| v >= 0 && (v as u64) < grid_size as u64;
    if !in_range(x) || !in_range(y) {
        return Err(PathParseError::OutOfBounds { x, y, grid_size });
    }
    Ok(GridCoord::new(x as usize, y as usize))
}

/// Render paths back into the text format accepted by `parse_paths`.
pub fn format_paths(paths: &[DronePath]) -> String {
    paths
        .iter()
        .map(|path| path.iter().map(GridCoord::to_string).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
