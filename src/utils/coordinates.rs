use crate::error::{DashboardError, Result};
use crate::utils::constants::MISSING_MARKERS;

/// Parse a decimal-degree coordinate cell.
///
/// Returns `None` when the cell holds a missing-value marker (empty, `NaN`,
/// `null`, ...), which is how spreadsheet exports write absent coordinates.
pub fn parse_coordinate(cell: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell.to_lowercase().as_str()) {
        return Ok(None);
    }

    // regional exports write decimal commas
    let value = cell
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| DashboardError::InvalidCoordinate(format!("'{}' is not a number", cell)))?;

    Ok(value.is_finite().then_some(value))
}

/// Reject points that cannot be placed on the map
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    let checks = [
        ("Latitude", latitude, 90.0),
        ("Longitude", longitude, 180.0),
    ];

    for (name, value, limit) in checks {
        if !(-limit..=limit).contains(&value) {
            return Err(DashboardError::InvalidCoordinate(format!(
                "{} {} outside [-{}, {}]",
                name, value, limit, limit
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("-33.4489").unwrap(), Some(-33.4489));
        assert_eq!(parse_coordinate(" 4,5 ").unwrap(), Some(4.5));
        assert!(parse_coordinate("50:30:15").is_err());
        assert!(parse_coordinate("north").is_err());
    }

    #[test]
    fn test_parse_missing_coordinate() {
        assert_eq!(parse_coordinate("").unwrap(), None);
        assert_eq!(parse_coordinate("NaN").unwrap(), None);
        assert_eq!(parse_coordinate(" null ").unwrap(), None);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(validate_coordinates(-33.45, -70.66).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, 181.0).is_err());
    }
}
