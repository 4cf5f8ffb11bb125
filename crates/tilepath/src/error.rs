use std::fmt;

use tilepath_core::{Point, Range};

/// Errors returned by the path finder.
///
/// A search that simply finds no route is not an error; it yields `Ok(None)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// A start or target coordinate lies outside the map.
    OutOfBounds { point: Point, bounds: Range },
    /// The finder was configured with an unusable parameter.
    InvalidConfig(&'static str),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { point, bounds } => {
                write!(f, "coordinate {point} is outside map bounds {bounds}")
            }
            Self::InvalidConfig(what) => write!(f, "invalid path finder configuration: {what}"),
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message() {
        let err = PathError::OutOfBounds {
            point: Point::new(5, 0),
            bounds: Range::with_size(5, 5),
        };
        assert_eq!(
            err.to_string(),
            "coordinate (5, 0) is outside map bounds [(0, 0)-(5, 5))"
        );
    }

    #[test]
    fn invalid_config_message() {
        let err = PathError::InvalidConfig("max search distance must be positive");
        assert!(err.to_string().ends_with("max search distance must be positive"));
    }
}
