//! Plain (x, y) value type shared by data series and prediction output.

use serde::{Deserialize, Serialize};

/// A single (x, y) sample or prediction output.
///
/// A `DataPoint` is freely mutable on its own, but once embedded in a data
/// series or a prediction result it is treated as a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    x: f64,
    y: f64,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The independent (x) value.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The dependent (y) value.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Replace the x value.
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.x = x;
        self
    }

    /// Replace the y value.
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.y = y;
        self
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_and_setters() {
        let mut point = DataPoint::new(1.0, 2.0);
        assert_eq!(point.x(), 1.0);
        assert_eq!(point.y(), 2.0);

        point.set_x(3.0).set_y(4.0);
        assert_eq!(point.x(), 3.0);
        assert_eq!(point.y(), 4.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let point = DataPoint::new(1.5, -2.5);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.5}"#);

        let back: DataPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
