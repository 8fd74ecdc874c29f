use thiserror::Error;

/// Error types for the lmcurve library.
///
/// Every failure is detected before the iteration loop starts; a fit that
/// diverges mid-loop is not an error and instead returns the best solution
/// seen so far (see [`crate::CurveFitter::fit`]).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Error for invalid fit configuration detected before iterating.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error indicating the x and y series have different lengths.
    #[error("Number of elements in series do not match {x_count}:{y_count}")]
    SeriesCountMismatch { x_count: usize, y_count: usize },
}

/// Result type alias for lmcurve operations.
pub type Result<T> = std::result::Result<T, FitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FitError::InvalidConfiguration("damping must be positive".to_string());
        assert!(format!("{}", err).contains("damping must be positive"));

        let err = FitError::SeriesCountMismatch {
            x_count: 3,
            y_count: 4,
        };
        assert_eq!(
            format!("{}", err),
            "Number of elements in series do not match 3:4"
        );
    }
}
