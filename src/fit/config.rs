//! Configuration options for the fitting loop.

use serde::{Deserialize, Serialize};

/// Observation weights for the error sum.
///
/// Each sample contributes `(y - f(x))^2 / (1 / w^2)` to the error, so a
/// larger weight makes its sample count for more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Weights {
    /// One weight broadcast to every sample.
    Uniform(f64),
    /// One weight per sample, index-aligned with the data series.
    PerSample(Vec<f64>),
}

impl Weights {
    /// The `1 / w^2` divisor for sample `index`.
    pub(crate) fn weight_square(&self, index: usize) -> f64 {
        let w = match self {
            Weights::Uniform(w) => *w,
            Weights::PerSample(ws) => ws[index],
        };
        1.0 / w.powi(2)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::Uniform(1.0)
    }
}

/// Finite-difference step sizes for the Jacobian estimate.
///
/// A per-parameter entry that is absent or exactly zero freezes that
/// parameter: its Jacobian row stays zero, so the perturbation never moves
/// it. This is how a caller fixes a parameter without removing it from the
/// vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GradientDifference {
    /// One step size shared by every parameter.
    Scalar(f64),
    /// One step size per parameter; missing trailing entries count as zero.
    PerParameter(Vec<f64>),
}

impl GradientDifference {
    /// The step size for parameter `index`.
    pub(crate) fn step(&self, index: usize) -> f64 {
        match self {
            GradientDifference::Scalar(delta) => *delta,
            GradientDifference::PerParameter(deltas) => deltas.get(index).copied().unwrap_or(0.0),
        }
    }
}

impl Default for GradientDifference {
    fn default() -> Self {
        GradientDifference::Scalar(10e-2)
    }
}

/// Options controlling the Levenberg-Marquardt iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Initial damping factor. Must be positive. Default: 1e-2
    pub damping: f64,

    /// Factor applied to the damping when a step is rejected. Default: 11
    pub damping_step_up: f64,

    /// Factor dividing the damping when a step is accepted. Default: 9
    pub damping_step_down: f64,

    /// Maximum number of iterations. Default: 100
    pub max_iterations: usize,

    /// Error at or below which the iteration stops. Default: 1e-7
    pub error_tolerance: f64,

    /// Use two-sided differences for the Jacobian. Default: false
    pub central_difference: bool,

    /// Finite-difference step sizes. Default: scalar 10e-2
    pub gradient_difference: GradientDifference,

    /// Observation weights. Default: uniform 1
    pub weights: Weights,

    /// Minimum improvement ratio required to trust a step. Default: 1e-3
    pub improvement_threshold: f64,

    /// Per-parameter lower bounds, index-aligned; missing trailing entries
    /// leave those parameters unbounded. Default: empty
    pub min_values: Vec<f64>,

    /// Per-parameter upper bounds, index-aligned; missing trailing entries
    /// leave those parameters unbounded. Default: empty
    pub max_values: Vec<f64>,

    /// Starting parameters. When empty, a vector of ones of the model's
    /// arity is used. Default: empty
    pub initial_values: Vec<f64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            damping: 1e-2,
            damping_step_up: 11.0,
            damping_step_down: 9.0,
            max_iterations: 100,
            error_tolerance: 1e-7,
            central_difference: false,
            gradient_difference: GradientDifference::default(),
            weights: Weights::default(),
            improvement_threshold: 1e-3,
            min_values: Vec::new(),
            max_values: Vec::new(),
            initial_values: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = FitConfig::default();

        assert_eq!(config.damping, 1e-2);
        assert_eq!(config.damping_step_up, 11.0);
        assert_eq!(config.damping_step_down, 9.0);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.error_tolerance, 1e-7);
        assert!(!config.central_difference);
        assert_eq!(config.gradient_difference, GradientDifference::Scalar(10e-2));
        assert_eq!(config.weights, Weights::Uniform(1.0));
        assert_eq!(config.improvement_threshold, 1e-3);
        assert!(config.min_values.is_empty());
        assert!(config.max_values.is_empty());
        assert!(config.initial_values.is_empty());
    }

    #[test]
    fn test_gradient_difference_per_parameter_steps() {
        let steps = GradientDifference::PerParameter(vec![0.01, 0.0, 0.1]);

        assert_eq!(steps.step(0), 0.01);
        assert_eq!(steps.step(1), 0.0);
        assert_eq!(steps.step(2), 0.1);
        // Beyond the supplied entries the step is zero.
        assert_eq!(steps.step(3), 0.0);
    }

    #[test]
    fn test_weight_square_is_inverse_square() {
        let uniform = Weights::Uniform(2.0);
        assert_eq!(uniform.weight_square(0), 0.25);
        assert_eq!(uniform.weight_square(7), 0.25);

        let per_sample = Weights::PerSample(vec![1.0, 2.0]);
        assert_eq!(per_sample.weight_square(0), 1.0);
        assert_eq!(per_sample.weight_square(1), 0.25);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let mut config = FitConfig::default();
        config.gradient_difference = GradientDifference::PerParameter(vec![0.01, 0.0]);
        config.weights = Weights::PerSample(vec![1.0, 2.0, 3.0]);

        let json = serde_json::to_string(&config).unwrap();
        let back: FitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
