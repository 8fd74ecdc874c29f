//! Ready-made models for common fitting problems.
//!
//! These cover the shapes that come up again and again in practice; anything
//! else can be expressed with [`FnModel`](crate::FnModel) or
//! [`VariadicFnModel`](crate::VariadicFnModel).

use crate::model::ParametricModel;

/// A straight line: f(x) = slope * x + intercept.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearModel;

impl ParametricModel for LinearModel {
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        params[0] * x + params[1]
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn parameter_names(&self) -> Option<Vec<String>> {
        Some(vec!["slope".to_string(), "intercept".to_string()])
    }
}

/// Exponential decay or growth: f(x) = amplitude * exp(-x / decay) + baseline.
///
/// A positive decay constant gives decay, a negative one growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialModel;

impl ParametricModel for ExponentialModel {
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        params[0] * f64::exp(-x / params[1]) + params[2]
    }

    fn arity(&self) -> Option<usize> {
        Some(3)
    }

    fn parameter_names(&self) -> Option<Vec<String>> {
        Some(vec![
            "amplitude".to_string(),
            "decay".to_string(),
            "baseline".to_string(),
        ])
    }
}

/// A sigmoid: f(x) = amplitude / (offset + exp(-x * rate)).
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmoidModel;

impl ParametricModel for SigmoidModel {
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        params[0] / (params[1] + f64::exp(-x * params[2]))
    }

    fn arity(&self) -> Option<usize> {
        Some(3)
    }

    fn parameter_names(&self) -> Option<Vec<String>> {
        Some(vec![
            "amplitude".to_string(),
            "offset".to_string(),
            "rate".to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_model() {
        let model = LinearModel;
        assert_eq!(model.arity(), Some(2));
        assert_eq!(model.eval(&[2.0, -1.0], 3.0), 5.0);
    }

    #[test]
    fn test_exponential_model() {
        let model = ExponentialModel;
        assert_eq!(model.arity(), Some(3));
        assert_relative_eq!(model.eval(&[2.0, 1.0, 0.5], 0.0), 2.5);
        assert_relative_eq!(model.eval(&[2.0, 1.0, 0.5], 1.0), 2.0 * (-1.0f64).exp() + 0.5);
    }

    #[test]
    fn test_sigmoid_model() {
        let model = SigmoidModel;
        assert_eq!(model.arity(), Some(3));
        assert_relative_eq!(model.eval(&[2.0, 2.0, 2.0], 0.0), 2.0 / 3.0);
    }
}
