//! Weighted residual evaluation for a model/data pair.

use ndarray::Array1;

use crate::fit::config::Weights;
use crate::model::ParametricModel;

/// Evaluates the model against the data series: the weighted
/// sum-of-squared-residuals error and the raw residual vector.
pub(crate) struct WeightedResiduals<'a> {
    model: &'a dyn ParametricModel,
    x_values: &'a [f64],
    y_values: &'a [f64],
    weight_square: Vec<f64>,
}

impl<'a> WeightedResiduals<'a> {
    pub fn new(
        model: &'a dyn ParametricModel,
        x_values: &'a [f64],
        y_values: &'a [f64],
        weights: &Weights,
    ) -> Self {
        let weight_square = (0..x_values.len()).map(|i| weights.weight_square(i)).collect();
        Self {
            model,
            x_values,
            y_values,
            weight_square,
        }
    }

    /// The model's predictions at every sample.
    pub fn evaluate_curve(&self, params: &[f64]) -> Vec<f64> {
        self.x_values
            .iter()
            .map(|&x| self.model.eval(params, x))
            .collect()
    }

    /// The weighted sum-of-squared-residuals error at `params`.
    pub fn evaluate(&self, params: &[f64]) -> f64 {
        self.x_values
            .iter()
            .zip(self.y_values)
            .zip(&self.weight_square)
            .map(|((&x, &y), &ws)| (y - self.model.eval(params, x)).powi(2) / ws)
            .sum()
    }

    /// The residual column `y_i - f(x_i)`, unsquared and unweighted.
    pub fn vector(&self, evaluated: &[f64]) -> Array1<f64> {
        Array1::from_iter(
            self.y_values
                .iter()
                .zip(evaluated)
                .map(|(&y, &f)| y - f),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinearModel;
    use approx::assert_relative_eq;

    #[test]
    fn test_error_is_zero_for_an_exact_fit() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let residuals = WeightedResiduals::new(&LinearModel, &x, &y, &Weights::default());

        assert_eq!(residuals.evaluate(&[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_error_sums_squared_residuals() {
        let x = [0.0, 1.0];
        let y = [1.0, 4.0];
        let residuals = WeightedResiduals::new(&LinearModel, &x, &y, &Weights::default());

        // Predictions are [1, 3], so the residuals are [0, 1].
        assert_relative_eq!(residuals.evaluate(&[2.0, 1.0]), 1.0);
    }

    #[test]
    fn test_weights_scale_the_error() {
        let x = [0.0, 1.0];
        let y = [1.0, 4.0];

        let uniform = WeightedResiduals::new(&LinearModel, &x, &y, &Weights::Uniform(2.0));
        assert_relative_eq!(uniform.evaluate(&[2.0, 1.0]), 4.0);

        let per_sample =
            WeightedResiduals::new(&LinearModel, &x, &y, &Weights::PerSample(vec![1.0, 3.0]));
        assert_relative_eq!(per_sample.evaluate(&[2.0, 1.0]), 9.0);
    }

    #[test]
    fn test_residual_vector_is_unsquared() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 0.0, 0.0];
        let residuals = WeightedResiduals::new(&LinearModel, &x, &y, &Weights::default());

        let evaluated = residuals.evaluate_curve(&[1.0, 1.0]);
        let r = residuals.vector(&evaluated);

        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], -1.0);
        assert_relative_eq!(r[1], -2.0);
        assert_relative_eq!(r[2], -3.0);
    }
}
