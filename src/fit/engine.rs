//! The Levenberg-Marquardt fit engine.
//!
//! [`CurveFitter`] owns the model, the data series, and the configuration,
//! and runs the damped Gauss-Newton iteration on demand. The last computed
//! [`Curve`] is cached; any configuration change invalidates it and the next
//! [`CurveFitter::fit`] recomputes.

use std::sync::Arc;

use crate::curve::Curve;
use crate::error::{FitError, Result};
use crate::fit::bounds::Bounds;
use crate::fit::config::{FitConfig, GradientDifference, Weights};
use crate::fit::damping::Damping;
use crate::fit::jacobian::sensitivity_matrix;
use crate::fit::residuals::WeightedResiduals;
use crate::linalg;
use crate::model::ParametricModel;
use crate::point::DataPoint;

/// Fits a parametric model to (x, y) data by damped nonlinear least squares.
///
/// The fitter is built up incrementally through its setters, each of which
/// invalidates the cached result. [`fit`](CurveFitter::fit) validates the
/// data series and configuration, runs the iteration, and freezes the
/// outcome into an immutable [`Curve`]; repeated calls without an
/// intervening setter return the identical cached curve.
///
/// ```
/// use lmcurve::{CurveFitter, FnModel};
///
/// let model = FnModel::new(["slope", "intercept"], |p: &[f64], x| p[0] * x + p[1]);
/// let mut fitter = CurveFitter::new(model);
/// fitter
///     .set_x_values(vec![0.0, 1.0, 2.0, 3.0])?
///     .set_y_values(vec![1.0, 3.0, 5.0, 7.0])?;
///
/// let curve = fitter.fit()?;
/// assert!(curve.error() < 1e-3);
/// # Ok::<(), lmcurve::FitError>(())
/// ```
pub struct CurveFitter {
    model: Arc<dyn ParametricModel>,
    config: FitConfig,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    curve: Option<Arc<Curve>>,
}

impl CurveFitter {
    /// Create a fitter for the given model with default configuration.
    pub fn new(model: impl ParametricModel + 'static) -> Self {
        Self::with_config(model, FitConfig::default())
    }

    /// Create a fitter for the given model with the given configuration.
    ///
    /// The configuration is validated when [`fit`](CurveFitter::fit) runs,
    /// not here.
    pub fn with_config(model: impl ParametricModel + 'static, config: FitConfig) -> Self {
        Self {
            model: Arc::new(model),
            config,
            x_values: Vec::new(),
            y_values: Vec::new(),
            curve: None,
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// The independent data series.
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// The dependent data series.
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// Set the independent data series. Requires at least 2 points.
    pub fn set_x_values(&mut self, x_values: Vec<f64>) -> Result<&mut Self> {
        if x_values.len() < 2 {
            return Err(FitError::InvalidConfiguration(
                "x values must contain at least 2 points".to_string(),
            ));
        }
        self.x_values = x_values;
        self.invalidate();
        Ok(self)
    }

    /// Set the dependent data series. Requires at least 2 points.
    pub fn set_y_values(&mut self, y_values: Vec<f64>) -> Result<&mut Self> {
        if y_values.len() < 2 {
            return Err(FitError::InvalidConfiguration(
                "y values must contain at least 2 points".to_string(),
            ));
        }
        self.y_values = y_values;
        self.invalidate();
        Ok(self)
    }

    /// Set the initial damping factor. Must be positive.
    pub fn set_damping(&mut self, damping: f64) -> Result<&mut Self> {
        if damping <= 0.0 {
            return Err(FitError::InvalidConfiguration(
                "the damping option must be a positive number".to_string(),
            ));
        }
        self.config.damping = damping;
        self.invalidate();
        Ok(self)
    }

    /// Set the factor applied to the damping when a step is rejected.
    pub fn set_damping_step_up(&mut self, step_up: f64) -> &mut Self {
        self.config.damping_step_up = step_up;
        self.invalidate();
        self
    }

    /// Set the factor dividing the damping when a step is accepted.
    pub fn set_damping_step_down(&mut self, step_down: f64) -> &mut Self {
        self.config.damping_step_down = step_down;
        self.invalidate();
        self
    }

    /// Set the maximum number of iterations.
    pub fn set_max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.config.max_iterations = max_iterations;
        self.invalidate();
        self
    }

    /// Set the error at or below which the iteration stops.
    pub fn set_error_tolerance(&mut self, error_tolerance: f64) -> &mut Self {
        self.config.error_tolerance = error_tolerance;
        self.invalidate();
        self
    }

    /// Choose between one-sided and two-sided difference estimates.
    pub fn set_central_difference(&mut self, central_difference: bool) -> &mut Self {
        self.config.central_difference = central_difference;
        self.invalidate();
        self
    }

    /// Set the finite-difference step sizes.
    pub fn set_gradient_difference(&mut self, gradient_difference: GradientDifference) -> &mut Self {
        self.config.gradient_difference = gradient_difference;
        self.invalidate();
        self
    }

    /// Set the observation weights.
    pub fn set_weights(&mut self, weights: Weights) -> &mut Self {
        self.config.weights = weights;
        self.invalidate();
        self
    }

    /// Set the minimum improvement ratio required to trust a step.
    pub fn set_improvement_threshold(&mut self, improvement_threshold: f64) -> &mut Self {
        self.config.improvement_threshold = improvement_threshold;
        self.invalidate();
        self
    }

    /// Set per-parameter lower bounds, index-aligned with the parameters.
    pub fn set_min_values(&mut self, min_values: Vec<f64>) -> &mut Self {
        self.config.min_values = min_values;
        self.invalidate();
        self
    }

    /// Set per-parameter upper bounds, index-aligned with the parameters.
    pub fn set_max_values(&mut self, max_values: Vec<f64>) -> &mut Self {
        self.config.max_values = max_values;
        self.invalidate();
        self
    }

    /// Set the starting parameters.
    ///
    /// For a fixed-arity model the length must match the arity; this is
    /// checked when the fit runs. A variadic model takes its parameter count
    /// from this vector.
    pub fn set_initial_values(&mut self, initial_values: Vec<f64>) -> &mut Self {
        self.config.initial_values = initial_values;
        self.invalidate();
        self
    }

    /// Replace the model being fit.
    pub fn set_model(&mut self, model: impl ParametricModel + 'static) -> &mut Self {
        self.model = Arc::new(model);
        self.invalidate();
        self
    }

    /// Fit the model to the data, or return the cached result.
    ///
    /// Runs the Levenberg-Marquardt iteration: estimate the Jacobian by
    /// finite differences, solve the damped normal equations for a
    /// perturbation, clamp the updated parameters to their bounds, and adapt
    /// the damping factor from the improvement ratio. The best solution seen
    /// is tracked across iterations and is what the returned curve reports.
    ///
    /// A NaN error mid-loop stops the iteration without failing the call:
    /// the curve carries the best parameters recorded before the divergence,
    /// possibly the starting ones.
    ///
    /// # Errors
    ///
    /// [`FitError::SeriesCountMismatch`] when the x and y series differ in
    /// length; [`FitError::InvalidConfiguration`] for fewer than 2 samples,
    /// a non-positive damping factor, initial values that do not match the
    /// model's arity, or a variadic model without initial values.
    pub fn fit(&mut self) -> Result<Arc<Curve>> {
        if let Some(curve) = &self.curve {
            return Ok(Arc::clone(curve));
        }

        let x_count = self.x_values.len();
        let y_count = self.y_values.len();
        if x_count != y_count {
            return Err(FitError::SeriesCountMismatch { x_count, y_count });
        }
        if x_count < 2 {
            return Err(FitError::InvalidConfiguration(
                "at least 2 data points are required".to_string(),
            ));
        }
        if self.config.damping <= 0.0 {
            return Err(FitError::InvalidConfiguration(
                "the damping option must be a positive number".to_string(),
            ));
        }

        let mut params = self.starting_parameters()?;
        let n_params = params.len();

        let residuals = WeightedResiduals::new(
            self.model.as_ref(),
            &self.x_values,
            &self.y_values,
            &self.config.weights,
        );
        let bounds = Bounds::new(&self.config.min_values, &self.config.max_values);
        let mut damping = Damping::new(
            self.config.damping,
            self.config.damping_step_up,
            self.config.damping_step_down,
        );

        let mut error = residuals.evaluate(&params);
        let mut optimal_error = error;
        let mut optimal_params = params.clone();
        let mut converged = error <= self.config.error_tolerance;

        let mut iteration = 0;
        while iteration < self.config.max_iterations && !converged {
            let previous_error = error;

            let evaluated = residuals.evaluate_curve(&params);
            let jacobian = sensitivity_matrix(
                self.model.as_ref(),
                &params,
                &self.x_values,
                &evaluated,
                &self.config.gradient_difference,
                self.config.central_difference,
            );
            let residual = residuals.vector(&evaluated);

            // Damped approximate Hessian J*J^T + lambda*I; a singular system
            // surfaces as non-finite perturbation entries.
            let mut hessian = jacobian.dot(&jacobian.t());
            for i in 0..n_params {
                hessian[[i, i]] += damping.value();
            }
            let gradient = jacobian.dot(&residual);
            let perturbation = linalg::inverse(&hessian).dot(&gradient);

            for i in 0..n_params {
                params[i] = bounds.clamp(i, params[i] - perturbation[i]);
            }

            error = residuals.evaluate(&params);

            // Divergence: stop here, keeping whatever optimum was recorded
            // in earlier iterations.
            if error.is_nan() {
                break;
            }

            if error < optimal_error - self.config.error_tolerance {
                optimal_error = error;
                optimal_params.copy_from_slice(&params);
            }

            let improvement = (previous_error - error)
                / perturbation.dot(&(&perturbation * damping.value() + &gradient));

            if improvement > self.config.improvement_threshold {
                damping.step_down();
            } else {
                damping.step_up();
            }

            converged = error <= self.config.error_tolerance;
            iteration += 1;
        }

        let curve = Arc::new(Curve::new(
            Arc::clone(&self.model),
            optimal_params,
            self.model.parameter_names(),
            optimal_error,
            iteration,
        ));
        self.curve = Some(Arc::clone(&curve));
        Ok(curve)
    }

    /// Fit (or reuse the cached fit) and evaluate the result at each x.
    pub fn predict(&mut self, x_values: &[f64]) -> Result<Vec<DataPoint>> {
        let curve = self.fit()?;
        Ok(curve.predict_series(x_values))
    }

    fn starting_parameters(&self) -> Result<Vec<f64>> {
        let initial = &self.config.initial_values;
        match self.model.arity() {
            Some(arity) => {
                if !initial.is_empty() && initial.len() != arity {
                    return Err(FitError::InvalidConfiguration(format!(
                        "initial values must match the model's parameter count: expected {}, got {}",
                        arity,
                        initial.len()
                    )));
                }
                if initial.is_empty() {
                    Ok(vec![1.0; arity])
                } else {
                    Ok(initial.clone())
                }
            }
            None => {
                if initial.is_empty() {
                    return Err(FitError::InvalidConfiguration(
                        "a variadic model requires initial values".to_string(),
                    ));
                }
                Ok(initial.clone())
            }
        }
    }

    fn invalidate(&mut self) {
        self.curve = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinearModel;

    fn linear_fitter() -> CurveFitter {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|x| x + 1.0).collect();

        let mut fitter = CurveFitter::new(LinearModel);
        fitter
            .set_x_values(x)
            .unwrap()
            .set_y_values(y)
            .unwrap();
        fitter
    }

    #[test]
    fn test_fit_is_memoized() {
        let mut fitter = linear_fitter();

        let first = fitter.fit().unwrap();
        let second = fitter.fit().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_setters_invalidate_the_cache() {
        let mut fitter = linear_fitter();

        let first = fitter.fit().unwrap();
        fitter.set_max_iterations(50);
        let second = fitter.fit().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_too_few_points_is_rejected_at_set_time() {
        let mut fitter = CurveFitter::new(LinearModel);

        assert!(matches!(
            fitter.set_x_values(vec![1.0]),
            Err(FitError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            fitter.set_y_values(vec![1.0]),
            Err(FitError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_non_positive_damping_is_rejected() {
        let mut fitter = CurveFitter::new(LinearModel);

        assert!(matches!(
            fitter.set_damping(-1.0),
            Err(FitError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            fitter.set_damping(0.0),
            Err(FitError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_series_count_mismatch_reports_both_lengths() {
        let mut fitter = CurveFitter::new(LinearModel);
        fitter
            .set_x_values(vec![1.0, 2.0, 3.0])
            .unwrap()
            .set_y_values(vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();

        assert_eq!(
            fitter.fit().unwrap_err(),
            FitError::SeriesCountMismatch {
                x_count: 3,
                y_count: 4
            }
        );
    }

    #[test]
    fn test_initial_values_must_match_arity() {
        let mut fitter = CurveFitter::new(LinearModel);
        fitter
            .set_x_values(vec![1.0, 2.0, 3.0])
            .unwrap()
            .set_y_values(vec![1.0, 2.0, 3.0])
            .unwrap()
            .set_initial_values(vec![1.0, 2.0, 3.0]);

        assert!(matches!(
            fitter.fit(),
            Err(FitError::InvalidConfiguration(_))
        ));
    }
}
