//! Immutable snapshot of a completed fit.

use std::fmt;
use std::sync::Arc;

use crate::model::ParametricModel;
use crate::point::DataPoint;

/// The outcome of a fit: best parameters, final error, iteration count, and
/// an evaluator frozen to those parameters.
///
/// A `Curve` is never mutated after construction and is safe to share and
/// read from multiple threads. Changing the fitter's configuration produces a
/// new `Curve` on the next fit; it never alters an existing one.
pub struct Curve {
    model: Arc<dyn ParametricModel>,
    parameters: Vec<f64>,
    names: Option<Vec<String>>,
    error: f64,
    iterations: usize,
}

impl Curve {
    pub(crate) fn new(
        model: Arc<dyn ParametricModel>,
        parameters: Vec<f64>,
        names: Option<Vec<String>>,
        error: f64,
        iterations: usize,
    ) -> Self {
        Self {
            model,
            parameters,
            names,
            error,
            iterations,
        }
    }

    /// The fitted parameters, in model order.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Parameter names, when the model declares a fixed, named arity.
    pub fn parameter_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Look up a fitted parameter by its declared name.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        let names = self.names.as_ref()?;
        let index = names.iter().position(|n| n == name)?;
        Some(self.parameters[index])
    }

    /// The weighted sum-of-squared-residuals at the fitted parameters.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// The number of iterations the fit ran before terminating.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Evaluate the fitted model at `x`.
    ///
    /// Pure lookup; the fit is not recomputed.
    pub fn predict(&self, x: f64) -> f64 {
        self.model.eval(&self.parameters, x)
    }

    /// Evaluate the fitted model at each x, preserving input order.
    ///
    /// Returns a freshly allocated series, one [`DataPoint`] per input.
    pub fn predict_series(&self, x_values: &[f64]) -> Vec<DataPoint> {
        x_values
            .iter()
            .map(|&x| DataPoint::new(x, self.predict(x)))
            .collect()
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("parameters", &self.parameters)
            .field("names", &self.names)
            .field("error", &self.error)
            .field("iterations", &self.iterations)
            .finish()
    }
}
