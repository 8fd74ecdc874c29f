//! Model descriptor trait and closure-based adapters.
//!
//! A [`ParametricModel`] describes the parametric function being fit: how to
//! evaluate it at an x value for a given parameter vector, how many
//! parameters it takes (or that it is variadic), and optionally what those
//! parameters are called. The fit engine never inspects the function itself;
//! the descriptor is the whole contract.

use std::sync::Arc;

/// A parametric model `f(params)(x) -> y`.
///
/// Implementations must be `Send + Sync` so that a fitted [`crate::Curve`],
/// which keeps the model alive for prediction, can be shared across threads.
pub trait ParametricModel: Send + Sync {
    /// Evaluate the model at `x` for the given parameter vector.
    fn eval(&self, params: &[f64], x: f64) -> f64;

    /// The fixed parameter count, or `None` for variadic models.
    fn arity(&self) -> Option<usize>;

    /// Ordered parameter names for fixed-arity models that declare them.
    fn parameter_names(&self) -> Option<Vec<String>> {
        None
    }
}

impl<M: ParametricModel + ?Sized> ParametricModel for Arc<M> {
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        (**self).eval(params, x)
    }

    fn arity(&self) -> Option<usize> {
        (**self).arity()
    }

    fn parameter_names(&self) -> Option<Vec<String>> {
        (**self).parameter_names()
    }
}

/// A fixed-arity model defined by a closure and a list of parameter names.
///
/// The arity is the number of names. The fitted curve reports its parameters
/// under these names.
///
/// ```
/// use lmcurve::{FnModel, ParametricModel};
///
/// let line = FnModel::new(["slope", "intercept"], |p: &[f64], x| p[0] * x + p[1]);
/// assert_eq!(line.arity(), Some(2));
/// assert_eq!(line.eval(&[2.0, 1.0], 3.0), 7.0);
/// ```
pub struct FnModel<F> {
    names: Vec<String>,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(&[f64], f64) -> f64 + Send + Sync,
{
    /// Create a model from parameter names and an evaluation closure.
    pub fn new<I, S>(names: I, f: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            f,
        }
    }
}

impl<F> ParametricModel for FnModel<F>
where
    F: Fn(&[f64], f64) -> f64 + Send + Sync,
{
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        (self.f)(params, x)
    }

    fn arity(&self) -> Option<usize> {
        Some(self.names.len())
    }

    fn parameter_names(&self) -> Option<Vec<String>> {
        Some(self.names.clone())
    }
}

/// A variadic model defined by a closure.
///
/// The parameter count is whatever the caller supplies as initial values;
/// the fitted curve reports its parameters by position only.
pub struct VariadicFnModel<F> {
    f: F,
}

impl<F> VariadicFnModel<F>
where
    F: Fn(&[f64], f64) -> f64 + Send + Sync,
{
    /// Create a variadic model from an evaluation closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ParametricModel for VariadicFnModel<F>
where
    F: Fn(&[f64], f64) -> f64 + Send + Sync,
{
    fn eval(&self, params: &[f64], x: f64) -> f64 {
        (self.f)(params, x)
    }

    fn arity(&self) -> Option<usize> {
        None
    }
}
