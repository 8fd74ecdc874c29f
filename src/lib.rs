//! # lmcurve
//!
//! `lmcurve` fits user-supplied parametric models to (x, y) data by
//! nonlinear least squares, using the Levenberg-Marquardt algorithm: a
//! damped Gauss-Newton iteration that blends gradient descent and Newton
//! steps through an adaptive damping factor.
//!
//! The library provides:
//! - A fit engine with finite-difference Jacobians (one- or two-sided),
//!   optional per-parameter bounds, and best-solution tracking
//! - A model descriptor trait with closure adapters for fixed-arity and
//!   variadic models, plus a few ready-made models
//! - An immutable fit result that doubles as a prediction function
//!
//! ## Basic Usage
//!
//! ```
//! use lmcurve::{CurveFitter, FnModel};
//!
//! let model = FnModel::new(["amplitude", "rate"], |p: &[f64], x: f64| {
//!     p[0] * (p[1] * x).sin()
//! });
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64 / 2.0).collect();
//! let y: Vec<f64> = x.iter().map(|&x| 4.0 * (2.0 * x).sin()).collect();
//!
//! let mut fitter = CurveFitter::new(model);
//! fitter
//!     .set_damping(0.1)?
//!     .set_initial_values(vec![3.5, 2.2])
//!     .set_x_values(x)?
//!     .set_y_values(y)?;
//!
//! let curve = fitter.fit()?;
//! println!("amplitude = {:?}", curve.parameter("amplitude"));
//! # Ok::<(), lmcurve::FitError>(())
//! ```

pub mod curve;
pub mod error;
pub mod fit;
pub mod model;
pub mod models;
pub mod point;

mod linalg;

// Re-exports for convenience
pub use curve::Curve;
pub use error::{FitError, Result};
pub use fit::{CurveFitter, FitConfig, GradientDifference, Weights};
pub use model::{FnModel, ParametricModel, VariadicFnModel};
pub use point::DataPoint;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
