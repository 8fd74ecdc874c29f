//! Levenberg-Marquardt fitting loop and its supporting pieces.
//!
//! The engine in [`engine`] drives the damped Gauss-Newton iteration; the
//! sibling modules hold the parts it composes: configuration, the damping
//! factor, per-parameter bounds, the weighted residual model, and the
//! finite-difference Jacobian.

pub mod bounds;
pub mod config;
pub mod damping;
pub mod engine;
pub mod jacobian;
pub mod residuals;

pub use config::{FitConfig, GradientDifference, Weights};
pub use engine::CurveFitter;
