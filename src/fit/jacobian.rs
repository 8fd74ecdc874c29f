//! Finite-difference estimate of the sensitivity matrix.

use ndarray::Array2;

use crate::fit::config::GradientDifference;
use crate::model::ParametricModel;

/// Approximate the (n_params x n_samples) matrix of partial derivatives of
/// the model output with respect to each parameter.
///
/// `evaluated` holds the model's predictions at `params`, reused as the base
/// point for one-sided differences. A parameter whose step size is zero keeps
/// its all-zero row: it contributes nothing to `J * J^T` or `J * r`, which
/// freezes it at its current value for the rest of the fit.
pub(crate) fn sensitivity_matrix(
    model: &dyn ParametricModel,
    params: &[f64],
    x_values: &[f64],
    evaluated: &[f64],
    step: &GradientDifference,
    central_difference: bool,
) -> Array2<f64> {
    let n_params = params.len();
    let n_samples = x_values.len();
    let mut matrix = Array2::<f64>::zeros((n_params, n_samples));

    for param in 0..n_params {
        let delta = step.step(param);
        if delta == 0.0 {
            continue;
        }

        let mut perturbed = params.to_vec();
        perturbed[param] += delta;

        if !central_difference {
            for (i, &x) in x_values.iter().enumerate() {
                matrix[[param, i]] = (evaluated[i] - model.eval(&perturbed, x)) / delta;
            }
        } else {
            let mut perturbed_down = params.to_vec();
            perturbed_down[param] -= delta;
            for (i, &x) in x_values.iter().enumerate() {
                matrix[[param, i]] =
                    (model.eval(&perturbed_down, x) - model.eval(&perturbed, x)) / (2.0 * delta);
            }
        }
    }

    matrix
}
