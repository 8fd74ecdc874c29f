//! Dense matrix helpers for the damped normal equations.
//!
//! The systems solved here are tiny (n_params x n_params), so a plain
//! Gauss-Jordan elimination with partial pivoting is all that is needed.

use ndarray::Array2;

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// A singular or near-singular input is not an error: elimination divides by
/// a (near-)zero pivot and the non-finite entries propagate into the caller's
/// arithmetic. The fit loop treats the resulting NaN error as divergence and
/// falls back to the best solution seen so far.
pub(crate) fn inverse(matrix: &Array2<f64>) -> Array2<f64> {
    let n = matrix.nrows();
    debug_assert_eq!(n, matrix.ncols());

    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[[row, col]].abs() > a[[pivot, col]].abs() {
                pivot = row;
            }
        }

        if pivot != col {
            for j in 0..n {
                a.swap([col, j], [pivot, j]);
                inv.swap([col, j], [pivot, j]);
            }
        }

        let p = a[[col, col]];
        for j in 0..n {
            a[[col, j]] /= p;
            inv[[col, j]] /= p;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                a[[row, j]] -= factor * a[[col, j]];
                inv[[row, j]] -= factor * inv[[col, j]];
            }
        }
    }

    inv
}
