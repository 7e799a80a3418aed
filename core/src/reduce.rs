//! Principal-component projection of a weight matrix for visualization.
//!
//! The weight matrix is centered on its column means, its `V x V` covariance is
//! eigen-decomposed with a symmetric solver, and every centered row is projected onto the
//! eigenvectors with the largest eigenvalues. Eigenvector signs are normalized so the
//! largest-magnitude component of each axis is positive.

use crate::error::{CoreError, Result};
use nalgebra::{DMatrix, SymmetricEigen};

const EIGEN_EPS: f64 = 1e-12;
const EIGEN_MAX_ITER: usize = 10_000;

/// Project every row of `matrix` onto its top `dims` principal axes.
///
/// Output has one `dims`-long coordinate vector per row. Axes beyond the vocabulary size
/// are zero.
pub fn try_project(matrix: &[Vec<f64>], dims: usize) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();
    let v = matrix.first().map_or(0, Vec::len);
    if n == 0 {
        return Ok(Vec::new());
    }
    if v == 0 || dims == 0 {
        return Ok(vec![vec![0.0; dims]; n]);
    }
    if matrix.iter().any(|row| row.len() != v) {
        return Err(CoreError::NumericDegenerate("ragged weight matrix".into()));
    }

    let data = DMatrix::from_fn(n, v, |i, j| matrix[i][j]);
    let mean = data.row_mean();
    let mut centered = data;
    for mut row in centered.row_iter_mut() {
        row -= &mean;
    }

    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let covariance = (centered.transpose() * &centered) / denom;
    let eigen = SymmetricEigen::try_new(covariance, EIGEN_EPS, EIGEN_MAX_ITER)
        .ok_or_else(|| CoreError::NumericDegenerate("symmetric eigen-solve did not converge".into()))?;

    let mut order: Vec<usize> = (0..v).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let mut coords = vec![vec![0.0; dims]; n];
    for (axis, &col) in order.iter().take(dims).enumerate() {
        let mut basis = eigen.eigenvectors.column(col).into_owned();
        let pivot = basis.iter().copied().fold(0.0f64, |acc, x| if x.abs() > acc.abs() { x } else { acc });
        if pivot < 0.0 {
            basis.neg_mut();
        }
        let projected = &centered * &basis;
        for (i, value) in projected.iter().enumerate() {
            if !value.is_finite() {
                return Err(CoreError::NumericDegenerate(format!("non-finite coordinate on axis {axis}")));
            }
            coords[i][axis] = *value;
        }
    }
    Ok(coords)
}

/// Like [`try_project`] but never fails: a degenerate solve yields all-zero coordinates.
pub fn project(matrix: &[Vec<f64>], dims: usize) -> Vec<Vec<f64>> {
    match try_project(matrix, dims) {
        Ok(coords) => coords,
        Err(err) => {
            tracing::warn!(error = %err, rows = matrix.len(), dims, "falling back to zero projection");
            vec![vec![0.0; dims]; matrix.len()]
        }
    }
}
