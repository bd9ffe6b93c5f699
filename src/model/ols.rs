//! Ordinary least squares with an intercept, fitted over the PCA scores.

use crate::model::error::ModelError;
use nalgebra::{DMatrix, DVector};

const SOLVE_EPS: f64 = 1e-12;

/// OLS fit of `y ~ 1 + scores`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Intercept first, then one slope per score column.
    pub coefficients: DVector<f64>,
    pub std_errors: DVector<f64>,
    pub t_values: DVector<f64>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub observations: usize,
}

impl OlsFit {
    pub fn fit(scores: &DMatrix<f64>, y: &DVector<f64>) -> Result<Self, ModelError> {
        let n = scores.nrows();
        let k = scores.ncols();
        let regressors = k + 1;
        if n <= regressors {
            return Err(ModelError::TooFewRows { rows: n, regressors });
        }

        let mut design = DMatrix::zeros(n, regressors);
        design.column_mut(0).fill(1.0);
        design.columns_mut(1, k).copy_from(scores);

        let svd = design.clone().svd(true, true);
        let coefficients = svd
            .solve(y, SOLVE_EPS)
            .map_err(|_| ModelError::SingularFit)?;

        let residuals = y - &design * &coefficients;
        let rss: f64 = residuals.iter().map(|r| r * r).sum();
        let mean_y = y.sum() / n as f64;
        let tss: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
        if tss <= 0.0 {
            return Err(ModelError::ZeroVariance("target".to_string()));
        }

        let r_squared = 1.0 - rss / tss;
        let dof = (n - regressors) as f64;
        let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / dof;
        let sigma2 = rss / dof;

        // Coefficient variances from (X'X)^-1 scaled by the residual variance.
        let xtx = design.transpose() * &design;
        let xtx_inv = xtx.try_inverse().ok_or(ModelError::SingularFit)?;
        let std_errors =
            DVector::from_iterator(regressors, (0..regressors).map(|j| (xtx_inv[(j, j)] * sigma2).sqrt()));
        let t_values = DVector::from_iterator(
            regressors,
            coefficients
                .iter()
                .zip(std_errors.iter())
                .map(|(b, se)| if *se > 0.0 { b / se } else { 0.0 }),
        );

        Ok(Self {
            coefficients,
            std_errors,
            t_values,
            r_squared,
            adj_r_squared,
            observations: n,
        })
    }
}
