//! Column standardization to zero mean and unit variance.

use crate::model::error::ModelError;
use nalgebra::{DMatrix, DVector};

/// Per-column mean/spread fitted once on the full cleaned dataset.
///
/// Uses the population standard deviation (divide by n); with no train/test
/// split the distinction is cosmetic, but it keeps loadings comparable with
/// the usual scaler conventions.
#[derive(Debug, Clone)]
pub struct Standardizer {
    pub means: DVector<f64>,
    pub stds: DVector<f64>,
}

impl Standardizer {
    /// Fits scaling parameters. A constant column cannot be standardized and
    /// signals a data-quality failure, reported under the matching name in
    /// `names`.
    pub fn fit(x: &DMatrix<f64>, names: &[&str]) -> Result<Self, ModelError> {
        let n = x.nrows();
        if n == 0 {
            return Err(ModelError::EmptyAfterCleaning);
        }
        let mut means = DVector::zeros(x.ncols());
        let mut stds = DVector::zeros(x.ncols());
        for j in 0..x.ncols() {
            let col = x.column(j);
            let mean = col.sum() / n as f64;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
            let std = var.sqrt();
            if std == 0.0 || !std.is_finite() {
                let name = names.get(j).copied().unwrap_or("?");
                return Err(ModelError::ZeroVariance(name.to_string()));
            }
            means[j] = mean;
            stds[j] = std;
        }
        Ok(Self { means, stds })
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> DMatrix<f64> {
        let mut z = x.clone();
        for j in 0..z.ncols() {
            let (mean, std) = (self.means[j], self.stds[j]);
            for v in z.column_mut(j).iter_mut() {
                *v = (*v - mean) / std;
            }
        }
        z
    }
}
