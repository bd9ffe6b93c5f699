//! Principal component analysis via singular value decomposition.

use crate::model::error::ModelError;
use nalgebra::DMatrix;

/// PCA of a standardized matrix, keeping the minimum number of leading
/// components whose cumulative explained variance reaches the target ratio.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Retained components as rows (`retained x n_features`); entry `(k, j)`
    /// is the loading of feature `j` on component `k`.
    pub components: DMatrix<f64>,
    /// Explained variance ratio of every component, retained or not.
    pub explained_variance_ratio: Vec<f64>,
    pub retained: usize,
}

impl Pca {
    pub fn fit(z: &DMatrix<f64>, variance_target: f64) -> Result<Self, ModelError> {
        let (n, p) = z.shape();
        if n < 2 || p == 0 {
            return Err(ModelError::DegeneratePca);
        }

        // nalgebra's `svd` orders singular values descending, so component k
        // is the k-th most explanatory direction.
        let svd = z.clone().svd(true, true);
        let v_t = svd.v_t.ok_or(ModelError::DegeneratePca)?;
        let singular_values = svd.singular_values;

        let total: f64 = singular_values.iter().map(|s| s * s).sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(ModelError::DegeneratePca);
        }
        let explained_variance_ratio: Vec<f64> =
            singular_values.iter().map(|s| s * s / total).collect();

        let mut cumulative = 0.0;
        let mut retained = explained_variance_ratio.len();
        for (k, ratio) in explained_variance_ratio.iter().enumerate() {
            cumulative += ratio;
            if cumulative >= variance_target {
                retained = k + 1;
                break;
            }
        }

        Ok(Self {
            components: v_t.rows(0, retained).into_owned(),
            explained_variance_ratio,
            retained,
        })
    }

    /// Projects a standardized matrix onto the retained components
    /// (`n x retained` scores).
    pub fn transform(&self, z: &DMatrix<f64>) -> DMatrix<f64> {
        z * self.components.transpose()
    }

    /// Cumulative explained variance of the retained components.
    pub fn cumulative_explained_variance(&self) -> f64 {
        self.explained_variance_ratio[..self.retained].iter().sum()
    }

    /// Loading of feature `feature` on retained component `component`.
    pub fn loading(&self, component: usize, feature: usize) -> f64 {
        self.components[(component, feature)]
    }
}
