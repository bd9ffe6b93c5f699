//! Statistical model of wildfire size from joined climate features.
//!
//! The pipeline reads one or more processed fire tables, drops unusable rows,
//! log-transforms the burned-area target, standardizes the sixteen climate
//! and land-surface features, reduces them with PCA and fits an ordinary
//! least squares regression on the retained components. Importance of each
//! original feature is recovered by folding the component coefficients back
//! through the loadings.

pub mod error;
mod ols;
mod pca;
mod report;
mod scale;

pub use error::ModelError;
pub use report::{Coefficient, ComponentReport, FeatureImportance, FeatureLoading, ModelReport};

use log::info;
use nalgebra::{DMatrix, DVector};
use polars::prelude::*;
use std::path::PathBuf;

/// The regression features, in fixed order: the six joined weather columns
/// followed by the pre-joined land-surface columns.
pub const FEATURE_COLUMNS: [&str; 16] = [
    "SPECIFIC_HUMIDITY",
    "TEMP",
    "PRECIP_ICE",
    "PRECIP_WATER",
    "PRECIP_VAPOR",
    "WIND",
    "TSURF",
    "GWETTOP",
    "LHLAND",
    "SHLAND",
    "PRECTOTLAND",
    "LAI",
    "GRN",
    "SWLAND",
    "EVPTRNS",
    "RZMC",
];

/// Land-surface columns where the provider marks missing data with -1
/// instead of a null.
pub const SENTINEL_COLUMNS: [&str; 10] = [
    "TSURF",
    "GWETTOP",
    "LHLAND",
    "SHLAND",
    "PRECTOTLAND",
    "LAI",
    "GRN",
    "SWLAND",
    "EVPTRNS",
    "RZMC",
];

pub const NO_DATA_SENTINEL: f64 = -1.0;
pub const TARGET_COLUMN: &str = "SIZE_HA";

/// Keep the fewest principal components explaining at least this share of
/// the feature variance.
pub const VARIANCE_TARGET: f64 = 0.95;

/// Batch fit of log fire size on PCA-reduced climate features.
#[derive(Debug, Clone)]
pub struct FirePipeline {
    variance_target: f64,
}

impl Default for FirePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl FirePipeline {
    pub fn new() -> Self {
        Self {
            variance_target: VARIANCE_TARGET,
        }
    }

    pub fn with_variance_target(variance_target: f64) -> Self {
        Self { variance_target }
    }

    /// Reads and stacks the processed per-year fire tables.
    pub fn load_tables(paths: &[PathBuf]) -> Result<DataFrame, ModelError> {
        let mut stacked: Option<DataFrame> = None;
        for path in paths {
            let df = CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.clone()))
                .map_err(|e| ModelError::TableScan(path.clone(), e))?
                .finish()
                .map_err(|e| ModelError::TableScan(path.clone(), e))?;
            stacked = Some(match stacked {
                Some(acc) => acc
                    .vstack(&df)
                    .map_err(|e| ModelError::TableScan(path.clone(), e))?,
                None => df,
            });
        }
        stacked.ok_or(ModelError::NoInput)
    }

    /// Drops rows the model cannot use: any null among the features or the
    /// target, a non-positive burned area (its log is undefined), or a -1
    /// no-data sentinel in a land-surface column.
    pub fn clean(&self, df: &DataFrame) -> Result<DataFrame, ModelError> {
        let subset: Vec<Expr> = FEATURE_COLUMNS
            .iter()
            .map(|name| col(*name))
            .chain([col(TARGET_COLUMN)])
            .collect();

        let mut lf = df.clone().lazy().drop_nulls(Some(subset));
        lf = lf.filter(col(TARGET_COLUMN).gt(lit(0.0)));
        for name in SENTINEL_COLUMNS {
            lf = lf.filter(col(name).neq(lit(NO_DATA_SENTINEL)));
        }
        Ok(lf.collect()?)
    }

    /// Fits the full pipeline on an augmented fire table.
    pub fn fit(&self, df: &DataFrame) -> Result<ModelReport, ModelError> {
        let cleaned = self.clean(df)?;
        let n = cleaned.height();
        if n == 0 {
            return Err(ModelError::EmptyAfterCleaning);
        }
        info!("Fitting on {n} of {} rows after cleaning", df.height());

        let x = feature_matrix(&cleaned)?;
        let y = log_target(&cleaned)?;

        let scaler = scale::Standardizer::fit(&x, &FEATURE_COLUMNS)?;
        let z = scaler.transform(&x);

        let pca = pca::Pca::fit(&z, self.variance_target)?;
        info!(
            "Retained {} of {} components ({:.4} cumulative explained variance)",
            pca.retained,
            FEATURE_COLUMNS.len(),
            pca.cumulative_explained_variance()
        );

        let scores = pca.transform(&z);
        let fit = ols::OlsFit::fit(&scores, &y)?;

        Ok(assemble_report(&pca, &fit))
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, ModelError> {
    let casted = df
        .column(name)
        .and_then(|c| c.cast(&DataType::Float64))
        .map_err(|e| ModelError::Column(name.to_string(), e))?;
    let ca = casted
        .f64()
        .map_err(|e| ModelError::Column(name.to_string(), e))?;
    let values: Vec<f64> = ca.iter().flatten().collect();
    if values.len() != df.height() {
        return Err(ModelError::Column(
            name.to_string(),
            PolarsError::ComputeError(format!("column '{name}' still holds nulls").into()),
        ));
    }
    Ok(values)
}

fn feature_matrix(df: &DataFrame) -> Result<DMatrix<f64>, ModelError> {
    let mut columns = Vec::with_capacity(FEATURE_COLUMNS.len());
    for name in FEATURE_COLUMNS {
        columns.push(numeric_column(df, name)?);
    }
    Ok(DMatrix::from_fn(df.height(), columns.len(), |i, j| {
        columns[j][i]
    }))
}

fn log_target(df: &DataFrame) -> Result<DVector<f64>, ModelError> {
    let sizes = numeric_column(df, TARGET_COLUMN)?;
    Ok(DVector::from_iterator(
        sizes.len(),
        sizes.iter().map(|s| s.ln()),
    ))
}

fn assemble_report(pca: &pca::Pca, fit: &ols::OlsFit) -> ModelReport {
    let coefficients = (0..fit.coefficients.len())
        .map(|j| Coefficient {
            term: if j == 0 {
                "intercept".to_string()
            } else {
                format!("PC{j}")
            },
            estimate: fit.coefficients[j],
            std_error: fit.std_errors[j],
            t_value: fit.t_values[j],
        })
        .collect();

    let components = (0..pca.retained)
        .map(|k| ComponentReport {
            index: k + 1,
            explained_variance_ratio: pca.explained_variance_ratio[k],
            loadings: FEATURE_COLUMNS
                .iter()
                .enumerate()
                .map(|(j, name)| FeatureLoading {
                    feature: name.to_string(),
                    loading: pca.loading(k, j),
                })
                .collect(),
        })
        .collect();

    let mut importance: Vec<FeatureImportance> = FEATURE_COLUMNS
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let net = (0..pca.retained)
                .map(|k| pca.loading(k, j) * fit.coefficients[k + 1])
                .sum();
            FeatureImportance {
                feature: name.to_string(),
                importance: net,
            }
        })
        .collect();
    importance.sort_by(|a, b| {
        b.importance
            .abs()
            .partial_cmp(&a.importance.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ModelReport {
        observations: fit.observations,
        retained_components: pca.retained,
        cumulative_explained_variance: pca.cumulative_explained_variance(),
        r_squared: fit.r_squared,
        adj_r_squared: fit.adj_r_squared,
        coefficients,
        components,
        importance,
    }
}
