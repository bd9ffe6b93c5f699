//! Fitted-model summary returned by the pipeline.

use serde::Serialize;
use std::fmt;

/// One regression term: the intercept or one principal component.
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
}

/// Loading of one input feature on one retained component.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureLoading {
    pub feature: String,
    pub loading: f64,
}

/// One retained principal component with its variance share and loadings.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub index: usize,
    pub explained_variance_ratio: f64,
    pub loadings: Vec<FeatureLoading>,
}

/// Net contribution of one original feature to the fitted response, obtained
/// by folding the component coefficients back through the loadings.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Everything the fit produces, in input-feature terms where possible.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub observations: usize,
    pub retained_components: usize,
    pub cumulative_explained_variance: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub coefficients: Vec<Coefficient>,
    pub components: Vec<ComponentReport>,
    /// Sorted by absolute importance, largest first.
    pub importance: Vec<FeatureImportance>,
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Fitted log fire size on {} principal components ({} observations)",
            self.retained_components, self.observations
        )?;
        writeln!(
            f,
            "Cumulative explained variance: {:.4}",
            self.cumulative_explained_variance
        )?;
        writeln!(
            f,
            "R-squared: {:.4}  adjusted: {:.4}",
            self.r_squared, self.adj_r_squared
        )?;
        writeln!(f)?;
        writeln!(f, "{:<12} {:>12} {:>12} {:>10}", "term", "estimate", "std error", "t value")?;
        for c in &self.coefficients {
            writeln!(
                f,
                "{:<12} {:>12.5} {:>12.5} {:>10.3}",
                c.term, c.estimate, c.std_error, c.t_value
            )?;
        }
        for component in &self.components {
            writeln!(f)?;
            writeln!(
                f,
                "PC{} (explained variance ratio {:.4}), loadings by magnitude:",
                component.index, component.explained_variance_ratio
            )?;
            let mut loadings: Vec<&FeatureLoading> = component.loadings.iter().collect();
            loadings.sort_by(|a, b| {
                b.loading
                    .abs()
                    .partial_cmp(&a.loading.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            for l in loadings {
                writeln!(f, "{:<20} {:>12.6}", l.feature, l.loading)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Feature importance (loadings folded through coefficients):")?;
        for imp in &self.importance {
            writeln!(f, "{:<20} {:>12.6}", imp.feature, imp.importance)?;
        }
        Ok(())
    }
}
