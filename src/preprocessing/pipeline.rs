//! Parameter-driven preprocessing pipeline

use crate::error::{ArbokError, Result};
use super::{
    config::{FeatureType, PreprocessingConfig},
    encoder::OneHotEncoder,
    imputer::Imputer,
    scaler::Scaler,
    sorted_finite, Preprocessor,
};
use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// Imputes, encodes, prunes and scales a numeric feature matrix.
///
/// Numeric columns are imputed, stripped of constants and scaled; nominal
/// columns are imputed and one-hot encoded. The output holds the surviving
/// numeric columns first, followed by the indicator columns in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamPreprocessor {
    config: PreprocessingConfig,
    numeric_columns: Vec<usize>,
    nominal_columns: Vec<usize>,
    /// Positions within the numeric block that survived constant removal
    kept_numeric: Vec<usize>,
    numeric_imputer: Option<Imputer>,
    nominal_imputer: Option<Imputer>,
    scaler: Option<Scaler>,
    encoder: Option<OneHotEncoder>,
    n_features_in: usize,
    is_fitted: bool,
    /// Timing: seconds spent in last fit call
    fit_time: Option<f64>,
}

impl Default for ParamPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamPreprocessor {
    /// Create a new preprocessor with default configuration
    pub fn new() -> Self {
        Self::with_config(PreprocessingConfig::default())
    }

    /// Create a new preprocessor with custom configuration
    pub fn with_config(config: PreprocessingConfig) -> Self {
        Self {
            config,
            numeric_columns: Vec::new(),
            nominal_columns: Vec::new(),
            kept_numeric: Vec::new(),
            numeric_imputer: None,
            nominal_imputer: None,
            scaler: None,
            encoder: None,
            n_features_in: 0,
            is_fitted: false,
            fit_time: None,
        }
    }

    /// Fit the preprocessor to the data
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        let start = Instant::now();

        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(ArbokError::Validation(format!(
                "cannot fit preprocessor on a {}x{} matrix",
                x.nrows(),
                x.ncols()
            )));
        }
        if !self.config.feature_types.is_empty() && self.config.feature_types.len() != x.ncols() {
            return Err(ArbokError::Validation(format!(
                "{} feature types declared for {} columns",
                self.config.feature_types.len(),
                x.ncols()
            )));
        }

        let (numeric_columns, nominal_columns): (Vec<usize>, Vec<usize>) = (0..x.ncols())
            .partition(|&idx| self.config.feature_type(idx) == FeatureType::Numeric);

        // Numeric block: impute, drop constants, scale
        let mut numeric_imputer = Imputer::new(self.config.numeric_impute_strategy.clone());
        let numeric = numeric_imputer.fit_transform(&x.select(Axis(1), &numeric_columns))?;

        let kept_numeric: Vec<usize> = (0..numeric.ncols())
            .filter(|&idx| !self.config.drop_constant || !Self::is_constant(&numeric, idx))
            .collect();

        let mut scaler = Scaler::new(self.config.scaler_type.clone());
        scaler.fit(&numeric.select(Axis(1), &kept_numeric))?;

        // Nominal block: impute, one-hot
        let mut nominal_imputer = Imputer::new(self.config.nominal_impute_strategy.clone());
        let nominal = nominal_imputer.fit_transform(&x.select(Axis(1), &nominal_columns))?;

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&nominal)?;

        debug!(
            numeric = numeric_columns.len(),
            nominal = nominal_columns.len(),
            dropped = numeric_columns.len() - kept_numeric.len(),
            "Fitted preprocessor"
        );

        self.numeric_columns = numeric_columns;
        self.nominal_columns = nominal_columns;
        self.kept_numeric = kept_numeric;
        self.numeric_imputer = Some(numeric_imputer);
        self.nominal_imputer = Some(nominal_imputer);
        self.scaler = Some(scaler);
        self.encoder = Some(encoder);
        self.n_features_in = x.ncols();
        self.is_fitted = true;
        self.fit_time = Some(start.elapsed().as_secs_f64());

        Ok(self)
    }

    /// Transform the data with the fitted state
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (numeric_imputer, nominal_imputer, scaler, encoder) = match (
            &self.numeric_imputer,
            &self.nominal_imputer,
            &self.scaler,
            &self.encoder,
        ) {
            (Some(a), Some(b), Some(c), Some(d)) if self.is_fitted => (a, b, c, d),
            _ => return Err(ArbokError::NotFitted),
        };

        if x.ncols() != self.n_features_in {
            return Err(ArbokError::Validation(format!(
                "preprocessor fitted on {} columns, got {}",
                self.n_features_in,
                x.ncols()
            )));
        }

        let numeric = numeric_imputer.transform(&x.select(Axis(1), &self.numeric_columns))?;
        let numeric = scaler.transform(&numeric.select(Axis(1), &self.kept_numeric))?;

        let nominal = nominal_imputer.transform(&x.select(Axis(1), &self.nominal_columns))?;
        let encoded = encoder.transform(&nominal)?;

        Ok(concatenate(Axis(1), &[numeric.view(), encoded.view()])?)
    }

    /// Number of input columns seen during fit
    pub fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    /// Number of columns produced by `transform`
    pub fn n_features_out(&self) -> usize {
        self.kept_numeric.len() + self.encoder.as_ref().map_or(0, OneHotEncoder::n_output_columns)
    }

    /// Seconds spent in the last fit
    pub fn fit_time_secs(&self) -> Option<f64> {
        self.fit_time
    }

    pub fn config(&self) -> &PreprocessingConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    fn is_constant(x: &Array2<f64>, idx: usize) -> bool {
        let values = sorted_finite(x.column(idx));
        match (values.first(), values.last()) {
            (Some(lo), Some(hi)) => lo == hi,
            _ => true,
        }
    }
}

impl Preprocessor for ParamPreprocessor {
    fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        ParamPreprocessor::transform(self, x)
    }

    fn name(&self) -> &str {
        "ParamPreprocessor"
    }

    fn box_clone(&self) -> Box<dyn Preprocessor> {
        Box::new(self.clone())
    }
}
