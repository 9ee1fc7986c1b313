//! Preprocessing configuration

use serde::{Deserialize, Serialize};
use super::{ImputeStrategy, ScalerType};

/// Declared type of an input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    /// Continuous values, imputed and scaled
    Numeric,
    /// Category codes, one-hot encoded
    Nominal,
}

/// Configuration for [`ParamPreprocessor`](super::ParamPreprocessor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Strategy for missing numeric values
    pub numeric_impute_strategy: ImputeStrategy,

    /// Strategy for missing category codes
    pub nominal_impute_strategy: ImputeStrategy,

    /// Scaler applied to numeric columns
    pub scaler_type: ScalerType,

    /// Whether to drop numeric columns that are constant at fit time
    pub drop_constant: bool,

    /// Per-column types. Empty means every column is numeric.
    pub feature_types: Vec<FeatureType>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            numeric_impute_strategy: ImputeStrategy::Mean,
            nominal_impute_strategy: ImputeStrategy::MostFrequent,
            scaler_type: ScalerType::Standard,
            drop_constant: true,
            feature_types: Vec::new(),
        }
    }
}

impl PreprocessingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set numeric impute strategy
    pub fn with_numeric_impute(mut self, strategy: ImputeStrategy) -> Self {
        self.numeric_impute_strategy = strategy;
        self
    }

    /// Builder method to set nominal impute strategy
    pub fn with_nominal_impute(mut self, strategy: ImputeStrategy) -> Self {
        self.nominal_impute_strategy = strategy;
        self
    }

    /// Builder method to set scaler type
    pub fn with_scaler(mut self, scaler_type: ScalerType) -> Self {
        self.scaler_type = scaler_type;
        self
    }

    /// Builder method to toggle constant column removal
    pub fn with_drop_constant(mut self, drop_constant: bool) -> Self {
        self.drop_constant = drop_constant;
        self
    }

    /// Builder method to declare column types
    pub fn with_feature_types(mut self, feature_types: Vec<FeatureType>) -> Self {
        self.feature_types = feature_types;
        self
    }

    /// Type of column `idx`, numeric when undeclared
    pub fn feature_type(&self, idx: usize) -> FeatureType {
        self.feature_types
            .get(idx)
            .copied()
            .unwrap_or(FeatureType::Numeric)
    }
}
