//! Feature preprocessing
//!
//! Defines the [`Preprocessor`] contract the wrapper applies before fitting and
//! predicting, and a ready-made [`ParamPreprocessor`] built from:
//! - Missing value imputation
//! - One-hot encoding of nominal columns
//! - Constant column removal
//! - Feature scaling (Standard, MinMax, Robust, MaxAbs)

mod config;
mod encoder;
mod imputer;
mod pipeline;
mod scaler;

pub use config::{FeatureType, PreprocessingConfig};
pub use encoder::OneHotEncoder;
pub use imputer::{ImputeStrategy, Imputer};
pub use pipeline::ParamPreprocessor;
pub use scaler::{Scaler, ScalerType};

use crate::error::Result;
use ndarray::{Array2, ArrayView1};
use std::fmt;

/// Trait for feature preprocessors applied by the wrapper
pub trait Preprocessor: fmt::Debug {
    /// Learn the transformation from `x` and return the transformed matrix
    fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Apply the learned transformation
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>>;

    /// Human-readable name, used when the preprocessor appears in parameters
    fn name(&self) -> &str;

    /// Clone into a new box
    fn box_clone(&self) -> Box<dyn Preprocessor>;
}

impl Clone for Box<dyn Preprocessor> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Finite values of a column, sorted ascending
pub(crate) fn sorted_finite(column: ArrayView1<f64>) -> Vec<f64> {
    let mut values: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Linear-interpolated quantile of an ascending slice
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sorted_finite_skips_nan() {
        let col = array![3.0, f64::NAN, 1.0, f64::INFINITY, 2.0];
        assert_eq!(sorted_finite(col.view()), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quantile() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_boxed_preprocessor_clone_keeps_name() {
        let boxed: Box<dyn Preprocessor> = Box::new(ParamPreprocessor::new());
        let cloned = boxed.clone();
        assert_eq!(cloned.name(), boxed.name());
    }
}
