//! Feature scaling implementations

use crate::error::{ArbokError, Result};
use super::{quantile, sorted_finite};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Type of scaler to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalerType {
    /// Standard scaling (z-score normalization): (x - mean) / std
    Standard,
    /// Min-Max scaling: (x - min) / (max - min)
    MinMax,
    /// Robust scaling using median and IQR
    Robust,
    /// Max absolute scaling: x / max(|x|)
    MaxAbs,
    /// No scaling
    None,
}

/// Parameters for a fitted column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ScalerParams {
    center: f64,    // mean, min, or median
    scale: f64,     // std, range, or IQR
}

/// Column-wise feature scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    scaler_type: ScalerType,
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl Scaler {
    /// Create a new scaler
    pub fn new(scaler_type: ScalerType) -> Self {
        Self {
            scaler_type,
            params: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the scaler to the data
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        self.params = x
            .axis_iter(Axis(1))
            .map(|column| self.compute_params(column))
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_columns(x)?;
        let mut result = x.clone();
        for (mut column, p) in result.axis_iter_mut(Axis(1)).zip(&self.params) {
            column.mapv_inplace(|v| (v - p.center) / p.scale);
        }
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    fn check_columns(&self, x: &Array2<f64>) -> Result<()> {
        if !self.is_fitted {
            return Err(ArbokError::NotFitted);
        }
        if x.ncols() != self.params.len() {
            return Err(ArbokError::Validation(format!(
                "scaler fitted on {} columns, got {}",
                self.params.len(),
                x.ncols()
            )));
        }
        Ok(())
    }

    fn compute_params(&self, column: ArrayView1<f64>) -> ScalerParams {
        let values = sorted_finite(column);
        let nonzero = |s: f64| if s == 0.0 || !s.is_finite() { 1.0 } else { s };

        match self.scaler_type {
            ScalerType::Standard => {
                let n = values.len();
                let mean = if n == 0 { 0.0 } else { values.iter().sum::<f64>() / n as f64 };
                let std = if n < 2 {
                    1.0
                } else {
                    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
                };
                ScalerParams { center: mean, scale: nonzero(std) }
            }
            ScalerType::MinMax => {
                let min = values.first().copied().unwrap_or(0.0);
                let max = values.last().copied().unwrap_or(1.0);
                ScalerParams { center: min, scale: nonzero(max - min) }
            }
            ScalerType::Robust => {
                let median = quantile(&values, 0.5).unwrap_or(0.0);
                let q1 = quantile(&values, 0.25).unwrap_or(0.0);
                let q3 = quantile(&values, 0.75).unwrap_or(1.0);
                ScalerParams { center: median, scale: nonzero(q3 - q1) }
            }
            ScalerType::MaxAbs => {
                let max_abs = values.iter().fold(0.0f64, |a, b| a.max(b.abs()));
                ScalerParams { center: 0.0, scale: nonzero(max_abs) }
            }
            ScalerType::None => ScalerParams { center: 0.0, scale: 1.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Array2<f64> {
        array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]]
    }

    #[test]
    fn test_standard_scaler() {
        let mut scaler = Scaler::new(ScalerType::Standard);
        let result = scaler.fit_transform(&sample()).unwrap();

        let mean = result.column(0).mean().unwrap();
        assert!(mean.abs() < 1e-10);
        // Both columns are affine in each other, so they scale identically
        assert!((result[[4, 0]] - result[[4, 1]]).abs() < 1e-10);
    }

    #[test]
    fn test_minmax_scaler() {
        let mut scaler = Scaler::new(ScalerType::MinMax);
        let result = scaler.fit_transform(&sample()).unwrap();

        assert_eq!(result[[0, 0]], 0.0);
        assert_eq!(result[[4, 1]], 1.0);
        assert_eq!(result[[2, 0]], 0.5);
    }

    #[test]
    fn test_robust_and_maxabs() {
        let mut robust = Scaler::new(ScalerType::Robust);
        let result = robust.fit_transform(&sample()).unwrap();
        assert_eq!(result[[2, 0]], 0.0);

        let mut maxabs = Scaler::new(ScalerType::MaxAbs);
        let result = maxabs.fit_transform(&array![[-4.0], [2.0]]).unwrap();
        assert_eq!(result, array![[-1.0], [0.5]]);
    }

    #[test]
    fn test_constant_column_is_not_divided_by_zero() {
        let mut scaler = Scaler::new(ScalerType::Standard);
        let result = scaler.fit_transform(&array![[3.0], [3.0], [3.0]]).unwrap();
        assert_eq!(result, array![[0.0], [0.0], [0.0]]);
    }

    #[test]
    fn test_column_mismatch() {
        let mut scaler = Scaler::new(ScalerType::Standard);
        scaler.fit(&sample()).unwrap();
        let err = scaler.transform(&array![[1.0]]).unwrap_err();
        assert!(err.is_validation());
    }
}
