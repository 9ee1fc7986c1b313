//! Missing value imputation strategies

use crate::error::{ArbokError, Result};
use super::{quantile, sorted_finite};
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

/// Strategy for imputing missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with the column mean
    Mean,
    /// Replace with the column median
    Median,
    /// Replace with the most frequent value
    MostFrequent,
    /// Replace with a constant value
    Constant(f64),
}

/// Per-column imputer. Any non-finite entry counts as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: Vec<f64>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the given columns of `x`
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        self.fill_values = x
            .axis_iter(Axis(1))
            .map(|column| self.compute_fill_value(column))
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    /// Replace missing entries with the fitted fill values
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ArbokError::NotFitted);
        }
        if x.ncols() != self.fill_values.len() {
            return Err(ArbokError::Validation(format!(
                "imputer fitted on {} columns, got {}",
                self.fill_values.len(),
                x.ncols()
            )));
        }

        let mut result = x.clone();
        for (mut column, fill) in result.axis_iter_mut(Axis(1)).zip(&self.fill_values) {
            column.mapv_inplace(|v| if v.is_finite() { v } else { *fill });
        }
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Fitted fill value per column
    pub fn fill_values(&self) -> &[f64] {
        &self.fill_values
    }

    fn compute_fill_value(&self, column: ArrayView1<f64>) -> f64 {
        let values = sorted_finite(column);
        match &self.strategy {
            ImputeStrategy::Constant(c) => *c,
            ImputeStrategy::Mean => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            ImputeStrategy::Median => quantile(&values, 0.5).unwrap_or(0.0),
            ImputeStrategy::MostFrequent => Self::mode(&values).unwrap_or(0.0),
        }
    }

    /// Most frequent value of an ascending slice; ties go to the smallest value
    fn mode(sorted: &[f64]) -> Option<f64> {
        let mut best: Option<(f64, usize)> = None;
        let mut i = 0;
        while i < sorted.len() {
            let mut j = i;
            while j < sorted.len() && sorted[j] == sorted[i] {
                j += 1;
            }
            let count = j - i;
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((sorted[i], count));
            }
            i = j;
        }
        best.map(|(v, _)| v)
    }
}
