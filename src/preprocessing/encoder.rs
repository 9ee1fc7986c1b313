//! One-hot encoding of nominal columns
//!
//! Nominal columns hold category codes as floats. Each column expands into one
//! indicator column per category seen at fit time; unseen codes encode as all
//! zeros.

use crate::error::{ArbokError, Result};
use super::sorted_finite;
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<Vec<f64>>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the categories of every column of `x`
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        self.categories = x
            .axis_iter(Axis(1))
            .map(|column| {
                let mut values = sorted_finite(column);
                values.dedup_by(|a, b| a.total_cmp(b).is_eq());
                values
            })
            .collect();
        self.is_fitted = true;
        Ok(self)
    }

    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ArbokError::NotFitted);
        }
        if x.ncols() != self.categories.len() {
            return Err(ArbokError::Validation(format!(
                "encoder fitted on {} columns, got {}",
                self.categories.len(),
                x.ncols()
            )));
        }

        let mut result = Array2::<f64>::zeros((x.nrows(), self.n_output_columns()));
        let mut offset = 0;
        for (column, categories) in x.axis_iter(Axis(1)).zip(&self.categories) {
            for (row, value) in column.iter().enumerate() {
                if let Ok(idx) = categories.binary_search_by(|c| c.total_cmp(value)) {
                    result[[row, offset + idx]] = 1.0;
                }
            }
            offset += categories.len();
        }
        Ok(result)
    }

    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Total number of indicator columns produced
    pub fn n_output_columns(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    pub fn categories(&self) -> &[Vec<f64>] {
        &self.categories
    }
}
