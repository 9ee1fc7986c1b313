//! Input checks run before the estimator sees any data

use crate::error::{ArbokError, Result};
use ndarray::{Array1, Array2};

/// Check that `x` and `y` describe the same non-empty set of finite samples
pub fn check_x_y(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    let (n_samples, n_features) = x.dim();

    if n_samples == 0 {
        return Err(ArbokError::Validation(
            "found array with 0 samples, a minimum of 1 is required".to_string(),
        ));
    }
    if n_features == 0 {
        return Err(ArbokError::Validation(
            "found array with 0 features, a minimum of 1 is required".to_string(),
        ));
    }
    if y.len() != n_samples {
        return Err(ArbokError::Validation(format!(
            "inconsistent numbers of samples: X has {}, y has {}",
            n_samples,
            y.len()
        )));
    }
    if !x.iter().all(|v| v.is_finite()) {
        return Err(ArbokError::Validation(
            "X contains NaN or infinity".to_string(),
        ));
    }
    if !y.iter().all(|v| v.is_finite()) {
        return Err(ArbokError::Validation(
            "y contains NaN or infinity".to_string(),
        ));
    }
    Ok(())
}

/// Sorted unique values of `y`
pub fn unique_labels(y: &Array1<f64>) -> Array1<f64> {
    let mut labels = y.to_vec();
    labels.sort_by(|a, b| a.total_cmp(b));
    labels.dedup_by(|a, b| a.total_cmp(b).is_eq());
    Array1::from(labels)
}
