//! Collaborator contracts for wrapped estimators
//!
//! The wrapper never learns anything itself. Every model it drives implements
//! [`Estimator`]; estimators that run an internal search and keep per-trial
//! results also implement [`ResultSource`].

use crate::error::{ArbokError, Result};
use crate::params::Params;
use crate::wrapper::SearchResults;
use ndarray::{Array1, Array2};
use std::fmt;

/// Trait for wrapped estimators
pub trait Estimator: fmt::Debug {
    /// Fit the estimator to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>, fit_params: &Params) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Class probability estimates, one row per sample.
    ///
    /// Estimators without probability support keep the default, which fails
    /// with [`ArbokError::MissingCapability`].
    fn predict_proba(&self, _x: &Array2<f64>) -> Result<Array2<f64>> {
        Err(ArbokError::MissingCapability("predict_proba".to_string()))
    }

    /// Current parameters. `deep` asks nested estimators to include their own.
    fn get_params(&self, deep: bool) -> Params;

    /// Update the given parameters, leaving the others untouched
    fn set_params(&mut self, params: Params) -> Result<()>;
}

/// Access to the per-trial results of an estimator's internal search
pub trait ResultSource {
    /// Results of the most recent search, if one has run
    fn search_results(&self) -> Option<SearchResults>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use ndarray::array;

    #[derive(Debug, Default)]
    struct ConstantModel {
        value: f64,
    }

    impl Estimator for ConstantModel {
        fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>, _fit_params: &Params) -> Result<()> {
            self.value = y.mean().unwrap_or(0.0);
            Ok(())
        }

        fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
            Ok(Array1::from_elem(x.nrows(), self.value))
        }

        fn get_params(&self, _deep: bool) -> Params {
            let mut params = Params::new();
            params.insert("value".into(), ParamValue::Float(self.value));
            params
        }

        fn set_params(&mut self, mut params: Params) -> Result<()> {
            if let Some(v) = params.remove("value").and_then(|v| v.as_float()) {
                self.value = v;
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_predict_proba_is_missing() {
        let model = ConstantModel::default();
        let err = model.predict_proba(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ArbokError::MissingCapability(_)));
    }

    #[test]
    fn test_estimator_as_trait_object() {
        let mut model: Box<dyn Estimator> = Box::new(ConstantModel::default());
        model
            .fit(&array![[1.0], [2.0]], &array![2.0, 4.0], &Params::new())
            .unwrap();
        assert_eq!(model.predict(&array![[0.0]]).unwrap(), array![3.0]);
    }
}
