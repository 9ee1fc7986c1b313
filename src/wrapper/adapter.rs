//! Extension points supplying algorithm-specific fitting behavior
//!
//! [`Wrapper`](super::Wrapper) owns the lifecycle; a [`SearchAdapter`] says how
//! a particular kind of estimator is fitted, refitted and asked for its
//! results. Every method defaults to [`ArbokError::NotImplemented`].

use crate::error::{ArbokError, Result};
use crate::estimator::{Estimator, ResultSource};
use crate::params::Params;
use super::results::{CvResults, SearchResults, TrialRecord};
use ndarray::{Array1, Array2};
use std::time::Instant;
use tracing::debug;

pub trait SearchAdapter<E: Estimator> {
    /// Fit `estimator` on preprocessed, validated data
    fn fit(
        &mut self,
        _estimator: &mut E,
        _x: &Array2<f64>,
        _y: &Array1<f64>,
        _groups: Option<&Array1<i64>>,
        _fit_params: &Params,
    ) -> Result<()> {
        Err(ArbokError::NotImplemented("fit".to_string()))
    }

    /// Final pass over the full data after results were extracted
    fn refit(&mut self, _estimator: &mut E, _x: &Array2<f64>, _y: &Array1<f64>) -> Result<()> {
        Err(ArbokError::NotImplemented("refit".to_string()))
    }

    /// Results of the last `fit`
    fn cv_results(&self, _estimator: &E) -> Result<SearchResults> {
        Err(ArbokError::NotImplemented("cv_results".to_string()))
    }
}

/// Fits the estimator once and reports that single fit as the only trial
#[derive(Debug, Clone, Default)]
pub struct SingleFit {
    fit_time: Option<f64>,
}

impl SingleFit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Estimator> SearchAdapter<E> for SingleFit {
    fn fit(
        &mut self,
        estimator: &mut E,
        x: &Array2<f64>,
        y: &Array1<f64>,
        _groups: Option<&Array1<i64>>,
        fit_params: &Params,
    ) -> Result<()> {
        let start = Instant::now();
        estimator.fit(x, y, fit_params)?;
        self.fit_time = Some(start.elapsed().as_secs_f64());
        Ok(())
    }

    fn refit(&mut self, estimator: &mut E, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        estimator.fit(x, y, &Params::new())
    }

    fn cv_results(&self, estimator: &E) -> Result<SearchResults> {
        let fit_time = self
            .fit_time
            .ok_or_else(|| ArbokError::Estimator("no fit has completed".to_string()))?;
        let params = estimator.get_params(false);

        let mut cv_results = CvResults::new();
        let best_index = cv_results.add_trial(TrialRecord::new(params.clone()).with_fit_time(fit_time));
        SearchResults::new(cv_results, best_index, params, None)
    }
}

/// For estimators that run their own search and expose the results through
/// [`ResultSource`]. Refit applies the best parameters and fits once more.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultSourceFit;

impl ResultSourceFit {
    pub fn new() -> Self {
        Self
    }

    fn results<E: ResultSource>(estimator: &E) -> Result<SearchResults> {
        estimator.search_results().ok_or_else(|| {
            ArbokError::Estimator("estimator exposes no search results".to_string())
        })
    }
}

impl<E: Estimator + ResultSource> SearchAdapter<E> for ResultSourceFit {
    fn fit(
        &mut self,
        estimator: &mut E,
        x: &Array2<f64>,
        y: &Array1<f64>,
        _groups: Option<&Array1<i64>>,
        fit_params: &Params,
    ) -> Result<()> {
        estimator.fit(x, y, fit_params)
    }

    fn refit(&mut self, estimator: &mut E, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let best = Self::results(estimator)?;
        debug!(best_index = best.best_index, "Refitting with best parameters");
        estimator.set_params(best.best_params)?;
        estimator.fit(x, y, &Params::new())
    }

    fn cv_results(&self, estimator: &E) -> Result<SearchResults> {
        Self::results(estimator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use ndarray::array;

    #[derive(Debug, Default)]
    struct CountingModel {
        fits: usize,
        depth: i64,
        trials: Option<CvResults>,
    }

    impl Estimator for CountingModel {
        fn fit(&mut self, _x: &Array2<f64>, _y: &Array1<f64>, _fit_params: &Params) -> Result<()> {
            self.fits += 1;
            let scored = |depth: i64, score: f64| {
                let mut params = Params::new();
                params.insert("depth".into(), ParamValue::Int(depth));
                TrialRecord::new(params).with_score(score, None)
            };
            self.trials = Some(vec![scored(1, 0.6), scored(3, 0.8)].into_iter().collect());
            Ok(())
        }

        fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
            Ok(Array1::zeros(x.nrows()))
        }

        fn get_params(&self, _deep: bool) -> Params {
            let mut params = Params::new();
            params.insert("depth".into(), ParamValue::Int(self.depth));
            params
        }

        fn set_params(&mut self, mut params: Params) -> Result<()> {
            if let Some(depth) = params.remove("depth").and_then(|v| v.as_int()) {
                self.depth = depth;
            }
            Ok(())
        }
    }

    impl ResultSource for CountingModel {
        fn search_results(&self) -> Option<SearchResults> {
            self.trials
                .clone()
                .and_then(|t| SearchResults::from_cv_results(t).ok())
        }
    }

    struct Bare;
    impl SearchAdapter<CountingModel> for Bare {}

    fn data() -> (Array2<f64>, Array1<f64>) {
        (array![[1.0], [2.0]], array![0.0, 1.0])
    }

    #[test]
    fn test_default_extension_points_are_not_implemented() {
        let (x, y) = data();
        let mut model = CountingModel::default();
        let mut adapter = Bare;

        let err = adapter.fit(&mut model, &x, &y, None, &Params::new()).unwrap_err();
        assert!(matches!(err, ArbokError::NotImplemented(ref m) if m == "fit"));
        assert!(matches!(
            adapter.refit(&mut model, &x, &y),
            Err(ArbokError::NotImplemented(_))
        ));
        assert!(matches!(
            adapter.cv_results(&model),
            Err(ArbokError::NotImplemented(_))
        ));
        assert_eq!(model.fits, 0);
    }

    #[test]
    fn test_single_fit_reports_one_trial() {
        let (x, y) = data();
        let mut model = CountingModel { depth: 7, ..Default::default() };
        let mut adapter = SingleFit::new();

        assert!(SearchAdapter::<CountingModel>::cv_results(&adapter, &model).is_err());
        adapter.fit(&mut model, &x, &y, None, &Params::new()).unwrap();
        let results = adapter.cv_results(&model).unwrap();

        assert_eq!(results.cv_results.len(), 1);
        assert_eq!(results.best_index, 0);
        assert_eq!(results.best_params["depth"], ParamValue::Int(7));
        assert_eq!(results.best_score, None);
    }

    #[test]
    fn test_result_source_refit_applies_best_params() {
        let (x, y) = data();
        let mut model = CountingModel::default();
        let mut adapter = ResultSourceFit::new();

        assert!(adapter.cv_results(&model).is_err());
        adapter.fit(&mut model, &x, &y, None, &Params::new()).unwrap();

        let results = adapter.cv_results(&model).unwrap();
        assert_eq!(results.best_index, 1);
        assert_eq!(results.best_score, Some(0.8));

        adapter.refit(&mut model, &x, &y).unwrap();
        assert_eq!(model.depth, 3);
        assert_eq!(model.fits, 2);
    }
}
