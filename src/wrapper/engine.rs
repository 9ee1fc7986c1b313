//! Fitting wrapper implementation

use crate::error::{ArbokError, Result};
use crate::estimator::Estimator;
use crate::params::{take_bool, take_u32, type_mismatch, ParamValue, Params};
use crate::preprocessing::Preprocessor;
use crate::status::{ActionId, StatusReporter};
use super::adapter::SearchAdapter;
use super::config::WrapperConfig;
use super::results::{CvResults, SearchResults};
use super::validation::{check_x_y, unique_labels};
use ndarray::{Array1, Array2};
use std::borrow::Cow;
use std::cell::RefCell;
use tracing::{debug, warn};

const FITTING: &str = "Fitting";
const REFITTING: &str = "Refitting";
const PREDICT: &str = "predict()";
const PREDICT_PROBA: &str = "predict_proba()";

const REFIT_KEY: &str = "refit";
const VERBOSE_KEY: &str = "verbose";
const RETRY_KEY: &str = "retry_on_error";
const MAX_RETRIES_KEY: &str = "max_retries";
const PREPROCESSOR_KEY: &str = "preprocessor";

/// State derived from the last successful fit
#[derive(Debug, Clone)]
struct FitState {
    labels: Array1<f64>,
    search: SearchResults,
}

/// Retry-aware fitting wrapper around an estimator.
///
/// `fit` runs the optional preprocessor, validates the data, delegates to the
/// [`SearchAdapter`] and stores the extracted search results. Validation
/// failures are retried up to `max_retries` times when `retry_on_error` is
/// set. The wrapper takes `&mut self` to fit and must not be shared across
/// threads while doing so.
#[derive(Debug)]
pub struct Wrapper<E: Estimator, A: SearchAdapter<E>> {
    estimator: E,
    adapter: A,
    preprocessor: Option<Box<dyn Preprocessor>>,
    config: WrapperConfig,
    state: Option<FitState>,
    fit_attempts: usize,
    reporter: RefCell<StatusReporter>,
}

impl<E: Estimator, A: SearchAdapter<E>> Wrapper<E, A> {
    /// Create a new wrapper with default configuration
    pub fn new(estimator: E, adapter: A) -> Self {
        Self::with_config(estimator, adapter, WrapperConfig::default())
    }

    /// Create a new wrapper with custom configuration
    pub fn with_config(estimator: E, adapter: A, config: WrapperConfig) -> Self {
        Self {
            estimator,
            adapter,
            preprocessor: None,
            config,
            state: None,
            fit_attempts: 0,
            reporter: RefCell::new(StatusReporter::stdout()),
        }
    }

    /// Builder method to attach a preprocessor
    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessor = Some(Box::new(preprocessor));
        self
    }

    /// Builder method to redirect status output
    pub fn with_reporter(mut self, reporter: StatusReporter) -> Self {
        self.reporter = RefCell::new(reporter);
        self
    }

    /// Fit the wrapped estimator.
    ///
    /// On success the label set and search results of this call replace those
    /// of any earlier fit. On failure the wrapper is left unfitted, since the
    /// preprocessor and estimator may already hold state from this call.
    pub fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        groups: Option<&Array1<i64>>,
        fit_params: &Params,
    ) -> Result<&mut Self> {
        let labels = unique_labels(y);
        let max_attempts = self.config.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.fit_attempts = attempt;
            debug!(attempt, max_attempts, "Starting fit attempt");

            match self.fit_once(x, y, groups, fit_params) {
                Ok(search) => {
                    self.state = Some(FitState { labels, search });
                    return Ok(self);
                }
                Err(e)
                    if e.is_validation() && self.config.retry_on_error && attempt < max_attempts =>
                {
                    warn!(attempt, error = %e, "Fitting failed. Attempting to fit again.");
                }
                Err(e) => {
                    self.state = None;
                    return Err(e);
                }
            }
        }
    }

    /// Predict with the fitted estimator
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let id = self.start(PREDICT);
        let result = self
            .check_is_fitted()
            .and_then(|_| self.transform(x))
            .and_then(|x_t| self.estimator.predict(&x_t));
        self.finish(PREDICT, id, &result);
        result
    }

    /// Class probabilities from the fitted estimator.
    ///
    /// Fails with [`ArbokError::CapabilityNotSupported`] when the estimator
    /// cannot estimate probabilities.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let id = self.start(PREDICT_PROBA);
        let result = self
            .check_is_fitted()
            .and_then(|_| self.transform(x))
            .and_then(|x_t| {
                self.estimator.predict_proba(&x_t).map_err(|e| {
                    if e.is_unsupported_operation() {
                        ArbokError::CapabilityNotSupported("predict_proba".to_string())
                    } else {
                        e
                    }
                })
            });
        self.finish(PREDICT_PROBA, id, &result);
        result
    }

    /// Estimator parameters merged with the wrapper's own keys
    pub fn get_params(&self, deep: bool) -> Params {
        let mut params = self.estimator.get_params(deep);
        params.insert(REFIT_KEY.into(), self.config.refit.into());
        params.insert(VERBOSE_KEY.into(), self.config.verbose.into());
        params.insert(RETRY_KEY.into(), self.config.retry_on_error.into());
        params.insert(MAX_RETRIES_KEY.into(), self.config.max_retries.into());
        params.insert(
            PREPROCESSOR_KEY.into(),
            ParamValue::Preprocessor(self.preprocessor.clone()),
        );
        params
    }

    /// Apply wrapper keys to the wrapper and forward the rest to the estimator.
    ///
    /// Nothing changes when any key is rejected.
    pub fn set_params(&mut self, mut params: Params) -> Result<&mut Self> {
        let refit = take_bool(&mut params, REFIT_KEY)?;
        let verbose = take_bool(&mut params, VERBOSE_KEY)?;
        let retry_on_error = take_bool(&mut params, RETRY_KEY)?;
        let max_retries = take_u32(&mut params, MAX_RETRIES_KEY)?;
        let preprocessor = match params.remove(PREPROCESSOR_KEY) {
            None => None,
            Some(ParamValue::Preprocessor(p)) => Some(p),
            Some(ParamValue::Null) => Some(None),
            Some(other) => {
                return Err(type_mismatch(PREPROCESSOR_KEY, &other, "preprocessor"))
            }
        };

        if !params.is_empty() {
            self.estimator.set_params(params)?;
        }

        let config = &mut self.config;
        config.refit = refit.unwrap_or(config.refit);
        config.verbose = verbose.unwrap_or(config.verbose);
        config.retry_on_error = retry_on_error.unwrap_or(config.retry_on_error);
        config.max_retries = max_retries.unwrap_or(config.max_retries);
        if let Some(preprocessor) = preprocessor {
            self.preprocessor = preprocessor;
        }
        Ok(self)
    }

    /// Unique labels seen by the last successful fit
    pub fn classes(&self) -> Option<&Array1<f64>> {
        self.state.as_ref().map(|s| &s.labels)
    }

    pub fn search_results(&self) -> Option<&SearchResults> {
        self.state.as_ref().map(|s| &s.search)
    }

    pub fn cv_results(&self) -> Option<&CvResults> {
        self.search_results().map(|s| &s.cv_results)
    }

    pub fn best_index(&self) -> Option<usize> {
        self.search_results().map(|s| s.best_index)
    }

    pub fn best_params(&self) -> Option<&Params> {
        self.search_results().map(|s| &s.best_params)
    }

    pub fn best_score(&self) -> Option<f64> {
        self.search_results().and_then(|s| s.best_score)
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_some()
    }

    /// Attempts used by the most recent `fit` call
    pub fn fit_attempts(&self) -> usize {
        self.fit_attempts
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn preprocessor(&self) -> Option<&dyn Preprocessor> {
        self.preprocessor.as_deref()
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// One pass through preprocessing, validation, fit, result extraction and refit
    fn fit_once(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        groups: Option<&Array1<i64>>,
        fit_params: &Params,
    ) -> Result<SearchResults> {
        let x_t: Cow<'_, Array2<f64>> = match self.preprocessor.as_mut() {
            Some(p) => Cow::Owned(p.fit_transform(x)?),
            None => Cow::Borrowed(x),
        };
        check_x_y(&x_t, y)?;

        let id = self.start(FITTING);
        let fitted = self
            .adapter
            .fit(&mut self.estimator, &x_t, y, groups, fit_params)
            .and_then(|_| self.adapter.cv_results(&self.estimator));
        self.finish(FITTING, id, &fitted);
        let search = fitted?;

        if self.config.refit {
            let id = self.start(REFITTING);
            let refitted = self.adapter.refit(&mut self.estimator, &x_t, y);
            self.finish(REFITTING, id, &refitted);
            refitted?;
        }

        Ok(search)
    }

    fn check_is_fitted(&self) -> Result<&FitState> {
        self.state.as_ref().ok_or(ArbokError::NotFitted)
    }

    fn transform<'a>(&self, x: &'a Array2<f64>) -> Result<Cow<'a, Array2<f64>>> {
        match &self.preprocessor {
            Some(p) => Ok(Cow::Owned(p.transform(x)?)),
            None => Ok(Cow::Borrowed(x)),
        }
    }

    fn start(&self, action: &str) -> Option<ActionId> {
        self.config
            .verbose
            .then(|| self.reporter.borrow_mut().start(action))
    }

    fn finish<T>(&self, action: &str, id: Option<ActionId>, outcome: &Result<T>) {
        if let Some(id) = id {
            let mut reporter = self.reporter.borrow_mut();
            match outcome {
                Ok(_) => reporter.done(action, id),
                Err(_) => reporter.fail(action, id),
            }
        }
    }
}
