//! Search results pulled from the wrapped estimator

use crate::error::{ArbokError, Result};
use crate::params::Params;
use serde::Serialize;

/// One row of the cv results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    /// Parameters evaluated in this trial
    pub params: Params,
    /// Mean validation score across folds (higher is better)
    pub mean_test_score: Option<f64>,
    /// Standard deviation of the validation score
    pub std_test_score: Option<f64>,
    /// Trial duration in seconds
    pub fit_time_secs: f64,
}

impl TrialRecord {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            mean_test_score: None,
            std_test_score: None,
            fit_time_secs: 0.0,
        }
    }

    pub fn with_score(mut self, mean: f64, std: Option<f64>) -> Self {
        self.mean_test_score = Some(mean);
        self.std_test_score = std;
        self
    }

    pub fn with_fit_time(mut self, secs: f64) -> Self {
        self.fit_time_secs = secs;
        self
    }
}

/// Per-trial results keyed by trial index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CvResults {
    trials: Vec<TrialRecord>,
}

impl CvResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trial; returns its index
    pub fn add_trial(&mut self, trial: TrialRecord) -> usize {
        self.trials.push(trial);
        self.trials.len() - 1
    }

    pub fn get(&self, idx: usize) -> Option<&TrialRecord> {
        self.trials.get(idx)
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Index of the highest-scoring trial. Unscored and NaN trials never win;
    /// ties go to the earliest trial.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, trial) in self.trials.iter().enumerate() {
            let Some(score) = trial.mean_test_score.filter(|s| !s.is_nan()) else {
                continue;
            };
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<TrialRecord> for CvResults {
    fn from_iter<I: IntoIterator<Item = TrialRecord>>(iter: I) -> Self {
        Self {
            trials: iter.into_iter().collect(),
        }
    }
}

/// Everything a fit extracts from the result source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub cv_results: CvResults,
    pub best_index: usize,
    pub best_params: Params,
    pub best_score: Option<f64>,
}

impl SearchResults {
    /// Assemble results, checking that `best_index` addresses a trial
    pub fn new(
        cv_results: CvResults,
        best_index: usize,
        best_params: Params,
        best_score: Option<f64>,
    ) -> Result<Self> {
        if best_index >= cv_results.len() {
            return Err(ArbokError::Estimator(format!(
                "best index {} out of range for {} trials",
                best_index,
                cv_results.len()
            )));
        }
        Ok(Self {
            cv_results,
            best_index,
            best_params,
            best_score,
        })
    }

    /// Derive best index, parameters and score from the table itself.
    ///
    /// Falls back to the first trial when no trial carries a score.
    pub fn from_cv_results(cv_results: CvResults) -> Result<Self> {
        let best_index = cv_results.best_index().unwrap_or(0);
        let best = cv_results.get(best_index).ok_or_else(|| {
            ArbokError::Estimator("search produced no trials".to_string())
        })?;
        let best_params = best.params.clone();
        let best_score = best.mean_test_score;
        Self::new(cv_results, best_index, best_params, best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;

    fn trial(depth: i64, score: Option<f64>) -> TrialRecord {
        let mut params = Params::new();
        params.insert("max_depth".into(), ParamValue::Int(depth));
        let record = TrialRecord::new(params);
        match score {
            Some(s) => record.with_score(s, None),
            None => record,
        }
    }

    #[test]
    fn test_best_index_prefers_highest_score() {
        let results: CvResults = vec![
            trial(2, Some(0.7)),
            trial(4, Some(0.9)),
            trial(8, Some(f64::NAN)),
            trial(16, None),
        ]
        .into_iter()
        .collect();

        assert_eq!(results.best_index(), Some(1));
    }

    #[test]
    fn test_best_index_ties_go_to_first() {
        let results: CvResults = vec![trial(2, Some(0.5)), trial(4, Some(0.5))]
            .into_iter()
            .collect();
        assert_eq!(results.best_index(), Some(0));
    }

    #[test]
    fn test_from_cv_results() {
        let results: CvResults = vec![trial(2, Some(0.1)), trial(3, Some(0.4))]
            .into_iter()
            .collect();
        let search = SearchResults::from_cv_results(results).unwrap();

        assert_eq!(search.best_index, 1);
        assert_eq!(search.best_score, Some(0.4));
        assert_eq!(search.best_params["max_depth"], ParamValue::Int(3));
    }

    #[test]
    fn test_from_cv_results_unscored_falls_back_to_first() {
        let results: CvResults = vec![trial(5, None)].into_iter().collect();
        let search = SearchResults::from_cv_results(results).unwrap();
        assert_eq!(search.best_index, 0);
        assert_eq!(search.best_score, None);
    }

    #[test]
    fn test_empty_results_are_rejected() {
        assert!(SearchResults::from_cv_results(CvResults::new()).is_err());
        assert!(SearchResults::new(CvResults::new(), 0, Params::new(), None).is_err());
    }

    #[test]
    fn test_to_json() {
        let mut results = CvResults::new();
        let idx = results.add_trial(trial(3, Some(0.5)).with_fit_time(1.5));
        assert_eq!(idx, 0);

        let json = results.to_json().unwrap();
        assert!(json.contains("\"max_depth\": 3"));
        assert!(json.contains("\"mean_test_score\": 0.5"));
    }
}
