//! Wrapper configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for [`Wrapper`](super::Wrapper)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapperConfig {
    /// Run a final refit over the full data after fitting
    pub refit: bool,

    /// Print start/done/fail status lines
    pub verbose: bool,

    /// Retry `fit` when it fails with a validation error
    pub retry_on_error: bool,

    /// Additional attempts allowed when `retry_on_error` is set
    pub max_retries: u32,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            refit: true,
            verbose: false,
            retry_on_error: true,
            max_retries: 1,
        }
    }
}

impl WrapperConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to toggle the final refit
    pub fn with_refit(mut self, refit: bool) -> Self {
        self.refit = refit;
        self
    }

    /// Builder method to toggle status output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder method to toggle retry on validation errors
    pub fn with_retry_on_error(mut self, retry: bool) -> Self {
        self.retry_on_error = retry;
        self
    }

    /// Builder method to set the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Upper bound on attempts a single `fit` call makes
    pub fn max_attempts(&self) -> usize {
        if self.retry_on_error {
            (self.max_retries as usize).saturating_add(1)
        } else {
            1
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
