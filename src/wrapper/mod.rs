//! Fitting wrapper
//!
//! Orchestrates the fit/refit/predict lifecycle around an external estimator:
//! - Optional preprocessing before fit and predict
//! - Input validation with bounded retry on validation errors
//! - Result extraction through a [`SearchAdapter`]
//! - Verbose timing of each stage

mod adapter;
mod config;
mod engine;
mod results;
pub mod validation;

pub use adapter::{ResultSourceFit, SearchAdapter, SingleFit};
pub use config::WrapperConfig;
pub use engine::Wrapper;
pub use results::{CvResults, SearchResults, TrialRecord};
