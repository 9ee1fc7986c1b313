//! arbok - retry-aware fitting wrapper for external estimators
//!
//! This crate wraps an estimator that lives elsewhere and adds:
//! - Optional feature preprocessing before fit and predict
//! - Input validation and bounded retry when fitting hits a validation error
//! - Extraction of search results (cv results, best trial) after each fit
//! - Verbose start/done/fail status lines with timings
//!
//! # Modules
//!
//! - [`wrapper`] - The fitting wrapper, its configuration and adapters
//! - [`estimator`] - Contracts wrapped estimators implement
//! - [`preprocessing`] - Preprocessor contract and a ready-made pipeline
//! - [`params`] - Parameter maps for `get_params` / `set_params`
//! - [`status`] - Verbose status output
//!
//! # Example
//!
//! ```ignore
//! use arbok::prelude::*;
//!
//! let mut wrapper = Wrapper::new(my_estimator, SingleFit::new())
//!     .with_preprocessor(ParamPreprocessor::new());
//! wrapper.fit(&x, &y, None, &Params::new())?;
//! let predictions = wrapper.predict(&x)?;
//! ```

pub mod error;
pub mod estimator;
pub mod params;
pub mod preprocessing;
pub mod status;
pub mod wrapper;

pub use error::{ArbokError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{ArbokError, Result};

    // Collaborator contracts
    pub use crate::estimator::{Estimator, ResultSource};
    pub use crate::preprocessing::Preprocessor;

    // Parameters
    pub use crate::params::{ParamValue, Params};

    // Preprocessing
    pub use crate::preprocessing::{
        FeatureType, ImputeStrategy, ParamPreprocessor, PreprocessingConfig, ScalerType,
    };

    // Wrapper
    pub use crate::wrapper::{
        CvResults, ResultSourceFit, SearchAdapter, SearchResults, SingleFit, TrialRecord, Wrapper,
        WrapperConfig,
    };

    // Status output
    pub use crate::status::StatusReporter;
}
