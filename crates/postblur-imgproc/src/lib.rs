#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// per-frame blur coordinator module.
pub mod blur;

/// blur configuration.
pub mod config;

/// error types for the blur pipeline.
pub mod error;

/// image filtering module.
pub mod filter;

/// coarse-grained progress callbacks.
pub mod observer;

/// module containing parallization utilities.
pub mod parallel;

/// post-processing stage interface.
pub mod stage;

/// single channel blur work unit.
pub mod task;

/// image transposition module.
pub mod transpose;

pub use crate::blur::ParallelGaussianBlur;
pub use crate::config::BlurConfig;
pub use crate::error::BlurError;
