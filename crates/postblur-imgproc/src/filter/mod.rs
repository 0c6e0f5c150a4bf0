//! Filter operations
//!
//! This module provides the kernel and the row convolution used by the blur.

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
