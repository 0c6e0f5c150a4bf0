#![deny(missing_docs)]
//! Image types and channel split/merge for the postblur pipeline

/// image representation for the post-processing stages.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{ColorImage, Image, ImageSize, IntensityPlane, RgbaImage};
