//! Per-frame separable blur post-processing for multi-channel images.
//!
//! ```
//! use postblur::image::ColorImage;
//! use postblur::imgproc::{BlurConfig, ParallelGaussianBlur};
//!
//! let blur = ParallelGaussianBlur::new(BlurConfig::default()).unwrap();
//! let frame = ColorImage::from_size_val([32, 32].into(), 0.25).unwrap();
//! let blurred = blur.process(&frame).unwrap();
//! assert_eq!(blurred.size(), frame.size());
//! ```

#[doc(inline)]
pub use postblur_image as image;

#[doc(inline)]
pub use postblur_imgproc as imgproc;
