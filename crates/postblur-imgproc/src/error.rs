use postblur_image::ImageError;

use crate::parallel::ParallelError;
use crate::task::Channel;

/// Errors raised while configuring or running the blur.
///
/// Every variant is a programming or configuration error found synchronously;
/// none of them is worth retrying.
#[derive(thiserror::Error, Debug)]
pub enum BlurError {
    /// An image or plane argument was rejected.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The input image has a zero-sized dimension.
    #[error("Cannot blur an empty image. Got: {0}x{1}")]
    EmptyImage(usize, usize),

    /// The worker pool could not be set up.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The configuration could not be parsed.
    #[error("Invalid blur configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A channel task finished without posting its plane.
    #[error("No blurred plane was posted for the {0} channel")]
    MissingChannel(Channel),

    /// A channel task panicked before posting its result.
    #[error("Blur task for the {channel} channel panicked: {message}")]
    TaskPanicked {
        /// The channel whose task failed.
        channel: Channel,
        /// The panic payload, when it was a string.
        message: String,
    },
}
