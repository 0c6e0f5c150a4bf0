use std::time::Duration;

use postblur_image::ImageSize;

use crate::task::Channel;

/// Receives coarse progress events from the blur coordinator.
///
/// Callbacks fire once per channel task, never per pixel, and may be invoked
/// from worker threads concurrently.
pub trait BlurObserver: Send + Sync {
    /// Called on the worker right before a channel task starts.
    fn on_task_start(&self, _channel: Channel, _size: ImageSize) {}

    /// Called on the worker right after a channel task finished successfully.
    fn on_task_finish(&self, _channel: Channel, _elapsed: Duration) {}
}

/// An observer that forwards every event to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BlurObserver for LogObserver {
    fn on_task_start(&self, channel: Channel, size: ImageSize) {
        log::debug!("blurring {channel} channel of {size}");
    }

    fn on_task_finish(&self, channel: Channel, elapsed: Duration) {
        log::debug!("{channel} channel blurred in {elapsed:?}");
    }
}
