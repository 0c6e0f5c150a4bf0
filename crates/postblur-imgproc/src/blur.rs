use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Instant,
};

use postblur_image::{ColorImage, ImageError, IntensityPlane, RgbaImage};

use crate::{
    config::BlurConfig,
    error::BlurError,
    filter::kernels::CosineKernel,
    observer::BlurObserver,
    parallel::Executor,
    stage::PostProcessStage,
    task::{Channel, ChannelBlurTask},
};

/// Blurs color images by running one [`ChannelBlurTask`] per channel.
///
/// Each call splits the image into red, green and blue planes, builds the
/// kernel once, dispatches the three tasks through the configured
/// [`crate::parallel::ExecutionStrategy`] and waits for all of them before
/// merging the planes back. Either every channel is blurred or the call fails.
///
/// # Examples
///
/// ```
/// use postblur_image::ColorImage;
/// use postblur_imgproc::{BlurConfig, ParallelGaussianBlur};
///
/// let blur = ParallelGaussianBlur::new(BlurConfig::default().with_tap_count(2)).unwrap();
///
/// let image = ColorImage::from_size_val([16, 8].into(), 1.0).unwrap();
/// let blurred = blur.process(&image).unwrap();
///
/// assert_eq!(blurred.size(), image.size());
/// ```
pub struct ParallelGaussianBlur {
    config: BlurConfig,
    executor: Executor,
    observer: Option<Arc<dyn BlurObserver>>,
}

impl std::fmt::Debug for ParallelGaussianBlur {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ParallelGaussianBlur")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ParallelGaussianBlur {
    /// Create a blur stage from its configuration.
    ///
    /// A `Fixed` strategy builds its thread pool here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool cannot be built.
    pub fn new(config: BlurConfig) -> Result<Self, BlurError> {
        config.validate()?;
        let executor = Executor::new(config.strategy)?;

        Ok(Self {
            config,
            executor,
            observer: None,
        })
    }

    /// Attach an observer notified at the start and end of each channel task.
    pub fn with_observer(mut self, observer: Arc<dyn BlurObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The configuration this stage was built with.
    pub fn config(&self) -> &BlurConfig {
        &self.config
    }

    /// Blur the red, green and blue channels of an image.
    ///
    /// # Arguments
    ///
    /// * `image` - The source image with shape (H, W, 3).
    ///
    /// # Returns
    ///
    /// A new image of the same size with every channel blurred.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty or a channel task fails.
    pub fn process(&self, image: &ColorImage) -> Result<ColorImage, BlurError> {
        if image.is_empty() {
            return Err(BlurError::EmptyImage(image.cols(), image.rows()));
        }

        let planes = [image.channel(0)?, image.channel(1)?, image.channel(2)?];
        let blurred = self.process_planes(planes)?;

        Ok(ColorImage::from_channels(blurred)?)
    }

    /// Blur the color channels of an image and pass alpha through unchanged.
    ///
    /// # Arguments
    ///
    /// * `image` - The source image with shape (H, W, 4).
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty or a channel task fails.
    pub fn process_rgba(&self, image: &RgbaImage) -> Result<RgbaImage, BlurError> {
        if image.is_empty() {
            return Err(BlurError::EmptyImage(image.cols(), image.rows()));
        }

        let planes = [image.channel(0)?, image.channel(1)?, image.channel(2)?];
        let alpha = image.channel(3)?;
        let [r, g, b] = self.process_planes(planes)?;

        Ok(RgbaImage::from_channels([r, g, b, alpha])?)
    }

    /// Blur three already split planes, given in red, green, blue order.
    ///
    /// # Errors
    ///
    /// Returns an error if the planes differ in size, are empty, or a task fails.
    pub fn process_planes(
        &self,
        planes: [IntensityPlane; 3],
    ) -> Result<[IntensityPlane; 3], BlurError> {
        let size = planes[0].size();
        if let Some(other) = planes.iter().find(|plane| plane.size() != size) {
            return Err(ImageError::InvalidImageSize(
                other.cols(),
                other.rows(),
                size.width,
                size.height,
            )
            .into());
        }

        if size.is_empty() {
            return Err(BlurError::EmptyImage(size.width, size.height));
        }

        let kernel = CosineKernel::approximate(self.config.tap_count);
        let tasks = Channel::ALL
            .into_iter()
            .zip(planes)
            .map(|(channel, plane)| ChannelBlurTask::new(channel, plane))
            .collect::<Vec<_>>();

        log::debug!(
            "blurring {size} with {} taps, {:?} edges, {:?} dispatch",
            kernel.radius(),
            self.config.edge_mode,
            self.executor.strategy()
        );
        let start = Instant::now();

        let results = self
            .executor
            .map_join(tasks, |task| self.run_task(task, &kernel));

        // place by channel identity, not by completion order
        let mut slots: [Option<IntensityPlane>; 3] = [None, None, None];
        for result in results {
            let (channel, plane) = result?;
            slots[channel.index()] = Some(plane);
        }

        match slots {
            [Some(r), Some(g), Some(b)] => {
                log::debug!("blurred {size} in {:?}", start.elapsed());
                Ok([r, g, b])
            }
            slots => {
                let missing = Channel::ALL
                    .into_iter()
                    .find(|channel| slots[channel.index()].is_none())
                    .unwrap_or(Channel::Red);
                Err(BlurError::MissingChannel(missing))
            }
        }
    }

    /// Run one task, turning a panic into an error tagged with its channel.
    fn run_task(
        &self,
        task: ChannelBlurTask,
        kernel: &CosineKernel,
    ) -> Result<(Channel, IntensityPlane), BlurError> {
        let channel = task.channel();
        let size = task.size();
        let observer = self.observer.as_deref();
        let edge_mode = self.config.edge_mode;

        let outcome = panic::catch_unwind(AssertUnwindSafe(
            || -> Result<(Channel, IntensityPlane), BlurError> {
                if let Some(observer) = observer {
                    observer.on_task_start(channel, size);
                }
                let start = Instant::now();
                let blurred = task.run(kernel, edge_mode)?;
                if let Some(observer) = observer {
                    observer.on_task_finish(channel, start.elapsed());
                }
                Ok(blurred)
            },
        ));

        outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            log::warn!("{channel} channel task panicked: {message}");
            Err(BlurError::TaskPanicked { channel, message })
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl PostProcessStage for ParallelGaussianBlur {
    type Error = BlurError;

    fn name(&self) -> &str {
        "gaussian_blur"
    }

    fn process_frame(&mut self, frame: &mut ColorImage) -> Result<(), Self::Error> {
        *frame = self.process(frame)?;
        Ok(())
    }
}
