use std::sync::{Arc, Mutex};
use std::time::Duration;

use approx::assert_relative_eq;
use postblur_image::{ColorImage, ImageSize, IntensityPlane};
use postblur_imgproc::{
    filter::{horizontal_filter, kernels::CosineKernel, EdgeMode},
    observer::{BlurObserver, LogObserver},
    parallel::ExecutionStrategy,
    stage::{PostProcessStage, StageChain},
    task::{Channel, ChannelBlurTask},
    BlurConfig, BlurError, ParallelGaussianBlur,
};
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_image(size: ImageSize, seed: u64) -> ColorImage {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let data = (0..size.width * size.height * 3)
        .map(|_| rng.random_range(0.0..255.0))
        .collect();
    ColorImage::new(size, data).unwrap()
}

fn variance(values: &[f32]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n
}

#[test]
fn single_bright_pixel_after_one_horizontal_pass() -> Result<(), BlurError> {
    let size = ImageSize {
        width: 4,
        height: 4,
    };
    let mut data = vec![0.0f32; 16];
    data[2 * 4 + 2] = 100.0;
    let src = IntensityPlane::new(size, data)?;
    let mut dst = IntensityPlane::from_size_val(size, 0.0)?;

    horizontal_filter(&src, &mut dst, &CosineKernel::approximate(1), EdgeMode::Omit)?;

    let pi = std::f32::consts::PI;
    let w0 = (1.0 + 0f32.cos()) / (2.0 * pi);
    let w1 = (1.0 + (pi / 2.0).cos()) / (2.0 * pi);

    assert_relative_eq!(dst.get_pixel(1, 2, 0)?, 100.0 * w1, epsilon = 1e-4);
    assert_relative_eq!(dst.get_pixel(2, 2, 0)?, 100.0 * w0, epsilon = 1e-4);
    assert_relative_eq!(dst.get_pixel(3, 2, 0)?, 100.0 * w1, epsilon = 1e-4);
    assert_relative_eq!(dst.get_pixel(2, 2, 0)?, 31.830_988, epsilon = 1e-4);
    assert_relative_eq!(dst.get_pixel(1, 2, 0)?, 15.915_494, epsilon = 1e-4);

    Ok(())
}

#[test]
fn parallel_matches_serial() -> Result<(), BlurError> {
    init_logger();
    let image = random_image([37, 23].into(), 7);

    let serial = ParallelGaussianBlur::new(
        BlurConfig::default().with_strategy(ExecutionStrategy::Serial),
    )?;
    let parallel = ParallelGaussianBlur::new(
        BlurConfig::default().with_strategy(ExecutionStrategy::Parallel),
    )?;
    let fixed = ParallelGaussianBlur::new(
        BlurConfig::default().with_strategy(ExecutionStrategy::Fixed(3)),
    )?;

    let expected = serial.process(&image)?;
    for _ in 0..4 {
        assert_eq!(parallel.process(&image)?.as_slice(), expected.as_slice());
        assert_eq!(fixed.process(&image)?.as_slice(), expected.as_slice());
    }

    // and both equal running each channel task by hand
    let kernel = CosineKernel::approximate(BlurConfig::default().tap_count);
    for channel in Channel::ALL {
        let (_, plane) = ChannelBlurTask::new(channel, image.channel(channel.index())?)
            .run(&kernel, EdgeMode::Omit)?;
        assert_eq!(expected.channel(channel.index())?, plane);
    }

    Ok(())
}

#[test]
fn blur_does_not_increase_normalized_variance() -> Result<(), BlurError> {
    let image = random_image([64, 64].into(), 42);
    let config = BlurConfig::default();
    let blur = ParallelGaussianBlur::new(config)?;
    let blurred = blur.process(&image)?;

    // undo the kernel gain so only the smoothing is compared
    let gain = CosineKernel::approximate(config.tap_count).sum().powi(2);

    for channel in Channel::ALL {
        let before = image.channel(channel.index())?;
        let after = blurred
            .channel(channel.index())?
            .as_slice()
            .iter()
            .map(|v| v / gain)
            .collect::<Vec<_>>();
        assert!(variance(&after) <= variance(before.as_slice()));
    }

    Ok(())
}

#[test]
fn constant_image_is_darker_at_the_border() -> Result<(), BlurError> {
    let image = ColorImage::from_size_val([20, 20].into(), 1.0)?;
    let config = BlurConfig::default();
    let blurred = ParallelGaussianBlur::new(config)?.process(&image)?;

    let kernel = CosineKernel::approximate(config.tap_count);
    let interior = kernel.sum() * kernel.sum();

    for channel in 0..3 {
        let center = blurred.get_pixel(10, 10, channel)?;
        assert_relative_eq!(center, interior, epsilon = 1e-4);
        assert!(blurred.get_pixel(0, 10, channel)? < center);
        assert!(blurred.get_pixel(10, 0, channel)? < center);
        assert!(blurred.get_pixel(0, 0, channel)? < blurred.get_pixel(0, 10, channel)?);
    }

    // replicated edges keep the border as bright as the interior
    let replicate = ParallelGaussianBlur::new(config.with_edge_mode(EdgeMode::Replicate))?;
    let blurred = replicate.process(&image)?;
    for &v in blurred.as_slice() {
        assert_relative_eq!(v, interior, epsilon = 1e-4);
    }

    Ok(())
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(Channel, &'static str)>>,
}

impl BlurObserver for Recorder {
    fn on_task_start(&self, channel: Channel, _size: ImageSize) {
        self.events.lock().unwrap().push((channel, "start"));
    }

    fn on_task_finish(&self, channel: Channel, _elapsed: Duration) {
        self.events.lock().unwrap().push((channel, "finish"));
    }
}

#[test]
fn observer_sees_each_channel_once() -> Result<(), BlurError> {
    let recorder = Arc::new(Recorder::default());
    let blur = ParallelGaussianBlur::new(BlurConfig::default())?.with_observer(recorder.clone());

    blur.process(&random_image([8, 8].into(), 1))?;

    let events = recorder.events.lock().unwrap();
    assert_eq!(events.len(), 6);
    for channel in Channel::ALL {
        let start = events.iter().position(|e| *e == (channel, "start"));
        let finish = events.iter().position(|e| *e == (channel, "finish"));
        assert!(matches!((start, finish), (Some(s), Some(f)) if s < f));
    }

    Ok(())
}

struct PanicOn(Channel);

impl BlurObserver for PanicOn {
    fn on_task_start(&self, channel: Channel, _size: ImageSize) {
        if channel == self.0 {
            panic!("observer refused the {channel} channel");
        }
    }
}

#[test]
fn task_panic_is_reported_not_hung() -> Result<(), BlurError> {
    for strategy in [
        ExecutionStrategy::Serial,
        ExecutionStrategy::Parallel,
        ExecutionStrategy::Fixed(2),
    ] {
        let blur = ParallelGaussianBlur::new(BlurConfig::default().with_strategy(strategy))?
            .with_observer(Arc::new(PanicOn(Channel::Green)));

        let res = blur.process(&random_image([8, 8].into(), 3));
        match res {
            Err(BlurError::TaskPanicked { channel, message }) => {
                assert_eq!(channel, Channel::Green);
                assert_eq!(message, "observer refused the green channel");
            }
            other => panic!("expected a task panic, got {other:?}"),
        }
    }

    Ok(())
}

#[test]
fn stage_chain_blurs_every_frame() -> Result<(), BlurError> {
    init_logger();
    let blur = ParallelGaussianBlur::new(BlurConfig::default().with_tap_count(2))?
        .with_observer(Arc::new(LogObserver));
    let reference = ParallelGaussianBlur::new(BlurConfig::default().with_tap_count(2))?;

    let mut chain = StageChain::new().with_stage(blur);
    assert_eq!(chain.names(), vec!["gaussian_blur"]);

    let mut frame = random_image([12, 9].into(), 11);
    let mut expected = frame.clone();
    for _ in 0..3 {
        chain.process_frame(&mut frame)?;
        expected = reference.process(&expected)?;
        assert_eq!(frame, expected);
    }

    Ok(())
}
