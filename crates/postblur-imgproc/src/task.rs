use postblur_image::{ImageSize, IntensityPlane};

use crate::{
    error::BlurError,
    filter::{horizontal_filter, kernels::CosineKernel, EdgeMode},
    transpose::transpose_into,
};

/// The color channel a plane belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

impl Channel {
    /// All channels in interleaved order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The position of the channel in an interleaved image.
    pub fn index(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        write!(f, "{name}")
    }
}

/// A unit of work that owns one plane and blurs it in both directions.
///
/// The task touches nothing but its own buffers and a shared read-only kernel,
/// so tasks for different channels can run on different threads.
#[derive(Debug, Clone)]
pub struct ChannelBlurTask {
    channel: Channel,
    plane: IntensityPlane,
}

impl ChannelBlurTask {
    /// Create a task that takes ownership of `plane`.
    pub fn new(channel: Channel, plane: IntensityPlane) -> Self {
        Self { channel, plane }
    }

    /// The channel this task blurs.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The size of the owned plane.
    pub fn size(&self) -> ImageSize {
        self.plane.size()
    }

    /// Blur the plane along rows, then along columns.
    ///
    /// Runs two cycles of a horizontal pass into a zeroed buffer followed by a
    /// transpose, which leaves the plane blurred in both directions and back in
    /// its original orientation.
    ///
    /// # Arguments
    ///
    /// * `kernel` - The half kernel shared by all channels.
    /// * `edge_mode` - How taps outside the plane are handled.
    ///
    /// # Returns
    ///
    /// The channel together with its blurred plane.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::EmptyImage`] if the plane has a zero-sized dimension.
    pub fn run(
        self,
        kernel: &CosineKernel,
        edge_mode: EdgeMode,
    ) -> Result<(Channel, IntensityPlane), BlurError> {
        let Self { channel, plane } = self;

        if plane.is_empty() {
            return Err(BlurError::EmptyImage(plane.cols(), plane.rows()));
        }

        let mut original = plane;

        for _ in 0..2 {
            let mut working = IntensityPlane::from_size_val(original.size(), 0.0)?;
            horizontal_filter(&original, &mut working, kernel, edge_mode)?;

            let mut transposed = IntensityPlane::from_size_val(working.size().transposed(), 0.0)?;
            transpose_into(&working, &mut transposed)?;
            original = transposed;
        }

        Ok((channel, original))
    }
}
