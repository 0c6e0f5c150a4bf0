use postblur_image::{ImageError, IntensityPlane};
use serde::{Deserialize, Serialize};

use super::kernels::CosineKernel;

/// How taps that fall outside the row are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Out-of-range taps are dropped and contribute nothing.
    ///
    /// Pixels within the kernel radius of an edge receive less total weight than
    /// interior pixels and come out darker.
    ///
    /// Example: ...d c b a | (skipped)
    #[default]
    Omit,

    /// Out-of-range taps read the outermost sample of the row.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// Out-of-range taps mirror around the outermost sample, excluding it.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,
}

impl EdgeMode {
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else if i >= len {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index within `[0, len)` according to the edge mode.
    ///
    /// Returns `None` when the tap must be skipped, which only happens for
    /// [`EdgeMode::Omit`].
    ///
    /// # Arguments
    ///
    /// * `i` - The (possibly out-of-range) coordinate index.
    /// * `len` - The valid length of the dimension, must be greater than zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            EdgeMode::Omit => None,
            EdgeMode::Replicate => Some(i.clamp(0, len as isize - 1) as usize),
            EdgeMode::Reflect101 => Some(Self::reflect101(i, len)),
        }
    }
}

/// Convolve every row of a plane with a symmetric kernel.
///
/// For each pixel `(i, j)` and each offset `k` in `[-radius, radius]` the filter
/// accumulates `dst[i, j] += kernel[|k|] * src[i, j + k]`, with `j + k` resolved
/// by `edge_mode`. The destination is accumulated into, so callers pass a
/// zeroed plane to get the plain convolution.
///
/// # Arguments
///
/// * `src` - The source plane with shape (H, W).
/// * `dst` - The destination plane with shape (H, W), zeroed.
/// * `kernel` - The half kernel, center first.
/// * `edge_mode` - How taps outside the row are handled.
///
/// # Errors
///
/// Returns an error if the planes differ in size or are empty.
///
/// # Examples
///
/// ```
/// use postblur_image::IntensityPlane;
/// use postblur_imgproc::filter::{horizontal_filter, kernels::CosineKernel, EdgeMode};
///
/// let src = IntensityPlane::new([3, 1].into(), vec![0.0, 1.0, 0.0]).unwrap();
/// let mut dst = IntensityPlane::from_size_val(src.size(), 0.0).unwrap();
///
/// let kernel = CosineKernel::approximate(1);
/// horizontal_filter(&src, &mut dst, &kernel, EdgeMode::Omit).unwrap();
///
/// let w = kernel.weights();
/// assert_eq!(dst.as_slice(), &[w[1], w[0], w[1]]);
/// ```
pub fn horizontal_filter(
    src: &IntensityPlane,
    dst: &mut IntensityPlane,
    kernel: &CosineKernel,
    edge_mode: EdgeMode,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()));
    }

    let cols = src.cols();
    let radius = kernel.radius() as isize;
    let weights = kernel.weights();

    dst.as_slice_mut()
        .chunks_exact_mut(cols)
        .zip(src.as_slice().chunks_exact(cols))
        .for_each(|(dst_row, src_row)| {
            for (c, dst_pixel) in dst_row.iter_mut().enumerate() {
                for k in -radius..=radius {
                    let Some(x) = edge_mode.map_index(c as isize + k, cols) else {
                        continue;
                    };
                    *dst_pixel += weights[k.unsigned_abs()] * src_row[x];
                }
            }
        });

    Ok(())
}
