use postblur_image::{Image, ImageError};

/// Transpose the input image into a preallocated destination.
///
/// The sample at `(i, j)` of `dst` equals the sample at `(j, i)` of `src`.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `dst` - The output image with shape (W, H, C).
///
/// # Errors
///
/// Returns an error if `dst` does not have the transposed size of `src`.
pub fn transpose_into<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy,
{
    let expected = src.size().transposed();
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            expected.width,
            expected.height,
        ));
    }

    if src.is_empty() {
        return Ok(());
    }

    let (rows, cols) = (src.rows(), src.cols());
    let src_data = src.as_slice();

    // each destination row gathers one source column
    dst.as_slice_mut()
        .chunks_exact_mut(rows * C)
        .enumerate()
        .for_each(|(c, dst_row)| {
            for (r, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let offset = (r * cols + c) * C;
                dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
            }
        });

    Ok(())
}

/// Transpose the input image.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The transposed image with shape (W, H, C).
///
/// # Example
///
/// ```
/// use postblur_image::{Image, ImageSize};
/// use postblur_imgproc::transpose::transpose;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 2,
///     },
///     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
/// )
/// .unwrap();
///
/// let transposed = transpose(&image).unwrap();
///
/// assert_eq!(transposed.size().width, 2);
/// assert_eq!(transposed.size().height, 3);
/// assert_eq!(transposed.as_slice(), &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
/// ```
pub fn transpose<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default,
{
    let mut dst = Image::from_size_val(src.size().transposed(), T::default())?;
    transpose_into(src, &mut dst)?;
    Ok(dst)
}
