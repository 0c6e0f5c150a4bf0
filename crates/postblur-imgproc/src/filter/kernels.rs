use std::f32::consts::PI;

/// A symmetric 1-D blur kernel stored as its non-negative half.
///
/// Index 0 holds the center weight and index `k` holds the weight applied at
/// both offsets `-k` and `+k`.
#[derive(Clone, Debug, PartialEq)]
pub struct CosineKernel {
    weights: Vec<f32>,
}

impl CosineKernel {
    /// Approximate a normal density with a raised cosine.
    ///
    /// Produces `count + 1` weights where `w[n] = (1 + cos(n * pi / (count + 1))) / (2 * pi)`.
    /// The weights decay toward zero with the offset but are not normalized, so their
    /// sum is not one.
    ///
    /// # Arguments
    ///
    /// * `count` - The number of taps on each side of the center.
    ///
    /// # Examples
    ///
    /// ```
    /// use postblur_imgproc::filter::kernels::CosineKernel;
    ///
    /// let kernel = CosineKernel::approximate(0);
    /// assert_eq!(kernel.len(), 1);
    /// assert!((kernel.weights()[0] - std::f32::consts::FRAC_1_PI).abs() < 1e-6);
    /// ```
    pub fn approximate(count: usize) -> Self {
        let step = PI / (count + 1) as f32;
        let weights = (0..=count)
            .map(|n| (1.0 + (n as f32 * step).cos()) / (2.0 * PI))
            .collect();
        Self { weights }
    }

    /// The half-kernel weights, center first.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The number of weights in the half kernel.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; a kernel holds at least the center weight.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The largest tap offset reached on each side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() - 1
    }

    /// The weight at a signed tap offset, or `None` beyond the radius.
    pub fn weight(&self, offset: isize) -> Option<f32> {
        self.weights.get(offset.unsigned_abs()).copied()
    }

    /// The sum of the full symmetric kernel, `w0 + 2 * (w1 + ... + wn)`.
    pub fn sum(&self) -> f32 {
        self.weights[0] + 2.0 * self.weights[1..].iter().sum::<f32>()
    }
}
