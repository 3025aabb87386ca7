#[cfg(feature = "ndarray")]
mod array;

/// The arithmetic a state needs in order to be integrated.
///
/// A state is anything shaped like a vector of `f64` components: a scalar, a
/// `Vec<f64>`, a fixed-size array, or (with the `ndarray` feature) an
/// n-dimensional array holding a discretized field. All operations act
/// elementwise and a scalar factor multiplies every component identically.
///
/// The allocating operations ([`add`], [`sub`], [`scale`]) produce new values.
/// The in-place operations ([`assign`], [`assign_scaled`], [`add_scaled`],
/// [`sub_scaled`]) write into an existing value of the same shape and must
/// perform, per component, exactly the floating-point operations their
/// allocating counterparts do:
///
/// ```text
/// a.add_scaled(k, c)  ≡  a = a.add(&k.scale(c))   // a + (k * c)
/// a.sub_scaled(k, c)  ≡  a = a.sub(&k.scale(c))   // a - (k * c)
/// ```
///
/// This is what lets the buffer-reusing stepper reproduce the allocating
/// stepper bit for bit.
///
/// Callers check [`same_shape`] before mixing values; the in-place operations
/// may panic when handed values of different shapes.
///
/// [`add`]: OdeState::add
/// [`sub`]: OdeState::sub
/// [`scale`]: OdeState::scale
/// [`assign`]: OdeState::assign
/// [`assign_scaled`]: OdeState::assign_scaled
/// [`add_scaled`]: OdeState::add_scaled
/// [`sub_scaled`]: OdeState::sub_scaled
/// [`same_shape`]: OdeState::same_shape
pub trait OdeState: Sized {
    /// Returns a zero-filled value with the same shape as `self`.
    #[must_use]
    fn empty_like(&self) -> Self;

    /// Returns `true` if `other` has the same shape as `self`.
    fn same_shape(&self, other: &Self) -> bool;

    /// Returns `self + other`.
    #[must_use]
    fn add(&self, other: &Self) -> Self;

    /// Returns `self - other`.
    #[must_use]
    fn sub(&self, other: &Self) -> Self;

    /// Returns `self * factor`.
    #[must_use]
    fn scale(&self, factor: f64) -> Self;

    /// Overwrites `self` with `src`.
    fn assign(&mut self, src: &Self);

    /// Overwrites `self` with `src * factor`.
    fn assign_scaled(&mut self, src: &Self, factor: f64);

    /// Replaces `self` with `self + src * factor`.
    fn add_scaled(&mut self, src: &Self, factor: f64);

    /// Replaces `self` with `self - src * factor`.
    fn sub_scaled(&mut self, src: &Self, factor: f64);

    /// Returns the sum of absolute elementwise differences.
    fn l1_distance(&self, other: &Self) -> f64;
}

impl OdeState for f64 {
    fn empty_like(&self) -> Self {
        0.0
    }

    fn same_shape(&self, _other: &Self) -> bool {
        true
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }

    fn assign(&mut self, src: &Self) {
        *self = *src;
    }

    fn assign_scaled(&mut self, src: &Self, factor: f64) {
        *self = src * factor;
    }

    fn add_scaled(&mut self, src: &Self, factor: f64) {
        *self = *self + src * factor;
    }

    fn sub_scaled(&mut self, src: &Self, factor: f64) {
        *self = *self - src * factor;
    }

    fn l1_distance(&self, other: &Self) -> f64 {
        (self - other).abs()
    }
}

impl OdeState for Vec<f64> {
    fn empty_like(&self) -> Self {
        vec![0.0; self.len()]
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len()
    }

    fn add(&self, other: &Self) -> Self {
        self.iter().zip(other).map(|(a, b)| a + b).collect()
    }

    fn sub(&self, other: &Self) -> Self {
        self.iter().zip(other).map(|(a, b)| a - b).collect()
    }

    fn scale(&self, factor: f64) -> Self {
        self.iter().map(|a| a * factor).collect()
    }

    fn assign(&mut self, src: &Self) {
        self.copy_from_slice(src);
    }

    fn assign_scaled(&mut self, src: &Self, factor: f64) {
        assert_eq!(self.len(), src.len(), "state length mismatch");
        for (d, s) in self.iter_mut().zip(src) {
            *d = s * factor;
        }
    }

    fn add_scaled(&mut self, src: &Self, factor: f64) {
        assert_eq!(self.len(), src.len(), "state length mismatch");
        for (d, s) in self.iter_mut().zip(src) {
            *d = *d + s * factor;
        }
    }

    fn sub_scaled(&mut self, src: &Self, factor: f64) {
        assert_eq!(self.len(), src.len(), "state length mismatch");
        for (d, s) in self.iter_mut().zip(src) {
            *d = *d - s * factor;
        }
    }

    fn l1_distance(&self, other: &Self) -> f64 {
        self.iter().zip(other).map(|(a, b)| (a - b).abs()).sum()
    }
}

impl<const N: usize> OdeState for [f64; N] {
    fn empty_like(&self) -> Self {
        [0.0; N]
    }

    fn same_shape(&self, _other: &Self) -> bool {
        true
    }

    fn add(&self, other: &Self) -> Self {
        std::array::from_fn(|i| self[i] + other[i])
    }

    fn sub(&self, other: &Self) -> Self {
        std::array::from_fn(|i| self[i] - other[i])
    }

    fn scale(&self, factor: f64) -> Self {
        self.map(|a| a * factor)
    }

    fn assign(&mut self, src: &Self) {
        *self = *src;
    }

    fn assign_scaled(&mut self, src: &Self, factor: f64) {
        for (d, s) in self.iter_mut().zip(src) {
            *d = s * factor;
        }
    }

    fn add_scaled(&mut self, src: &Self, factor: f64) {
        for (d, s) in self.iter_mut().zip(src) {
            *d = *d + s * factor;
        }
    }

    fn sub_scaled(&mut self, src: &Self, factor: f64) {
        for (d, s) in self.iter_mut().zip(src) {
            *d = *d - s * factor;
        }
    }

    fn l1_distance(&self, other: &Self) -> f64 {
        self.iter().zip(other).map(|(a, b)| (a - b).abs()).sum()
    }
}
