use ndarray::{Array, Dimension, Zip};

use super::OdeState;

/// Owned n-dimensional arrays, e.g. a discretized field in a method-of-lines
/// PDE solver.
///
/// Shapes are compared exactly; no broadcasting is performed.
impl<D: Dimension> OdeState for Array<f64, D> {
    fn empty_like(&self) -> Self {
        Array::zeros(self.raw_dim())
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    fn add(&self, other: &Self) -> Self {
        Zip::from(self).and(other).map_collect(|&a, &b| a + b)
    }

    fn sub(&self, other: &Self) -> Self {
        Zip::from(self).and(other).map_collect(|&a, &b| a - b)
    }

    fn scale(&self, factor: f64) -> Self {
        self.mapv(|a| a * factor)
    }

    fn assign(&mut self, src: &Self) {
        self.zip_mut_with(src, |d, &s| *d = s);
    }

    fn assign_scaled(&mut self, src: &Self, factor: f64) {
        self.zip_mut_with(src, |d, &s| *d = s * factor);
    }

    fn add_scaled(&mut self, src: &Self, factor: f64) {
        self.zip_mut_with(src, |d, &s| *d = *d + s * factor);
    }

    fn sub_scaled(&mut self, src: &Self, factor: f64) {
        self.zip_mut_with(src, |d, &s| *d = *d - s * factor);
    }

    fn l1_distance(&self, other: &Self) -> f64 {
        Zip::from(self)
            .and(other)
            .fold(0.0, |acc, &a, &b| acc + (a - b).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array};

    #[test]
    fn empty_like_keeps_shape() {
        let field: Array2<f64> = Array2::ones((4, 3));
        let empty = field.empty_like();

        assert_eq!(empty.shape(), &[4, 3]);
        assert!(empty.iter().all(|&v| v == 0.0));
        assert!(field.same_shape(&empty));
        assert!(!field.same_shape(&Array2::zeros((3, 4))));
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![0.5, 0.5, 0.5];

        assert_eq!(a.add(&b), array![1.5, 2.5, 3.5]);
        assert_eq!(a.sub(&b), array![0.5, 1.5, 2.5]);
        assert_eq!(a.scale(2.0), array![2.0, 4.0, 6.0]);
        assert_relative_eq!(a.l1_distance(&b), 4.5);
    }

    #[test]
    fn in_place_matches_allocating() {
        let base: Array1<f64> = Array1::linspace(-1.0, 1.0, 17);
        let k = base.mapv(f64::sin);
        let c = 0.01 * 3680.0 / 513.0;

        let allocated = base.add(&k.scale(c)).sub(&k.scale(c / 3.0));

        let mut in_place = base.empty_like();
        in_place.assign(&base);
        in_place.add_scaled(&k, c);
        in_place.sub_scaled(&k, c / 3.0);

        assert_eq!(allocated, in_place);
    }
}
