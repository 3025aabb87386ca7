use crate::OdeState;

/// Measures the discrepancy between two increment estimates.
///
/// A metric must return a non-negative value that is zero only when the two
/// estimates agree, and that grows with the elementwise magnitude of their
/// difference. The step controller shrinks the step until this value is at
/// most the requested tolerance, so a metric that does not shrink with the
/// step size will never converge.
///
/// Any `Fn(&S, &S) -> f64` closure is a metric.
pub trait ErrorMetric<S> {
    /// Returns the discrepancy between `a` and `b`.
    fn distance(&self, a: &S, b: &S) -> f64;
}

impl<S, F> ErrorMetric<S> for F
where
    F: Fn(&S, &S) -> f64,
{
    fn distance(&self, a: &S, b: &S) -> f64 {
        self(a, b)
    }
}

/// The default metric: sum of absolute elementwise differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L1;

impl<S: OdeState> ErrorMetric<S> for L1 {
    fn distance(&self, a: &S, b: &S) -> f64 {
        a.l1_distance(b)
    }
}
