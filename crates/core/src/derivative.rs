/// The right-hand side of `dx/dt = f(x, t)`, returning a fresh derivative.
///
/// Used by the allocating stepper. Any `FnMut(&S, f64) -> S` closure
/// implements this trait.
pub trait Derivative<S> {
    /// Returns the derivative of `state` at time `t`.
    fn derivative(&mut self, state: &S, t: f64) -> S;
}

impl<S, F> Derivative<S> for F
where
    F: FnMut(&S, f64) -> S,
{
    fn derivative(&mut self, state: &S, t: f64) -> S {
        self(state, t)
    }
}

/// The right-hand side of `dx/dt = f(x, t)`, writing into caller storage.
///
/// Used by the buffer-reusing stepper so that no derivative is allocated per
/// stage. `out` already has the shape of `state`; implementations must
/// overwrite every component of it.
///
/// Any `FnMut(&S, f64, &mut S)` closure implements this trait.
pub trait DerivativeInPlace<S> {
    /// Writes the derivative of `state` at time `t` into `out`.
    fn derivative_into(&mut self, state: &S, t: f64, out: &mut S);
}

impl<S, F> DerivativeInPlace<S> for F
where
    F: FnMut(&S, f64, &mut S),
{
    fn derivative_into(&mut self, state: &S, t: f64, out: &mut S) {
        self(state, t, out);
    }
}
