use fehlberg_core::{Derivative, DerivativeInPlace, OdeState};

use super::{Error, StageBuffer, tableau::Scaled};

/// The two increment estimates produced by one stage evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimates<S> {
    /// Fourth-order increment, used only to measure the local error.
    pub order4: S,

    /// Fifth-order increment, the one a step accepts.
    pub order5: S,
}

/// Evaluates the six Fehlberg stages at `(x, t)` with step `dt`.
///
/// Every stage and both estimates are freshly allocated; `x` is untouched.
///
/// ```text
/// k1 = f(x, t)
/// k2 = f(x + a21 k1, t + dt/4)
/// k3 = f(x + a31 k1 + a32 k2, t + 3dt/8)
/// k4 = f(x + a41 k1 - a42 k2 + a43 k3, t + 12dt/13)
/// k5 = f(x + a51 k1 - a52 k2 + a53 k3 - a54 k4, t + dt)
/// k6 = f(x - a61 k1 + a62 k2 - a63 k3 + a64 k4 - a65 k5, t + dt/2)
/// ```
///
/// `k2` feeds the later stages but neither estimate.
pub fn evaluate<S, F>(f: &mut F, x: &S, t: f64, dt: f64) -> Estimates<S>
where
    S: OdeState,
    F: Derivative<S>,
{
    let w = Scaled::new(dt);

    let k1 = f.derivative(x, t);

    let k2 = f.derivative(&x.add(&k1.scale(w.a21)), t + w.c2);

    let k3 = f.derivative(&x.add(&k1.scale(w.a31)).add(&k2.scale(w.a32)), t + w.c3);

    let x4 = x
        .add(&k1.scale(w.a41))
        .sub(&k2.scale(w.a42))
        .add(&k3.scale(w.a43));
    let k4 = f.derivative(&x4, t + w.c4);

    let x5 = x
        .add(&k1.scale(w.a51))
        .sub(&k2.scale(w.a52))
        .add(&k3.scale(w.a53))
        .sub(&k4.scale(w.a54));
    let k5 = f.derivative(&x5, t + w.c5);

    let x6 = x
        .sub(&k1.scale(w.a61))
        .add(&k2.scale(w.a62))
        .sub(&k3.scale(w.a63))
        .add(&k4.scale(w.a64))
        .sub(&k5.scale(w.a65));
    let k6 = f.derivative(&x6, t + w.c6);

    let order4 = k1
        .scale(w.b41)
        .add(&k3.scale(w.b43))
        .add(&k4.scale(w.b44))
        .sub(&k5.scale(w.b45));

    let order5 = k1
        .scale(w.b51)
        .add(&k3.scale(w.b53))
        .add(&k4.scale(w.b54))
        .sub(&k5.scale(w.b55))
        .add(&k6.scale(w.b56));

    Estimates { order4, order5 }
}

/// Evaluates the six Fehlberg stages into caller-owned storage.
///
/// Stage derivatives land in the buffer's `k1..k6` slots, each stage argument
/// is assembled in the buffer's temporary slot, and the estimates are written
/// to `order4` and `order5`. Nothing is allocated. The results are bit for
/// bit those of [`evaluate`].
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the buffer or either destination is
/// not shaped like `x`.
pub fn evaluate_into<S, F>(
    f: &mut F,
    x: &S,
    t: f64,
    dt: f64,
    buffer: &mut StageBuffer<S>,
    order4: &mut S,
    order5: &mut S,
) -> Result<(), Error>
where
    S: OdeState,
    F: DerivativeInPlace<S>,
{
    check_shapes(x, buffer, order4, order5)?;
    fill(f, x, t, dt, buffer, order4, order5);
    Ok(())
}

pub(super) fn check_shapes<S: OdeState>(
    x: &S,
    buffer: &StageBuffer<S>,
    order4: &S,
    order5: &S,
) -> Result<(), Error> {
    if buffer.fits(x) && order4.same_shape(x) && order5.same_shape(x) {
        Ok(())
    } else {
        Err(Error::ShapeMismatch)
    }
}

/// Unchecked body of [`evaluate_into`]; shapes must already agree.
pub(super) fn fill<S, F>(
    f: &mut F,
    x: &S,
    t: f64,
    dt: f64,
    buffer: &mut StageBuffer<S>,
    order4: &mut S,
    order5: &mut S,
) where
    S: OdeState,
    F: DerivativeInPlace<S>,
{
    let w = Scaled::new(dt);
    let StageBuffer {
        k1,
        k2,
        k3,
        k4,
        k5,
        k6,
        tmp,
    } = buffer;

    f.derivative_into(x, t, k1);

    tmp.assign(x);
    tmp.add_scaled(k1, w.a21);
    f.derivative_into(tmp, t + w.c2, k2);

    tmp.assign(x);
    tmp.add_scaled(k1, w.a31);
    tmp.add_scaled(k2, w.a32);
    f.derivative_into(tmp, t + w.c3, k3);

    tmp.assign(x);
    tmp.add_scaled(k1, w.a41);
    tmp.sub_scaled(k2, w.a42);
    tmp.add_scaled(k3, w.a43);
    f.derivative_into(tmp, t + w.c4, k4);

    tmp.assign(x);
    tmp.add_scaled(k1, w.a51);
    tmp.sub_scaled(k2, w.a52);
    tmp.add_scaled(k3, w.a53);
    tmp.sub_scaled(k4, w.a54);
    f.derivative_into(tmp, t + w.c5, k5);

    tmp.assign(x);
    tmp.sub_scaled(k1, w.a61);
    tmp.add_scaled(k2, w.a62);
    tmp.sub_scaled(k3, w.a63);
    tmp.add_scaled(k4, w.a64);
    tmp.sub_scaled(k5, w.a65);
    f.derivative_into(tmp, t + w.c6, k6);

    order4.assign_scaled(k1, w.b41);
    order4.add_scaled(k3, w.b43);
    order4.add_scaled(k4, w.b44);
    order4.sub_scaled(k5, w.b45);

    order5.assign_scaled(k1, w.b51);
    order5.add_scaled(k3, w.b53);
    order5.add_scaled(k4, w.b54);
    order5.sub_scaled(k5, w.b55);
    order5.add_scaled(k6, w.b56);
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn constant_derivative_gives_linear_increment() {
        let mut f = |_: &f64, _: f64| 3.0;

        let est = evaluate(&mut f, &10.0, 0.0, 0.5);

        assert_relative_eq!(est.order4, 1.5, epsilon = 1e-14);
        assert_relative_eq!(est.order5, 1.5, epsilon = 1e-14);
    }

    #[test]
    fn polynomial_in_time_is_integrated_exactly() {
        // Both orders integrate t^3 exactly: ∫₁² t³ dt = 15/4.
        let mut f = |_: &f64, t: f64| t.powi(3);

        let est = evaluate(&mut f, &0.0, 1.0, 1.0);

        assert_relative_eq!(est.order4, 3.75, epsilon = 1e-13);
        assert_relative_eq!(est.order5, 3.75, epsilon = 1e-13);
    }

    #[test]
    fn calls_derivative_six_times_at_fehlberg_nodes() {
        let mut times = Vec::new();
        let mut f = |_: &f64, t: f64| {
            times.push(t);
            0.0
        };

        evaluate(&mut f, &0.0, 1.0, 0.5);

        let expected = [1.0, 1.125, 1.1875, 1.0 + 6.0 / 13.0, 1.5, 1.25];
        assert_eq!(times.len(), 6);
        for (t, e) in times.iter().zip(expected) {
            assert_relative_eq!(*t, e, epsilon = 1e-15);
        }
    }

    #[test]
    fn leaves_state_untouched() {
        let x = vec![1.0, -2.0];
        let mut f = |x: &Vec<f64>, _: f64| x.scale(-1.0);

        let est = evaluate(&mut f, &x, 0.0, 0.1);

        assert_eq!(x, vec![1.0, -2.0]);
        assert_eq!(est.order5.len(), 2);
    }

    #[test]
    fn in_place_matches_allocating_bit_for_bit() {
        let x = vec![0.3, -1.7, 2.9];
        let t = 0.4;
        let dt = 0.37;

        let mut alloc_f = |x: &Vec<f64>, t: f64| {
            x.iter().map(|v| -v * v + t.sin()).collect::<Vec<_>>()
        };
        let mut in_place_f = |x: &Vec<f64>, t: f64, out: &mut Vec<f64>| {
            for (o, v) in out.iter_mut().zip(x) {
                *o = -v * v + t.sin();
            }
        };

        let expected = evaluate(&mut alloc_f, &x, t, dt);

        let mut buffer = StageBuffer::new(&x);
        let mut order4 = x.empty_like();
        let mut order5 = x.empty_like();
        evaluate_into(&mut in_place_f, &x, t, dt, &mut buffer, &mut order4, &mut order5)
            .expect("shapes agree");

        assert_eq!(order4, expected.order4);
        assert_eq!(order5, expected.order5);
        assert_eq!(x, vec![0.3, -1.7, 2.9]);
    }

    #[test]
    fn rejects_mismatched_destination() {
        let x = vec![0.0; 3];
        let mut f = |_: &Vec<f64>, _: f64, out: &mut Vec<f64>| out.fill(1.0);

        let mut buffer = StageBuffer::new(&x);
        let mut order4 = vec![0.0; 2];
        let mut order5 = vec![0.0; 3];

        let result = evaluate_into(&mut f, &x, 0.0, 0.1, &mut buffer, &mut order4, &mut order5);

        assert_eq!(result, Err(Error::ShapeMismatch));
    }
}
