//! Fehlberg 4(5) Butcher tableau.
//!
//! Stage weights `a*` and final weights `b4*`/`b5*` are stored as magnitudes;
//! the sign of each term is applied by the stage evaluator, which adds or
//! subtracts it exactly as the tableau is written.
//!
//! Every entry is evaluated as `dt * numerator / denominator`, left to right.
//! Folding the fraction first (`dt * (numerator / denominator)`) rounds
//! differently for many step sizes.

/// Tableau entries pre-multiplied by a step size.
///
/// Both stage evaluators build their combinations from the same `Scaled`
/// values, so they see identical coefficients for a given `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Scaled {
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
    pub c5: f64,
    pub c6: f64,

    pub a21: f64,
    pub a31: f64,
    pub a32: f64,
    pub a41: f64,
    pub a42: f64,
    pub a43: f64,
    pub a51: f64,
    pub a52: f64,
    pub a53: f64,
    pub a54: f64,
    pub a61: f64,
    pub a62: f64,
    pub a63: f64,
    pub a64: f64,
    pub a65: f64,

    pub b41: f64,
    pub b43: f64,
    pub b44: f64,
    pub b45: f64,

    pub b51: f64,
    pub b53: f64,
    pub b54: f64,
    pub b55: f64,
    pub b56: f64,
}

impl Scaled {
    pub(super) fn new(dt: f64) -> Self {
        Self {
            c2: dt / 4.0,
            c3: dt * 3.0 / 8.0,
            c4: dt * 12.0 / 13.0,
            c5: dt,
            c6: dt / 2.0,

            a21: dt * 1.0 / 4.0,
            a31: dt * 3.0 / 32.0,
            a32: dt * 9.0 / 32.0,
            a41: dt * 1932.0 / 2197.0,
            a42: dt * 7200.0 / 2197.0,
            a43: dt * 7296.0 / 2197.0,
            a51: dt * 439.0 / 216.0,
            a52: dt * 8.0,
            a53: dt * 3680.0 / 513.0,
            a54: dt * 845.0 / 4104.0,
            a61: dt * 8.0 / 27.0,
            a62: dt * 2.0,
            a63: dt * 3544.0 / 2565.0,
            a64: dt * 1859.0 / 4104.0,
            a65: dt * 11.0 / 40.0,

            b41: dt * 25.0 / 216.0,
            b43: dt * 1408.0 / 2565.0,
            b44: dt * 2197.0 / 4104.0,
            b45: dt / 5.0,

            b51: dt * 16.0 / 135.0,
            b53: dt * 6656.0 / 12825.0,
            b54: dt * 28561.0 / 56430.0,
            b55: dt * 9.0 / 50.0,
            b56: dt * 2.0 / 55.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn stage_rows_are_consistent() {
        // Each row of A sums to its node c_i, with signs applied.
        let s = Scaled::new(1.0);

        assert_relative_eq!(s.a21, s.c2);
        assert_relative_eq!(s.a31 + s.a32, s.c3);
        assert_relative_eq!(s.a41 - s.a42 + s.a43, s.c4, epsilon = 1e-15);
        assert_relative_eq!(s.a51 - s.a52 + s.a53 - s.a54, s.c5, epsilon = 1e-14);
        assert_relative_eq!(-s.a61 + s.a62 - s.a63 + s.a64 - s.a65, s.c6, epsilon = 1e-15);
    }

    #[test]
    fn final_weights_sum_to_step() {
        let dt = 0.125;
        let s = Scaled::new(dt);

        assert_relative_eq!(s.b41 + s.b43 + s.b44 - s.b45, dt, epsilon = 1e-15);
        assert_relative_eq!(
            s.b51 + s.b53 + s.b54 - s.b55 + s.b56,
            dt,
            epsilon = 1e-15
        );
    }

    #[test]
    fn scales_linearly_with_step() {
        let one = Scaled::new(1.0);
        let half = Scaled::new(0.5);

        assert_eq!(half.a43, one.a43 / 2.0);
        assert_eq!(half.b54, one.b54 / 2.0);
        assert_eq!(half.c4, one.c4 / 2.0);
    }

    #[test]
    fn entries_round_as_written() {
        let dt = 0.0137 * 3.0;
        let s = Scaled::new(dt);

        assert_eq!(s.a41, dt * 1932.0 / 2197.0);
        assert_eq!(s.a53, dt * 3680.0 / 513.0);
        assert_eq!(s.b54, dt * 28561.0 / 56430.0);
        assert_eq!(s.b45, dt / 5.0);
    }
}
