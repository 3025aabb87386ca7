use super::{Config, Error};

/// Exponent applied to `tolerance / error` when shrinking a rejected step.
const SHRINK_EXPONENT: f64 = 1.0 / 5.0;

/// Exponent applied to `tolerance / error` when suggesting the next step.
const GROW_EXPONENT: f64 = 1.0 / 4.0;

/// Outcome of the step-acceptance loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accepted {
    /// The step size that produced the accepted increment.
    pub dt: f64,

    /// Suggested step size for the next call, at most `max_next_dt`.
    pub next_dt: f64,

    /// Measured error of the accepted trial.
    pub error: f64,

    /// Number of trials rejected before acceptance.
    pub rejections: usize,
}

/// Runs the error-controlled acceptance loop.
///
/// `trial` evaluates the stages at a step size and returns the measured error
/// together with whatever the caller keeps from that evaluation. The value
/// from the accepted trial is returned alongside the [`Accepted`] summary.
///
/// The loop has two states: shrinking while `error > tolerance`, then
/// accepted. Each shrink multiplies `dt` by `safety * (tolerance / error)^(1/5)`,
/// which is strictly less than one. Without [`Config::max_rejections`] the
/// loop has no other exit: it ends only once a trial meets the tolerance.
pub(super) fn accept<T>(
    tolerance: f64,
    dt: f64,
    config: &Config,
    mut trial: impl FnMut(f64) -> (f64, T),
) -> Result<(Accepted, T), Error> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::Tolerance { tolerance });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::StepSize { dt });
    }
    let mut dt = dt;
    let (mut error, mut kept) = measured(dt, &mut trial)?;
    let mut rejections = 0;

    while error > tolerance {
        if config.max_rejections().is_some_and(|max| rejections >= max) {
            return Err(Error::MaxRejections {
                rejections,
                dt,
                error,
            });
        }

        dt = shrink(dt, tolerance, error, config.safety());
        rejections += 1;

        (error, kept) = measured(dt, &mut trial)?;
    }

    let accepted = Accepted {
        dt,
        next_dt: suggest(dt, tolerance, error, config),
        error,
        rejections,
    };

    Ok((accepted, kept))
}

fn measured<T>(dt: f64, trial: &mut impl FnMut(f64) -> (f64, T)) -> Result<(f64, T), Error> {
    let (error, kept) = trial(dt);
    if error.is_finite() && error >= 0.0 {
        Ok((error, kept))
    } else {
        Err(Error::NonFiniteError { dt, error })
    }
}

/// Step size for the next trial after a rejection; requires `error > tolerance`.
fn shrink(dt: f64, tolerance: f64, error: f64, safety: f64) -> f64 {
    dt * safety * (tolerance / error).powf(SHRINK_EXPONENT)
}

/// Suggested step size after acceptance, capped at `max_next_dt`.
///
/// A zero error gives an unbounded growth ratio, so the cap is returned
/// directly.
fn suggest(dt: f64, tolerance: f64, error: f64, config: &Config) -> f64 {
    if error == 0.0 {
        return config.max_next_dt();
    }

    let next = dt * config.safety() * (tolerance / error).powf(GROW_EXPONENT);
    next.min(config.max_next_dt())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn accepts_first_trial_within_tolerance() {
        let (accepted, kept) =
            accept(1e-3, 0.5, &Config::default(), |dt| (1e-4, dt)).expect("accepts");

        assert_eq!(accepted.dt, 0.5);
        assert_eq!(accepted.rejections, 0);
        assert_eq!(kept, 0.5);

        let expected = 0.5 * 0.9 * 10.0_f64.powf(0.25);
        assert_relative_eq!(accepted.next_dt, expected);
    }

    #[test]
    fn error_equal_to_tolerance_is_accepted() {
        let (accepted, ()) =
            accept(1e-3, 0.5, &Config::default(), |_| (1e-3, ())).expect("accepts");

        assert_eq!(accepted.rejections, 0);
        assert_relative_eq!(accepted.next_dt, 0.45);
    }

    #[test]
    fn shrinks_with_fifth_root() {
        // Error scales like dt^5, so one shrink is enough.
        let mut trials = Vec::new();
        let (accepted, ()) = accept(1e-6, 1.0, &Config::default(), |dt| {
            trials.push(dt);
            (1e-3 * dt.powi(5), ())
        })
        .expect("accepts");

        let first_shrink = 0.9 * (1e-6_f64 / 1e-3).powf(0.2);
        assert_eq!(trials.len(), 2);
        assert_relative_eq!(trials[1], first_shrink);
        assert_eq!(accepted.dt, trials[1]);
        assert_eq!(accepted.rejections, 1);
    }

    #[test]
    fn zero_error_suggests_cap() {
        let config = Config::default().with_max_next_dt(0.3).expect("valid");
        let (accepted, ()) = accept(1e-9, 0.01, &config, |_| (0.0, ())).expect("accepts");

        assert_eq!(accepted.next_dt, 0.3);
    }

    #[test]
    fn suggestion_never_exceeds_cap() {
        let config = Config::default().with_max_next_dt(2.0).expect("valid");
        for error in [1e-300, 1e-12, 1e-6, 1e-3] {
            let (accepted, ()) = accept(1e-3, 1.5, &config, |_| (error, ())).expect("accepts");
            assert!(accepted.next_dt <= 2.0);
        }
    }

    #[test]
    fn rejects_bad_tolerance_and_step() {
        let config = Config::default();

        assert_eq!(
            accept(0.0, 0.1, &config, |_| (0.0, ())).unwrap_err(),
            Error::Tolerance { tolerance: 0.0 }
        );
        assert_eq!(
            accept(1e-6, -0.1, &config, |_| (0.0, ())).unwrap_err(),
            Error::StepSize { dt: -0.1 }
        );
    }

    #[test]
    fn non_finite_error_is_reported() {
        let result = accept(1e-6, 0.1, &Config::default(), |_| (f64::NAN, ()));
        assert!(matches!(result, Err(Error::NonFiniteError { .. })));
    }

    #[test]
    fn rejection_cap_is_enforced() {
        let config = Config::default().with_max_rejections(Some(3)).expect("valid");

        let mut calls = 0;
        let result = accept(0.5, 1.0, &config, |_| {
            calls += 1;
            (1.0, ())
        });

        assert!(matches!(
            result,
            Err(Error::MaxRejections { rejections: 3, .. })
        ));
        assert_eq!(calls, 4);
    }

    #[test]
    fn keeps_shrinking_below_time_resolution() {
        // Only steps under 1e-12 meet the tolerance; at t = 1e6 such steps no
        // longer change t, which must not stop the loop.
        let t = 1.0e6;
        let (accepted, ()) = accept(1e-9, 1.0, &Config::default(), |dt| {
            (if dt < 1e-12 { 0.0 } else { 1.0 }, ())
        })
        .expect("accepts");

        assert!(accepted.dt < 1e-12);
        assert_eq!(t + accepted.dt, t);
        assert!(accepted.rejections > 0);
    }
}
