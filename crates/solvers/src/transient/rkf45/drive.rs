use fehlberg_core::{Derivative, DerivativeInPlace, ErrorMetric, Observer, OdeState};

use super::{
    Accepted, Action, Config, Error, Event, Sample, Solution, StageBuffer, Status, Summary,
    step, step_into,
};

/// Integrates `dx/dt = f(x, t)` from `t0` to `t_end` with adaptive steps.
///
/// # Algorithm
///
/// 1. Emit the initial event (step 0).
/// 2. Until `t` reaches `t_end`:
///    - Take one [`step`] with the current trial size, shortened so the step
///      never passes `t_end`.
///    - Advance the state by the accepted increment and `t` by the accepted
///      step size; the step that reaches the end lands exactly on `t_end`.
///    - Use the suggested next step size as the following trial.
///    - Emit an [`Event`]; if the observer returns [`Action::StopEarly`],
///      terminate.
/// 3. Return the solution with the full history.
///
/// # Errors
///
/// Returns [`Error::Interval`] unless `t0` and `t_end` are finite with
/// `t_end > t0`, [`Error::StepUnderflow`] if an accepted step is too small to
/// move `t`, and otherwise any error from [`step`].
#[allow(clippy::too_many_arguments)]
pub fn solve<S, F, M, Obs>(
    f: &mut F,
    x0: S,
    t0: f64,
    t_end: f64,
    tolerance: f64,
    dt0: f64,
    metric: &M,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<S>, Error>
where
    S: OdeState + Clone,
    F: Derivative<S>,
    M: ErrorMetric<S>,
    Obs: for<'a> Observer<Event<'a, S>, Action>,
{
    check_interval(t0, t_end)?;

    let mut history = vec![Sample {
        t: t0,
        state: x0.clone(),
    }];

    let mut x = x0;
    let mut t = t0;
    let mut dt = dt0;
    let mut steps = 0;
    let mut rejections = 0;

    let event = Event {
        step: 0,
        t,
        state: &x,
        accepted: None,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps,
            rejections,
        });
    }

    while t < t_end {
        let remaining = t_end - t;
        let taken = step(f, &x, t, tolerance, dt.min(remaining), metric, config)?;
        let next_t = advance(t, t_end, remaining, taken.dt)?;

        x = x.add(&taken.increment);
        t = next_t;
        dt = taken.next_dt;
        steps += 1;
        rejections += taken.rejections;

        history.push(Sample {
            t,
            state: x.clone(),
        });

        let event = Event {
            step: steps,
            t,
            state: &x,
            accepted: Some(Accepted {
                dt: taken.dt,
                next_dt: taken.next_dt,
                error: taken.error,
                rejections: taken.rejections,
            }),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps,
                rejections,
            });
        }
    }

    Ok(Solution {
        status: Status::ReachedEnd,
        history,
        steps,
        rejections,
    })
}

/// Integrates from `t0` to `t_end` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns the same errors as [`solve`].
#[allow(clippy::too_many_arguments)]
pub fn solve_unobserved<S, F, M>(
    f: &mut F,
    x0: S,
    t0: f64,
    t_end: f64,
    tolerance: f64,
    dt0: f64,
    metric: &M,
    config: &Config,
) -> Result<Solution<S>, Error>
where
    S: OdeState + Clone,
    F: Derivative<S>,
    M: ErrorMetric<S>,
{
    solve(f, x0, t0, t_end, tolerance, dt0, metric, config, ())
}

/// Integrates from `t0` to `t_end`, advancing `x` in place.
///
/// Follows the same algorithm as [`solve`] but steps with [`step_into`] and
/// the caller's `buffer`. The two estimate destinations are allocated once
/// per call; no history is recorded. Observers see `x` after each accepted
/// step. On return `x` holds the state at the returned time, including when
/// an error interrupts the integration.
///
/// # Errors
///
/// Returns [`Error::Interval`] for an invalid interval,
/// [`Error::StepUnderflow`] if an accepted step is too small to move `t`, and
/// otherwise any error from [`step_into`].
#[allow(clippy::too_many_arguments)]
pub fn solve_in_place<S, F, M, Obs>(
    f: &mut F,
    x: &mut S,
    t0: f64,
    t_end: f64,
    tolerance: f64,
    dt0: f64,
    metric: &M,
    config: &Config,
    buffer: &mut StageBuffer<S>,
    mut observer: Obs,
) -> Result<Summary, Error>
where
    S: OdeState,
    F: DerivativeInPlace<S>,
    M: ErrorMetric<S>,
    Obs: for<'a> Observer<Event<'a, S>, Action>,
{
    check_interval(t0, t_end)?;
    if !buffer.fits(x) {
        return Err(Error::ShapeMismatch);
    }

    let mut order4 = x.empty_like();
    let mut order5 = x.empty_like();

    let mut t = t0;
    let mut dt = dt0;
    let mut steps = 0;
    let mut rejections = 0;

    let event = Event {
        step: 0,
        t,
        state: &*x,
        accepted: None,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Summary {
            status: Status::StoppedByObserver,
            t,
            steps,
            rejections,
        });
    }

    while t < t_end {
        let remaining = t_end - t;
        let accepted = step_into(
            f,
            x,
            t,
            tolerance,
            dt.min(remaining),
            buffer,
            &mut order4,
            &mut order5,
            metric,
            config,
        )?;
        let next_t = advance(t, t_end, remaining, accepted.dt)?;

        x.add_scaled(&order5, 1.0);
        t = next_t;
        dt = accepted.next_dt;
        steps += 1;
        rejections += accepted.rejections;

        let event = Event {
            step: steps,
            t,
            state: &*x,
            accepted: Some(accepted),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Summary {
                status: Status::StoppedByObserver,
                t,
                steps,
                rejections,
            });
        }
    }

    Ok(Summary {
        status: Status::ReachedEnd,
        t,
        steps,
        rejections,
    })
}

fn check_interval(start: f64, end: f64) -> Result<(), Error> {
    if start.is_finite() && end.is_finite() && end > start {
        Ok(())
    } else {
        Err(Error::Interval { start, end })
    }
}

/// Returns the time after an accepted step, snapping to `t_end` when the
/// step covered the rest of the interval.
///
/// An accepted step that leaves `t` unchanged would repeat forever, so it is
/// reported instead.
fn advance(t: f64, t_end: f64, remaining: f64, dt: f64) -> Result<f64, Error> {
    if dt >= remaining {
        return Ok(t_end);
    }

    let next = t + dt;
    if next == t {
        Err(Error::StepUnderflow { t, dt })
    } else {
        Ok(next)
    }
}
