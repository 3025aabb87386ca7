//! Adaptive Runge-Kutta-Fehlberg 4(5) stepper for ODE problems.
//!
//! Each step evaluates the six Fehlberg stages once and combines them into a
//! fourth-order and a fifth-order increment. Their discrepancy, measured by an
//! [`ErrorMetric`], estimates the local error:
//!
//! ```text
//! while error > tolerance:
//!     dt <- dt * safety * (tolerance / error)^(1/5)
//! next_dt = min(dt * safety * (tolerance / error)^(1/4), max_next_dt)
//! ```
//!
//! The fifth-order increment of the accepted trial is returned together with
//! the step size that produced it and a suggestion for the next call.
//!
//! # Two forms
//!
//! - [`step`] allocates every stage and estimate. It works with any
//!   [`OdeState`] and a value-returning [`Derivative`].
//! - [`step_into`] writes into a caller-owned [`StageBuffer`] and two
//!   destination states, allocating nothing. It takes a
//!   [`DerivativeInPlace`] and suits large states such as discretized fields.
//!
//! Both forms produce bit-identical results for the same mathematics.
//!
//! # Drivers
//!
//! [`solve`] and [`solve_in_place`] integrate over an interval by calling the
//! steppers repeatedly, emitting an [`Event`] after each accepted step.
//!
//! # Example
//!
//! ```
//! use fehlberg_core::L1;
//! use fehlberg_solvers::transient::rkf45::{self, Config};
//!
//! // dx/dt = -x
//! let mut f = |x: &f64, _t: f64| -x;
//!
//! let step = rkf45::step(&mut f, &1.0, 0.0, 1e-8, 0.1, &L1, &Config::default())?;
//!
//! assert!(step.increment < 0.0);
//! assert!(step.next_dt <= 1.0);
//! # Ok::<(), rkf45::Error>(())
//! ```
//!
//! [`ErrorMetric`]: fehlberg_core::ErrorMetric
//! [`OdeState`]: fehlberg_core::OdeState
//! [`Derivative`]: fehlberg_core::Derivative
//! [`DerivativeInPlace`]: fehlberg_core::DerivativeInPlace

mod action;
mod buffer;
mod config;
mod control;
mod drive;
mod error;
mod event;
mod solution;
mod stages;
mod tableau;


pub use action::Action;
pub use buffer::StageBuffer;
pub use config::{Config, ConfigError};
pub use control::Accepted;
pub use drive::{solve, solve_in_place, solve_unobserved};
pub use error::Error;
pub use event::Event;
pub use solution::{Sample, Solution, Status, Summary};
pub use stages::{Estimates, evaluate, evaluate_into};

use fehlberg_core::{Derivative, DerivativeInPlace, ErrorMetric, OdeState};

/// The result of an allocating [`step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    /// Accepted fifth-order increment, shaped like the state.
    pub increment: S,

    /// The step size that produced `increment`.
    pub dt: f64,

    /// Suggested step size for the next call.
    pub next_dt: f64,

    /// Measured error of the accepted trial.
    pub error: f64,

    /// Number of trials rejected before acceptance.
    pub rejections: usize,
}

impl<S> Step<S> {
    /// Returns `(increment, dt, next_dt)`.
    pub fn into_parts(self) -> (S, f64, f64) {
        (self.increment, self.dt, self.next_dt)
    }
}

/// Takes one adaptive step from `(x, t)`, allocating every intermediate.
///
/// Starts from the trial step `dt` and shrinks it until the error between the
/// fourth- and fifth-order estimates is at most `tolerance`. No iteration cap
/// applies unless [`Config::max_rejections`] is set.
///
/// # Errors
///
/// - [`Error::Tolerance`] or [`Error::StepSize`] for a non-positive or
///   non-finite `tolerance` or `dt`.
/// - [`Error::NonFiniteError`] if the metric yields NaN, an infinity, or a
///   negative value, typically because `f` produced non-finite values.
/// - [`Error::MaxRejections`] if the configured cap is reached.
///
/// A step too small to change `t` is still a valid result; only the drivers
/// treat it as an error.
pub fn step<S, F, M>(
    f: &mut F,
    x: &S,
    t: f64,
    tolerance: f64,
    dt: f64,
    metric: &M,
    config: &Config,
) -> Result<Step<S>, Error>
where
    S: OdeState,
    F: Derivative<S>,
    M: ErrorMetric<S>,
{
    let (accepted, increment) = control::accept(tolerance, dt, config, |dt| {
        let Estimates { order4, order5 } = evaluate(f, x, t, dt);
        (metric.distance(&order4, &order5), order5)
    })?;

    Ok(Step {
        increment,
        dt: accepted.dt,
        next_dt: accepted.next_dt,
        error: accepted.error,
        rejections: accepted.rejections,
    })
}

/// Takes one adaptive step from `(x, t)` without allocating.
///
/// Behaves like [`step`], but the stages are written into `buffer` and the
/// estimates of the last trial into `out_increment_4` and `out_increment_5`.
/// On success `out_increment_5` holds the accepted increment. `x` is only
/// read.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `buffer`, `out_increment_4`, or
/// `out_increment_5` is not shaped like `x`, and otherwise the same errors as
/// [`step`].
#[allow(clippy::too_many_arguments)]
pub fn step_into<S, F, M>(
    f: &mut F,
    x: &S,
    t: f64,
    tolerance: f64,
    dt: f64,
    buffer: &mut StageBuffer<S>,
    out_increment_4: &mut S,
    out_increment_5: &mut S,
    metric: &M,
    config: &Config,
) -> Result<Accepted, Error>
where
    S: OdeState,
    F: DerivativeInPlace<S>,
    M: ErrorMetric<S>,
{
    stages::check_shapes(x, buffer, out_increment_4, out_increment_5)?;

    let (accepted, ()) = control::accept(tolerance, dt, config, |dt| {
        stages::fill(f, x, t, dt, buffer, out_increment_4, out_increment_5);
        (metric.distance(out_increment_4, out_increment_5), ())
    })?;

    Ok(accepted)
}
