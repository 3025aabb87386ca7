//! Core traits for adaptive Runge-Kutta-Fehlberg integration.
//!
//! This crate defines the shared abstractions the stepper builds on:
//!
//! - [`OdeState`] — the arithmetic a state needs to be integrated, both the
//!   allocating operations and the in-place ones used with reusable buffers
//! - [`Derivative`] and [`DerivativeInPlace`] — the two call conventions for
//!   the right-hand side `dx/dt = f(x, t)`
//! - [`ErrorMetric`] — measures the discrepancy between two increment
//!   estimates, with [`L1`] as the default
//! - [`Observer`] — receives solver events and optionally returns control
//!   actions
//!
//! # Features
//!
//! - `ndarray` (default) — implements [`OdeState`] for `ndarray::Array<f64, D>`.

mod derivative;
mod metric;
mod observer;
mod state;

pub use derivative::{Derivative, DerivativeInPlace};
pub use metric::{ErrorMetric, L1};
pub use observer::Observer;
pub use state::OdeState;
