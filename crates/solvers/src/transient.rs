//! Solvers for transient problems — advancing a state through time.
//!
//! A state implements [`OdeState`] and its right-hand side implements
//! [`Derivative`] (or [`DerivativeInPlace`] for the buffer-reusing forms).
//!
//! # Solvers
//!
//! - [`rkf45`] — embedded Runge-Kutta-Fehlberg 4(5) with adaptive step size
//!
//! [`OdeState`]: fehlberg_core::OdeState
//! [`Derivative`]: fehlberg_core::Derivative
//! [`DerivativeInPlace`]: fehlberg_core::DerivativeInPlace

pub mod rkf45;
