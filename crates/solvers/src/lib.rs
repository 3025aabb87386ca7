//! Adaptive Runge-Kutta-Fehlberg solvers.
//!
//! # Modules
//!
//! - [`transient`] — time integration of ODEs `dx/dt = f(x, t)`

pub mod transient;
