/// Errors that can occur while stepping or solving.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("tolerance must be finite and positive, got {tolerance}")]
    Tolerance { tolerance: f64 },

    #[error("step size must be finite and positive, got {dt}")]
    StepSize { dt: f64 },

    #[error("stage buffer or output shape does not match the state")]
    ShapeMismatch,

    #[error("error metric returned {error} at dt = {dt}")]
    NonFiniteError { dt: f64, error: f64 },

    #[error("step rejected {rejections} times, error {error} still exceeds tolerance at dt = {dt}")]
    MaxRejections {
        rejections: usize,
        dt: f64,
        error: f64,
    },

    /// Reported by the drivers when an accepted step leaves `t` unchanged.
    #[error("step size {dt} no longer advances t = {t}")]
    StepUnderflow { t: f64, dt: f64 },

    #[error("interval [{start}, {end}] must be finite with end > start")]
    Interval { start: f64, end: f64 },
}
