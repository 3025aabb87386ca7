use thiserror::Error;

/// Configuration for the RKF45 step controller.
///
/// - `max_next_dt` caps the suggested next step size (default 1.0).
/// - `safety` discounts every step-size estimate so the next trial is less
///   likely to be rejected (default 0.9).
/// - `max_rejections` bounds the number of shrink iterations in one step;
///   `None` (the default) shrinks until the error meets the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_next_dt: f64,
    safety: f64,
    max_rejections: Option<usize>,
}

/// Errors that can occur when validating an RKF45 config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_next_dt must be finite and positive")]
    MaxNextDt,

    #[error("safety must lie strictly between 0 and 1")]
    Safety,

    #[error("max_rejections must be at least 1 when set")]
    MaxRejections,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1.0, 0.9, None).unwrap()
    }
}

impl Config {
    /// Creates a new validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_next_dt` is not finite and positive, if
    /// `safety` is outside `(0, 1)`, or if `max_rejections` is `Some(0)`.
    pub fn new(
        max_next_dt: f64,
        safety: f64,
        max_rejections: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if !max_next_dt.is_finite() || max_next_dt <= 0.0 {
            return Err(ConfigError::MaxNextDt);
        }
        if !(safety > 0.0 && safety < 1.0) {
            return Err(ConfigError::Safety);
        }
        if max_rejections == Some(0) {
            return Err(ConfigError::MaxRejections);
        }

        Ok(Self {
            max_next_dt,
            safety,
            max_rejections,
        })
    }

    /// Returns a copy with a different cap on the suggested next step.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_next_dt` is not finite and positive.
    pub fn with_max_next_dt(self, max_next_dt: f64) -> Result<Self, ConfigError> {
        Self::new(max_next_dt, self.safety, self.max_rejections)
    }

    /// Returns a copy with a different safety factor.
    ///
    /// # Errors
    ///
    /// Returns an error if `safety` is outside `(0, 1)`.
    pub fn with_safety(self, safety: f64) -> Result<Self, ConfigError> {
        Self::new(self.max_next_dt, safety, self.max_rejections)
    }

    /// Returns a copy with a different rejection cap.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_rejections` is `Some(0)`.
    pub fn with_max_rejections(self, max_rejections: Option<usize>) -> Result<Self, ConfigError> {
        Self::new(self.max_next_dt, self.safety, max_rejections)
    }

    /// Returns the cap on the suggested next step size.
    #[must_use]
    pub fn max_next_dt(&self) -> f64 {
        self.max_next_dt
    }

    /// Returns the safety factor.
    #[must_use]
    pub fn safety(&self) -> f64 {
        self.safety
    }

    /// Returns the maximum number of rejected trials per step, if any.
    #[must_use]
    pub fn max_rejections(&self) -> Option<usize> {
        self.max_rejections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();

        assert_eq!(config.max_next_dt(), 1.0);
        assert_eq!(config.safety(), 0.9);
        assert_eq!(config.max_rejections(), None);
    }

    #[test]
    fn rejects_bad_max_next_dt() {
        assert_eq!(Config::new(0.0, 0.9, None), Err(ConfigError::MaxNextDt));
        assert_eq!(Config::new(-1.0, 0.9, None), Err(ConfigError::MaxNextDt));
        assert_eq!(
            Config::new(f64::INFINITY, 0.9, None),
            Err(ConfigError::MaxNextDt)
        );
    }

    #[test]
    fn rejects_safety_outside_unit_interval() {
        assert_eq!(Config::new(1.0, 0.0, None), Err(ConfigError::Safety));
        assert_eq!(Config::new(1.0, 1.0, None), Err(ConfigError::Safety));
        assert_eq!(Config::new(1.0, f64::NAN, None), Err(ConfigError::Safety));
    }

    #[test]
    fn rejects_zero_rejection_cap() {
        assert_eq!(
            Config::default().with_max_rejections(Some(0)),
            Err(ConfigError::MaxRejections)
        );
    }

    #[test]
    fn builders_keep_other_fields() {
        let config = Config::default()
            .with_safety(0.8)
            .and_then(|c| c.with_max_next_dt(0.25))
            .and_then(|c| c.with_max_rejections(Some(50)))
            .expect("valid config");

        assert_eq!(config.safety(), 0.8);
        assert_eq!(config.max_next_dt(), 0.25);
        assert_eq!(config.max_rejections(), Some(50));
    }
}
