/// Indicates how an RKF45 driver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The last accepted step landed exactly on `t_end`.
    ReachedEnd,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly)
    /// before `t_end` was reached, or at the final event.
    StoppedByObserver,
}

/// A recorded point of the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<S> {
    pub t: f64,
    pub state: S,
}

/// The result of [`solve`](super::solve).
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the driver terminated.
    pub status: Status,

    /// Trajectory at every accepted step, including the initial state.
    pub history: Vec<Sample<S>>,

    /// Number of accepted steps.
    pub steps: usize,

    /// Total number of rejected trial steps.
    pub rejections: usize,
}

/// The result of [`solve_in_place`](super::solve_in_place).
///
/// The final state lives in the caller's state value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// How the driver terminated.
    pub status: Status,

    /// Time reached.
    pub t: f64,

    /// Number of accepted steps.
    pub steps: usize,

    /// Total number of rejected trial steps.
    pub rejections: usize,
}
