use super::Accepted;

/// Event emitted by the RKF45 driver for the initial state and after every
/// accepted step.
///
/// Step 0 is the initial state, for which `accepted` is `None`.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, S> {
    /// The step number (0 for initial, 1..N for accepted steps).
    pub step: usize,

    /// Time after this step.
    pub t: f64,

    /// State after this step.
    pub state: &'a S,

    /// Details of the accepted step.
    pub accepted: Option<Accepted>,
}
