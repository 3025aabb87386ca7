/// Control actions an observer can return to the RKF45 drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the observed event.
    ///
    /// The state and time of that event are the last ones the driver
    /// records; no further trial steps are evaluated.
    StopEarly,
}
