use fehlberg_core::OdeState;

/// Reusable scratch storage for the buffer-reusing stage evaluator.
///
/// Holds six stage derivatives `k1..k6` and one temporary state, each shaped
/// like the state it was built from. The buffer is created once and then
/// passed to every [`step_into`] call for the same state shape; its contents
/// are overwritten on each call and it is never resized.
///
/// A buffer must not be shared between interleaved integrations. Use one
/// buffer per independent state.
///
/// [`step_into`]: super::step_into
#[derive(Debug, Clone, PartialEq)]
pub struct StageBuffer<S> {
    pub(super) k1: S,
    pub(super) k2: S,
    pub(super) k3: S,
    pub(super) k4: S,
    pub(super) k5: S,
    pub(super) k6: S,
    pub(super) tmp: S,
}

impl<S: OdeState> StageBuffer<S> {
    /// Creates a buffer whose slots are shaped like `sample`.
    #[must_use]
    pub fn new(sample: &S) -> Self {
        Self {
            k1: sample.empty_like(),
            k2: sample.empty_like(),
            k3: sample.empty_like(),
            k4: sample.empty_like(),
            k5: sample.empty_like(),
            k6: sample.empty_like(),
            tmp: sample.empty_like(),
        }
    }

    /// Returns `true` if every slot has the shape of `state`.
    pub fn fits(&self, state: &S) -> bool {
        self.stages().iter().all(|k| k.same_shape(state)) && self.tmp.same_shape(state)
    }

    /// Returns the stage derivatives from the most recent evaluation.
    pub fn stages(&self) -> [&S; 6] {
        [&self.k1, &self.k2, &self.k3, &self.k4, &self.k5, &self.k6]
    }

    /// Returns the state argument passed to the last stage of the most
    /// recent evaluation.
    pub fn temp(&self) -> &S {
        &self.tmp
    }
}
