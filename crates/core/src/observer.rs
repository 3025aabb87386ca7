/// Receives solver events and optionally returns a control action.
///
/// Solvers define their own event and action types. An observer sees every
/// event in order and may steer the solver by returning `Some(action)`.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is
/// the no-op observer used by the `*_unobserved` solver variants.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
