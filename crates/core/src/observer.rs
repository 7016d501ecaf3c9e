/// Watches a solver as it reaches each grid point.
///
/// A solver emits one event per computed state, starting with the initial
/// state. Returning `Some(action)` asks the solver to act, for example to stop
/// with the history gathered so far; `None` continues the run.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is an observer
/// that never acts.
pub trait Observer<E, A> {
    /// Receives `event` and optionally requests an action.
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
