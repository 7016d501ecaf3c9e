/// Event emitted by the Euler solver for each grid point.
///
/// Step 0 carries the initial state before any integration.
/// Steps 1..N carry the state after each integration step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, S> {
    /// The grid index of this state.
    pub step: usize,

    /// The state at this grid index.
    pub state: &'a S,
}
