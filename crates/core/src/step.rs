/// A trait for states that can be stepped using their derivative.
///
/// Implementing this trait lets the fixed-step solvers advance a state by
/// `state + delta * derivative`, where the derivative is taken with respect to
/// `Delta` (time, for every model in this workspace).
pub trait StepIntegrable<Delta> {
    /// The derivative of the state with respect to `Delta`.
    type Derivative;

    /// Returns the state after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
