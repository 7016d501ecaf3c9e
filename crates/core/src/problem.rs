use crate::{DerivativeOf, StepIntegrable};

/// Defines a forced ODE problem whose right-hand side is a [`Model`].
///
/// A forced (non-autonomous) problem advances a state under an external
/// forcing sample supplied for each step. The problem assembles the model
/// input from the current state and that step's forcing, and turns the model
/// output back into a derivative of the state. This split lets the solvers
/// in `sarcomere-solvers` drive any model without knowing its layout.
///
/// [`Model`]: crate::Model
pub trait OdeProblem {
    type Input;
    type Output;
    type Forcing;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the model input from the current state and a forcing sample.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be assembled.
    fn build_input(
        &self,
        state: &Self::State,
        forcing: &Self::Forcing,
    ) -> Result<Self::Input, Self::Error>;

    /// Extracts the state derivative from a model call.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be extracted.
    fn derivative(
        &self,
        input: &Self::Input,
        output: Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;
}
