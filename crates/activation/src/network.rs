//! The feed-forward network that serves as the surrogate's right-hand side.

use ndarray::{Array1, ArrayView1};
use sarcomere_core::Model;
use thiserror::Error;

use crate::params::{Layer, ParameterSet};

/// Errors raised while evaluating the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// The network input `[Ca, SL, x...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInput(Array1<f64>);

impl NetworkInput {
    /// Concatenates the forcing sample and the latent state.
    #[must_use]
    pub fn new(state: ArrayView1<'_, f64>, ca: f64, sl: f64) -> Self {
        let mut values = Vec::with_capacity(state.len() + 2);
        values.push(ca);
        values.push(sl);
        values.extend(state.iter().copied());
        Self(Array1::from(values))
    }
}

/// A read-only view of a [`ParameterSet`] as a three-layer network:
///
/// ```text
/// h1  = tanh(W0 · [Ca, SL, x] − T0)
/// h2  = tanh(W1 · h1 − T1)
/// out = W2 · h2 − T2
/// ```
///
/// The output layer is affine so the state derivative is unbounded.
#[derive(Debug, Clone, Copy)]
pub struct Network<'a> {
    params: &'a ParameterSet,
}

impl<'a> Network<'a> {
    #[must_use]
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Evaluates the state derivative for state `x` under forcing `(ca, sl)`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::DimensionMismatch`] if `x` does not have the
    /// parameter set's state dimension.
    pub fn derivative(
        &self,
        x: ArrayView1<'_, f64>,
        ca: f64,
        sl: f64,
    ) -> Result<Array1<f64>, NetworkError> {
        self.call(&NetworkInput::new(x, ca, sl))
    }
}

fn affine(layer: &Layer, input: &Array1<f64>) -> Array1<f64> {
    layer.weights().dot(input) - layer.biases()
}

impl Model for Network<'_> {
    type Input = NetworkInput;
    type Output = Array1<f64>;
    type Error = NetworkError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let expected = self.params.state_dim() + 2;
        let found = input.0.len();
        if found != expected {
            return Err(NetworkError::DimensionMismatch {
                what: "network input",
                expected,
                found,
            });
        }

        let [l0, l1, l2] = self.params.layers();
        let h1 = affine(l0, &input.0).mapv_into(f64::tanh);
        let h2 = affine(l1, &h1).mapv_into(f64::tanh);
        Ok(affine(l2, &h2))
    }
}
