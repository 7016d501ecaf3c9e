/// A deterministic function from a typed input to a typed output.
///
/// In the activation surrogate this is the network that maps the forcing
/// sample and latent state to the state derivative. Calls take `&self`, so
/// the parameters behind a model are shared read-only by every solve.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at `input`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if `input` is not one the model can evaluate,
    /// such as a vector of the wrong dimension.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}
