use crate::{Forcing, Trajectory};

/// The `solve` contract shared by every sarcomere activation model.
///
/// The learned surrogate and any mechanistic reference model implement this
/// trait, so callers can swap one for the other and compare trajectories.
/// Implementations must not carry state between calls: solving the same
/// forcing twice yields the same trajectory.
pub trait ActivationModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Simulates permissivity under the given forcing.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the forcing is malformed or the model cannot
    /// be evaluated. No partial trajectory is returned on failure.
    fn solve(&self, forcing: &Forcing) -> Result<Trajectory, Self::Error>;
}

/// A source of calcium and sarcomere-length signals.
pub trait ForcingProvider {
    /// Samples both signals at the requested times.
    fn forcing(&self, times: &[f64]) -> Forcing;
}
