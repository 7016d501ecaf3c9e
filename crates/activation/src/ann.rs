//! The learned surrogate of sarcomere activation.
//!
//! [`AnnModel`] resamples the forcing onto a uniform grid with step `dt` and
//! advances a latent state with explicit Euler, using the network as the
//! right-hand side:
//!
//! ```text
//! x_0 = x0
//! x_i = x_{i-1} + dt · f(x_{i-1}, Ca_i, SL_i)
//! P_i = x_i[0]
//! ```
//!
//! The network was trained against trajectories produced with this exact
//! scheme and step, so neither should be changed without retraining.

use std::{convert::Infallible, path::Path, time::Instant};

use log::{debug, info};
use ndarray::Array1;
use sarcomere_core::{
    ActivationModel, DerivativeOf, Forcing, InputError, Observer, OdeProblem, StepIntegrable,
    Trajectory,
};
use sarcomere_solvers::transient::euler::{self, Action, Event, Status};
use thiserror::Error;

use crate::{
    network::{Network, NetworkInput},
    params::{ParameterError, ParameterSet},
    resample::{ResampleError, Resampler, uniform_grid},
};

/// Errors that can occur while solving with the surrogate.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid forcing: {0}")]
    Validation(#[from] InputError),

    #[error("resampling failed: {0}")]
    Resample(#[from] ResampleError),

    #[error("integration failed: {0}")]
    Integration(#[from] euler::Error),
}

/// The surrogate's latent state; component 0 is the permissivity.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentState(Array1<f64>);

/// Time derivative of a [`LatentState`].
#[derive(Debug, Clone, PartialEq)]
pub struct LatentRate(Array1<f64>);

impl LatentState {
    /// The observable permissivity, `x[0]`.
    #[must_use]
    pub fn permissivity(&self) -> f64 {
        self.0[0]
    }
}

impl StepIntegrable<f64> for LatentState {
    type Derivative = LatentRate;

    fn step(&self, derivative: LatentRate, dt: f64) -> Self {
        let mut next = self.0.clone();
        next.scaled_add(dt, &derivative.0);
        LatentState(next)
    }
}

/// Forcing sample at one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drive {
    pub ca: f64,
    pub sl: f64,
}

/// Adapts the latent state and grid forcing to the network's input layout.
struct SurrogateProblem;

impl OdeProblem for SurrogateProblem {
    type Input = NetworkInput;
    type Output = Array1<f64>;
    type Forcing = Drive;
    type Delta = f64;
    type State = LatentState;
    type Error = Infallible;

    fn build_input(
        &self,
        state: &Self::State,
        forcing: &Self::Forcing,
    ) -> Result<Self::Input, Self::Error> {
        Ok(NetworkInput::new(state.0.view(), forcing.ca, forcing.sl))
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        Ok(LatentRate(output))
    }
}

/// The outcome of an observed solve.
#[derive(Debug, Clone)]
pub struct Run {
    /// Whether every grid point was reached.
    pub status: Status,

    /// Trajectory up to the last grid point reached.
    pub trajectory: Trajectory,
}

/// Network-based model of sarcomere permissivity.
///
/// The model owns an immutable [`ParameterSet`] and a fixed step. Solving
/// borrows the model, so a single instance can serve concurrent solves.
#[derive(Debug, Clone)]
pub struct AnnModel {
    params: ParameterSet,
    dt: f64,
}

impl AnnModel {
    /// Step size the shipped parameter sets were trained with, in seconds.
    pub const DEFAULT_STEP: f64 = 1e-3;

    #[must_use]
    pub fn new(params: ParameterSet) -> Self {
        Self {
            params,
            dt: Self::DEFAULT_STEP,
        }
    }

    /// Loads the parameter set stored in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if the parameter set cannot be loaded.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ParameterError> {
        ParameterSet::from_dir(dir).map(Self::new)
    }

    /// Replaces the integration step.
    ///
    /// A step that is not positive and finite makes every solve fail with
    /// [`ResampleError::InvalidStep`].
    #[must_use]
    pub fn with_step(self, dt: f64) -> Self {
        Self { dt, ..self }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.dt
    }

    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Solves while reporting each grid point to `observer`.
    ///
    /// The observer sees the initial state as step 0 and may return
    /// [`Action::StopEarly`] at any step; the returned trajectory then ends at
    /// that step.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if the forcing is malformed, spans less than
    /// one step, or cannot be resampled. Validation happens before any
    /// arithmetic.
    pub fn solve_observed<Obs>(&self, forcing: &Forcing, observer: Obs) -> Result<Run, SolveError>
    where
        Obs: for<'a> Observer<Event<'a, LatentState>, Action>,
    {
        forcing.validate()?;
        let start = forcing.times[0];
        let end = forcing.times[forcing.len() - 1];

        let times = uniform_grid(start, end, self.dt)?;
        let ca = Resampler::new(&forcing.times, &forcing.ca)?.sample(&times)?;
        let sl = Resampler::new(&forcing.times, &forcing.sl)?.sample(&times)?;
        let drives: Vec<Drive> = ca
            .iter()
            .zip(&sl)
            .map(|(&ca, &sl)| Drive { ca, sl })
            .collect();

        debug!(
            "ANN model: {} grid points at dt = {} s over [{start}, {end})",
            times.len(),
            self.dt
        );
        let started = Instant::now();

        let solution = euler::solve(
            &Network::new(&self.params),
            &SurrogateProblem,
            LatentState(self.params.x0().clone()),
            &drives,
            self.dt,
            observer,
        )?;

        let p = solution
            .history
            .iter()
            .map(LatentState::permissivity)
            .collect();
        let mut trajectory = Trajectory { times, ca, sl, p };
        trajectory.truncate(solution.history.len());

        info!(
            "ANN model: {} steps done in {:.3} s",
            solution.steps,
            started.elapsed().as_secs_f64()
        );

        Ok(Run {
            status: solution.status,
            trajectory,
        })
    }
}

impl ActivationModel for AnnModel {
    type Error = SolveError;

    fn solve(&self, forcing: &Forcing) -> Result<Trajectory, Self::Error> {
        self.solve_observed(forcing, ()).map(|run| run.trajectory)
    }
}
