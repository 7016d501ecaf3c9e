//! Core traits and record types for sarcomere activation models.
//!
//! This crate defines the shared abstractions that solvers and models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`StepIntegrable`] — a state that can be stepped by its derivative
//! - [`OdeProblem`] — adapts a forced ODE to a [`Model`] right-hand side
//! - [`ActivationModel`] — the `solve` contract shared by every activation model
//! - [`ForcingProvider`] — a source of calcium and sarcomere-length signals
//! - [`Forcing`], [`Trajectory`] — the input and output records of `solve`

mod activation;
mod forcing;
mod model;
mod observer;
mod problem;
mod step;
mod trajectory;

pub use activation::{ActivationModel, ForcingProvider};
pub use forcing::{Forcing, InputError};
pub use model::Model;
pub use observer::Observer;
pub use problem::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use trajectory::{Sample, Trajectory};
