//! Learned surrogate for cardiac sarcomere activation.
//!
//! The surrogate maps calcium concentration and sarcomere length over time to
//! permissivity, the fraction of active regulatory sites. It replaces a stiff
//! mechanistic ODE model with a small feed-forward network integrated by
//! explicit Euler on a fixed grid.
//!
//! # Modules
//!
//! - [`params`] — the immutable [`ParameterSet`] and its CSV storage format
//! - [`network`] — the three-layer [`Network`] evaluated as the right-hand side
//! - [`resample`] — uniform grids and piecewise-linear [`Resampler`]s
//! - [`ann`] — the time-stepping [`AnnModel`]
//! - [`signals`] — a closed-form calcium and length [`Protocol`]
//!
//! # Example
//!
//! ```ignore
//! use sarcomere_activation::{AnnModel, Protocol};
//! use sarcomere_core::ActivationModel;
//!
//! let model = AnnModel::from_dir("ANN")?;
//! let trajectory = model.solve(&Protocol::default().generate()?)?;
//! ```

pub mod ann;
pub mod network;
pub mod params;
pub mod resample;
pub mod signals;

pub use ann::{AnnModel, LatentState, Run, SolveError};
pub use network::{Network, NetworkError};
pub use params::{Layer, ParameterError, ParameterSet};
pub use resample::{ResampleError, Resampler};
pub use signals::{CalciumTransient, LengthTransient, Protocol};
