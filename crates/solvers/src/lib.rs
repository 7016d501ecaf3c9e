//! Time-stepping solvers for sarcomere activation models.
//!
//! Solvers are generic over a [`Model`] that evaluates the right-hand side and
//! an [`OdeProblem`] that adapts state and forcing to the model.
//!
//! [`Model`]: sarcomere_core::Model
//! [`OdeProblem`]: sarcomere_core::OdeProblem

pub mod transient;
