use std::error::Error as StdError;

/// A failure while advancing to a grid point.
///
/// `step` is the index of the grid point being computed when the model or
/// problem failed; no state at or after it was produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model failed at step {step}: {source}")]
    Model {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem failed at step {step}: {source}")]
    Problem {
        step: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Model {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(step: usize, err: E) -> Self {
        Self::Problem {
            step,
            source: Box::new(err),
        }
    }

    /// Index of the grid point that could not be computed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Model { step, .. } | Self::Problem { step, .. } => *step,
        }
    }
}
