use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Calcium and sarcomere-length signals sampled at caller-chosen times.
///
/// This is the input record of [`ActivationModel::solve`]. The sampling may be
/// irregular; models resample it onto their own grid. Field names serialize
/// as `times`, `Ca` and `SL`.
///
/// [`ActivationModel::solve`]: crate::ActivationModel::solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forcing {
    /// Sample times in seconds, strictly increasing.
    pub times: Vec<f64>,
    /// Intracellular calcium concentration in µM.
    #[serde(rename = "Ca")]
    pub ca: Vec<f64>,
    /// Sarcomere length in µm.
    #[serde(rename = "SL")]
    pub sl: Vec<f64>,
}

/// A malformed forcing record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{signal} has {found} samples but times has {expected}")]
    LengthMismatch {
        signal: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("at least 2 samples are required, found {found}")]
    InsufficientData { found: usize },

    #[error("{signal} is not finite at sample {index}")]
    NonFinite { signal: &'static str, index: usize },

    #[error("times must be strictly increasing (sample {index})")]
    NotIncreasing { index: usize },
}

impl Forcing {
    /// Creates a validated forcing record.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the record fails [`Forcing::validate`].
    pub fn new(times: Vec<f64>, ca: Vec<f64>, sl: Vec<f64>) -> Result<Self, InputError> {
        let forcing = Self { times, ca, sl };
        forcing.validate()?;
        Ok(forcing)
    }

    /// Checks that the record describes valid sample functions.
    ///
    /// Lengths are checked first so that a mismatched record is rejected before
    /// any value is inspected.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the signals differ in length from `times`,
    /// fewer than 2 samples are present, any value is not finite, or `times`
    /// is not strictly increasing.
    pub fn validate(&self) -> Result<(), InputError> {
        let expected = self.times.len();
        for (signal, values) in [("Ca", &self.ca), ("SL", &self.sl)] {
            if values.len() != expected {
                return Err(InputError::LengthMismatch {
                    signal,
                    expected,
                    found: values.len(),
                });
            }
        }

        if expected < 2 {
            return Err(InputError::InsufficientData { found: expected });
        }

        for (signal, values) in [("times", &self.times), ("Ca", &self.ca), ("SL", &self.sl)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(InputError::NonFinite { signal, index });
            }
        }

        if let Some(index) = self.times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InputError::NotIncreasing { index: index + 1 });
        }

        Ok(())
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the record holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the time span `(first, last)` of a non-empty record.
    #[must_use]
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((*self.times.first()?, *self.times.last()?))
    }
}
