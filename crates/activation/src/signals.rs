//! Closed-form forcing protocol: a calcium transient and a sarcomere-length
//! step with exponential onset and release.

use sarcomere_core::{Forcing, ForcingProvider};
use serde::{Deserialize, Serialize};

use crate::resample::{ResampleError, uniform_grid};

/// Bi-exponential calcium transient released at `t0`.
///
/// Rises with time constant `tau1` and decays with `tau2`; the amplitude is
/// normalized so the peak concentration is exactly `cmax`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalciumTransient {
    /// Diastolic concentration [µM].
    pub c0: f64,
    /// Peak concentration [µM].
    pub cmax: f64,
    /// Rise time constant [s].
    pub tau1: f64,
    /// Decay time constant [s].
    pub tau2: f64,
    /// Release time [s].
    pub t0: f64,
}

impl Default for CalciumTransient {
    fn default() -> Self {
        Self {
            c0: 0.1,
            cmax: 1.1,
            tau1: 0.02,
            tau2: 0.05,
            t0: 0.01,
        }
    }
}

impl CalciumTransient {
    /// Peak value of `exp(-s/tau1) - exp(-s/tau2)` over `s >= 0`.
    fn beta(&self) -> f64 {
        let r = self.tau1 / self.tau2;
        r.powf(-1.0 / (r - 1.0)) - r.powf(-1.0 / (1.0 - 1.0 / r))
    }

    /// Calcium concentration at time `t`, in µM.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        if t < self.t0 {
            return self.c0;
        }
        let s = t - self.t0;
        let shape = (-s / self.tau1).exp() - (-s / self.tau2).exp();
        self.c0 + (self.cmax - self.c0) / self.beta() * shape
    }

    /// Time of the peak concentration, in seconds.
    #[must_use]
    pub fn peak_time(&self) -> f64 {
        let (a, b) = (self.tau1, self.tau2);
        self.t0 + a * b / (b - a) * (b / a).ln()
    }
}

/// Sarcomere shortening from `sl0` toward `sl1` starting at `t0`, with a
/// return toward `sl0` starting at `t1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthTransient {
    /// Resting length [µm].
    pub sl0: f64,
    /// Shortened length [µm].
    pub sl1: f64,
    /// Onset of shortening [s].
    pub t0: f64,
    /// Onset of release [s].
    pub t1: f64,
    /// Shortening time constant [s].
    pub tau0: f64,
    /// Release time constant [s].
    pub tau1: f64,
}

impl Default for LengthTransient {
    fn default() -> Self {
        let sl0 = 2.2;
        Self {
            sl0,
            sl1: sl0 * 0.95,
            t0: 0.15,
            t1: 0.55,
            tau0: 0.05,
            tau1: 0.02,
        }
    }
}

impl LengthTransient {
    /// Sarcomere length at time `t`, in µm.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        let onset = (1.0 - ((self.t0 - t) / self.tau0).exp()).max(0.0);
        let release = (1.0 - ((self.t1 - t) / self.tau1).exp()).max(0.0);
        self.sl0 + (self.sl1 - self.sl0) * (onset - release)
    }
}

/// A complete forcing protocol sampled on a regular grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protocol {
    /// Protocol length [s]; samples cover `[0, duration)`.
    pub duration: f64,
    /// Sampling interval [s].
    pub sample_step: f64,
    pub calcium: CalciumTransient,
    pub length: LengthTransient,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            duration: 0.8,
            sample_step: 1e-4,
            calcium: CalciumTransient::default(),
            length: LengthTransient::default(),
        }
    }
}

impl Protocol {
    /// The sample times `0, sample_step, ...` below `duration`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResampleError`] if the step is invalid or the duration is
    /// shorter than one step.
    pub fn sample_times(&self) -> Result<Vec<f64>, ResampleError> {
        uniform_grid(0.0, self.duration, self.sample_step)
    }

    /// Samples the protocol on its own grid.
    ///
    /// # Errors
    ///
    /// Returns a [`ResampleError`] if the sample grid cannot be built.
    pub fn generate(&self) -> Result<Forcing, ResampleError> {
        Ok(self.forcing(&self.sample_times()?))
    }
}

impl ForcingProvider for Protocol {
    fn forcing(&self, times: &[f64]) -> Forcing {
        Forcing {
            times: times.to_vec(),
            ca: times.iter().map(|&t| self.calcium.at(t)).collect(),
            sl: times.iter().map(|&t| self.length.at(t)).collect(),
        }
    }
}
