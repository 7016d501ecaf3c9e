use serde::{Deserialize, Serialize};

/// The output record of [`ActivationModel::solve`].
///
/// All four sequences share one uniform time grid. Field names serialize as
/// `times`, `Ca`, `SL` and `P`.
///
/// [`ActivationModel::solve`]: crate::ActivationModel::solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Grid times in seconds.
    pub times: Vec<f64>,
    /// Calcium concentration on the grid, in µM.
    #[serde(rename = "Ca")]
    pub ca: Vec<f64>,
    /// Sarcomere length on the grid, in µm.
    #[serde(rename = "SL")]
    pub sl: Vec<f64>,
    /// Permissivity on the grid, dimensionless.
    #[serde(rename = "P")]
    pub p: Vec<f64>,
}

/// One grid point of a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub ca: f64,
    pub sl: f64,
    pub p: f64,
}

impl Trajectory {
    /// Returns the number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the trajectory has no grid points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Shortens every sequence to at most `len` grid points.
    pub fn truncate(&mut self, len: usize) {
        self.times.truncate(len);
        self.ca.truncate(len);
        self.sl.truncate(len);
        self.p.truncate(len);
    }

    /// Iterates over the grid points in time order.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.times
            .iter()
            .zip(&self.ca)
            .zip(&self.sl)
            .zip(&self.p)
            .map(|(((&time, &ca), &sl), &p)| Sample { time, ca, sl, p })
    }

    /// Returns the largest absolute permissivity difference to `other`.
    ///
    /// Only the common prefix of the two trajectories is compared, so both
    /// should come from the same forcing and step size. Returns `None` if
    /// either trajectory is empty.
    #[must_use]
    pub fn max_permissivity_deviation(&self, other: &Trajectory) -> Option<f64> {
        self.p
            .iter()
            .zip(&other.p)
            .map(|(a, b)| (a - b).abs())
            .reduce(f64::max)
    }
}
