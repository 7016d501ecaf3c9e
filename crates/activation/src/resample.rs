//! Resampling of irregularly sampled signals onto a uniform time grid.

use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use thiserror::Error;

/// Fraction of a step absorbed when counting grid points.
///
/// A span of exactly `k` steps that floating point reports as `k - ε` still
/// yields `k` points.
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Largest grid [`uniform_grid`] will build.
///
/// At the default 1 ms step this is a little over a day of simulated time.
pub const MAX_GRID_POINTS: usize = 100_000_000;

#[derive(Debug, Error)]
pub enum ResampleError {
    #[error("at least 2 samples are required, found {found}")]
    InsufficientData { found: usize },

    #[error("{found} values given for {expected} sample times")]
    LengthMismatch { expected: usize, found: usize },

    #[error("grid step must be positive and finite, got {dt}")]
    InvalidStep { dt: f64 },

    #[error("span [{start}, {end}) holds no grid point at step {dt}")]
    EmptyGrid { start: f64, end: f64, dt: f64 },

    #[error("span [{start}, {end}) at step {dt} exceeds {} grid points", MAX_GRID_POINTS)]
    GridTooLarge { start: f64, end: f64, dt: f64 },

    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}

/// Builds the half-open uniform grid `start + i·dt` covering `[start, end)`.
///
/// The grid has `floor((end − start) / dt)` points, up to [`GRID_TOLERANCE`].
/// Points are computed from their index, so spacing does not drift over long
/// spans.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidStep`] if `dt` is not positive and finite,
/// [`ResampleError::EmptyGrid`] if the span holds less than one step, and
/// [`ResampleError::GridTooLarge`] if it holds more than [`MAX_GRID_POINTS`].
pub fn uniform_grid(start: f64, end: f64, dt: f64) -> Result<Vec<f64>, ResampleError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(ResampleError::InvalidStep { dt });
    }

    let steps = ((end - start) / dt + GRID_TOLERANCE).floor();
    if steps.is_nan() || steps < 1.0 {
        return Err(ResampleError::EmptyGrid { start, end, dt });
    }

    #[allow(clippy::cast_precision_loss)]
    let max_steps = MAX_GRID_POINTS as f64;
    if steps > max_steps {
        return Err(ResampleError::GridTooLarge { start, end, dt });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = steps as usize;

    #[allow(clippy::cast_precision_loss)]
    let grid = (0..n).map(|i| start + i as f64 * dt).collect();
    Ok(grid)
}

/// A piecewise-linear interpolant over one sampled signal.
///
/// Queries outside the sampled range return the nearest endpoint value.
pub struct Resampler(Interp1DOwned<f64, Linear>);

impl Resampler {
    /// Creates an interpolant through `(times[i], values[i])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices differ in length, hold fewer than two
    /// samples, or `times` is not strictly increasing.
    pub fn new(times: &[f64], values: &[f64]) -> Result<Self, ResampleError> {
        if values.len() != times.len() {
            return Err(ResampleError::LengthMismatch {
                expected: times.len(),
                found: values.len(),
            });
        }
        if times.len() < 2 {
            return Err(ResampleError::InsufficientData { found: times.len() });
        }

        let interp = Interp1DOwned::new(
            Array1::from(times.to_vec()),
            Array1::from(values.to_vec()),
            Linear,
            Extrapolate::Clamp,
        )?;
        Ok(Self(interp))
    }

    /// Returns the interpolated value at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Interpolation`] if the interpolant rejects `t`.
    pub fn value_at(&self, t: f64) -> Result<f64, ResampleError> {
        Ok(self.0.interpolate(&[t])?)
    }

    /// Returns the interpolated values at every point of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Interpolation`] if any point is rejected.
    pub fn sample(&self, grid: &[f64]) -> Result<Vec<f64>, ResampleError> {
        grid.iter().map(|&t| self.value_at(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn grid_excludes_end() {
        let grid = uniform_grid(0.0, 0.3, 0.1).unwrap();

        assert_eq!(grid.len(), 3);
        assert_relative_eq!(grid[0], 0.0);
        assert_relative_eq!(grid[2], 0.2);
    }

    #[test]
    fn grid_length_is_floor_of_span() {
        let grid = uniform_grid(1.0, 1.0255, 1e-3).unwrap();

        assert_eq!(grid.len(), 25);
        assert!(grid.iter().all(|&t| t < 1.0255));
    }

    #[test]
    fn grid_points_come_from_index() {
        let grid = uniform_grid(0.5, 1.5, 1e-3).unwrap();

        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.5);
        assert_eq!(grid[999], 0.5 + 999.0 * 1e-3);
    }

    #[test]
    fn single_step_span_gives_one_point() {
        let grid = uniform_grid(2.0, 2.001, 1e-3).unwrap();
        assert_eq!(grid, vec![2.0]);
    }

    #[test]
    fn span_shorter_than_step_is_empty() {
        let err = uniform_grid(0.0, 5e-4, 1e-3).unwrap_err();
        assert!(matches!(err, ResampleError::EmptyGrid { .. }));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        for end in [1e30, f64::MAX] {
            let err = uniform_grid(-1.0, end, 1e-3).unwrap_err();
            assert!(matches!(err, ResampleError::GridTooLarge { .. }));
        }
    }

    #[test]
    fn point_limit_counts_grid_points() {
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_GRID_POINTS as f64;

        let err = uniform_grid(0.0, limit + 1.0, 1.0).unwrap_err();
        assert!(matches!(err, ResampleError::GridTooLarge { .. }));

        let grid = uniform_grid(0.0, 1e6, 1.0).unwrap();
        assert_eq!(grid.len(), 1_000_000);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        for dt in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let err = uniform_grid(0.0, 1.0, dt).unwrap_err();
            assert!(matches!(err, ResampleError::InvalidStep { .. }));
        }
    }

    #[test]
    fn linear_between_samples() {
        let resampler = Resampler::new(&[0.0, 1.0, 3.0], &[0.0, 0.4, 0.0]).unwrap();

        assert_relative_eq!(resampler.value_at(0.5).unwrap(), 0.2);
        assert_relative_eq!(resampler.value_at(2.0).unwrap(), 0.2);
    }

    #[test]
    fn exact_at_sample_points() {
        let times = [0.0, 0.2, 0.5, 0.9];
        let values = [1.0, -3.0, 2.5, 7.0];
        let resampler = Resampler::new(&times, &values).unwrap();

        let sampled = resampler.sample(&times).unwrap();

        for (got, want) in sampled.iter().zip(values) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn outside_range_clamps_to_endpoints() {
        let resampler = Resampler::new(&[0.0, 1.0], &[2.0, 4.0]).unwrap();

        assert_relative_eq!(resampler.value_at(-1.0).unwrap(), 2.0);
        assert_relative_eq!(resampler.value_at(5.0).unwrap(), 4.0);
    }

    #[test]
    fn too_few_samples() {
        let err = Resampler::new(&[0.0], &[1.0]).err().unwrap();
        assert!(matches!(err, ResampleError::InsufficientData { found: 1 }));
    }

    #[test]
    fn mismatched_lengths() {
        let err = Resampler::new(&[0.0, 1.0], &[1.0]).err().unwrap();
        assert!(matches!(
            err,
            ResampleError::LengthMismatch {
                expected: 2,
                found: 1,
            }
        ));
    }
}
