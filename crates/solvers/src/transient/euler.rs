//! Forward Euler solver for forced ODE problems.
//!
//! This module provides a fixed-step explicit Euler integrator driven by a
//! sequence of forcing samples, one per grid point:
//!
//! ```text
//! state_0 = initial
//! state_n = state_{n-1} + dt * f(state_{n-1}, forcing_n)
//! ```
//!
//! The forcing sample used to leave grid point `n - 1` is the one at grid
//! point `n`. The forcing at grid point 0 is never read; the initial state is
//! taken as given.
//!
//! # Example
//!
//! ```ignore
//! use sarcomere_solvers::transient::euler;
//!
//! let solution = euler::solve_unobserved(&model, &problem, initial, &forcing, dt)?;
//!
//! for (step, state) in solution.history.iter().enumerate() {
//!     println!("{step}: {state:?}");
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use sarcomere_core::{Model, Observer, OdeProblem, StepIntegrable};

/// Integrates a forced ODE problem using forward Euler.
///
/// # Algorithm
///
/// 1. Record the initial state as grid point 0.
/// 2. For each grid point `n` in `1..forcing.len()`:
///    - Build the model input from the previous state and `forcing[n]`.
///    - Call the model and extract the derivative.
///    - Step the state forward: `state + dt * derivative`.
///    - Emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full history.
///
/// The history has one entry per forcing sample, or a single entry when
/// `forcing` has fewer than two samples.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: P::State,
    forcing: &[P::Forcing],
    dt: P::Delta,
    mut observer: Obs,
) -> Result<Solution<P::State>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::State: Clone,
    P::Delta: Clone,
    Obs: for<'a> Observer<Event<'a, P::State>, Action>,
{
    let mut history = Vec::with_capacity(forcing.len().max(1));
    history.push(initial);

    let event = Event {
        step: 0,
        state: &history[0],
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    for (step, sample) in forcing.iter().enumerate().skip(1) {
        let current = &history[step - 1];

        let input = problem
            .build_input(current, sample)
            .map_err(|err| Error::problem(step, err))?;
        let output = model
            .call(&input)
            .map_err(|err| Error::model(step, err))?;
        let derivative = problem
            .derivative(&input, output)
            .map_err(|err| Error::problem(step, err))?;

        let next = current.step(derivative, dt.clone());
        history.push(next);

        let event = Event {
            step,
            state: &history[step],
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    let steps = history.len() - 1;
    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates a forced ODE problem using forward Euler without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: P::State,
    forcing: &[P::Forcing],
    dt: P::Delta,
) -> Result<Solution<P::State>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::State: Clone,
    P::Delta: Clone,
{
    solve(model, problem, initial, forcing, dt, ())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use sarcomere_core::DerivativeOf;

    // --- Test fixtures ---

    /// State: a scalar level relaxing toward a forced target.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Level(f64);

    /// Derivative: rate of change of the level.
    #[derive(Debug, Clone, Copy)]
    struct Rate(f64);

    impl StepIntegrable<f64> for Level {
        type Derivative = Rate;

        fn step(&self, derivative: Rate, dt: f64) -> Self {
            Level(self.0 + dt * derivative.0)
        }
    }

    /// Model input: current level and the forced target.
    #[derive(Debug, Clone, Copy)]
    struct Input {
        level: f64,
        target: f64,
    }

    /// First-order relaxation `rate * (target - level)`.
    struct Relaxation {
        rate: f64,
    }

    impl Model for Relaxation {
        type Input = Input;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            Ok(self.rate * (input.target - input.level))
        }
    }

    /// Problem that pairs the level with a target sample.
    struct RelaxationProblem;

    impl OdeProblem for RelaxationProblem {
        type Input = Input;
        type Output = f64;
        type Forcing = f64;
        type Delta = f64;
        type State = Level;
        type Error = Infallible;

        fn build_input(
            &self,
            state: &Self::State,
            forcing: &Self::Forcing,
        ) -> Result<Self::Input, Self::Error> {
            Ok(Input {
                level: state.0,
                target: *forcing,
            })
        }

        fn derivative(
            &self,
            _input: &Self::Input,
            output: Self::Output,
        ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
            Ok(Rate(output))
        }
    }

    /// Model that fails once the level passes a threshold.
    struct Fragile;

    #[derive(Debug, thiserror::Error)]
    #[error("level {0} above threshold")]
    struct AboveThreshold(f64);

    impl Model for Fragile {
        type Input = Input;
        type Output = f64;
        type Error = AboveThreshold;

        fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
            if input.level > 1.0 {
                Err(AboveThreshold(input.level))
            } else {
                Ok(1.0)
            }
        }
    }

    // --- Tests ---

    #[test]
    fn relaxation_follows_euler_recurrence() {
        let model = Relaxation { rate: 2.0 };
        let forcing = [0.0, 1.0, 1.0, 1.0];

        let solution = solve_unobserved(&model, &RelaxationProblem, Level(0.0), &forcing, 0.25)
            .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 3);
        assert_eq!(solution.history.len(), 4);

        // Each step halves the distance to the target.
        assert_relative_eq!(solution.history[1].0, 0.5);
        assert_relative_eq!(solution.history[2].0, 0.75);
        assert_relative_eq!(solution.history[3].0, 0.875);
    }

    #[test]
    fn forcing_at_step_zero_is_ignored() {
        let model = Relaxation { rate: 1.0 };

        let a = solve_unobserved(&model, &RelaxationProblem, Level(0.0), &[100.0, 1.0], 0.5)
            .expect("should solve");
        let b = solve_unobserved(&model, &RelaxationProblem, Level(0.0), &[-100.0, 1.0], 0.5)
            .expect("should solve");

        assert_eq!(a.history, b.history);
        assert_relative_eq!(a.history[1].0, 0.5);
    }

    #[test]
    fn observer_can_stop_early() {
        let model = Relaxation { rate: 1.0 };
        let forcing = vec![1.0; 100];

        let observer = |event: &Event<'_, Level>| {
            if event.step >= 5 {
                Some(Action::StopEarly)
            } else {
                None
            }
        };

        let solution = solve(&model, &RelaxationProblem, Level(0.0), &forcing, 0.1, observer)
            .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 6); // initial + 5 steps
    }

    #[test]
    fn single_sample_returns_initial() {
        let model = Relaxation { rate: 1.0 };

        let solution = solve_unobserved(&model, &RelaxationProblem, Level(0.3), &[1.0], 0.1)
            .expect("should return initial");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history, vec![Level(0.3)]);
    }

    #[test]
    fn step_numbers_start_at_zero() {
        let model = Relaxation { rate: 1.0 };
        let forcing = [0.0; 5];

        let mut step_values = Vec::new();
        solve(
            &model,
            &RelaxationProblem,
            Level(0.0),
            &forcing,
            0.25,
            |event: &Event<'_, Level>| {
                step_values.push(event.step);
                None
            },
        )
        .expect("should solve");

        assert_eq!(step_values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn model_error_is_propagated() {
        let forcing = [0.0; 10];

        let err = solve_unobserved(&Fragile, &RelaxationProblem, Level(0.0), &forcing, 0.5)
            .expect_err("model should fail");

        // Levels 0, 0.5, 1.0, 1.5; the model rejects 1.5 while computing step 4.
        assert!(matches!(err, Error::Model { step: 4, .. }));
        assert_eq!(err.step(), 4);
        assert!(err.to_string().contains("above threshold"));
    }
}
