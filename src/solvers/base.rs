//! Base solver traits and types

use nalgebra::DVector;
use thiserror::Error;

/// Solver-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Timestep {dt} smaller than minimum {dt_min}")]
    TimestepTooSmall { dt: f64, dt_min: f64 },

    #[error("Exceeded {max_substeps} sub-steps before reaching t = {target}")]
    TooManySteps { max_substeps: usize, target: f64 },

    #[error("Non-finite state at t = {time}")]
    NonFiniteState { time: f64 },

    #[error("History buffer is empty")]
    EmptyHistory,
}

/// Result of a solver step
#[derive(Debug, Clone, Copy)]
pub struct SolverStepResult {
    pub success: bool,
    pub error_norm: f64,
    pub scale: Option<f64>,
}

impl Default for SolverStepResult {
    fn default() -> Self {
        Self {
            success: true,
            error_norm: 0.0,
            scale: None,
        }
    }
}

/// Stage-wise one-step method over a state vector
///
/// The solver owns the state it advances. `buffer` remembers the state at the
/// start of a step so a rejected step can be undone with `revert`.
pub trait Solver: Send + Sync {
    /// State after the last completed stage
    fn state(&self) -> &DVector<f64>;

    /// Start a step of size `dt` from the current state
    fn buffer(&mut self, dt: f64);

    /// Restore the state saved by the last `buffer`
    fn revert(&mut self) -> Result<(), SolverError>;

    /// Back to the initial state, history cleared
    fn reset(&mut self);

    /// Order of the propagated solution
    fn order(&self) -> usize;

    /// Right-hand side evaluations per step
    fn stages(&self) -> usize;

    /// Whether the last stage reports an error estimate and step scale
    fn is_adaptive(&self) -> bool;

    fn is_finite(&self) -> bool {
        self.state().iter().all(|x| x.is_finite())
    }
}

/// Explicit solver trait
///
/// A full step is `buffer(dt)` followed by `stages()` calls to `step`. The
/// right-hand side receives the trial state and the stage time offset
/// `c_i * dt` measured from the start of the step; the last call returns the
/// error estimate.
pub trait ExplicitSolver: Solver {
    /// Evaluate one stage
    fn step<F>(&mut self, f: F, dt: f64) -> SolverStepResult
    where
        F: FnMut(&DVector<f64>, f64) -> DVector<f64>;

    /// `buffer(dt)` and every stage; returns the last stage's result
    fn full_step<F>(&mut self, mut f: F, dt: f64) -> SolverStepResult
    where
        F: FnMut(&DVector<f64>, f64) -> DVector<f64>,
    {
        self.buffer(dt);
        let mut result = SolverStepResult::default();
        for _ in 0..self.stages() {
            result = self.step(&mut f, dt);
        }
        result
    }
}
