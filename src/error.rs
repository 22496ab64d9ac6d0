//! Crate-level error types.
//!
//! Integration failures are not errors at this level: they travel inside
//! [`Integration`](crate::integrator::Integration) so the partial trajectory
//! survives. Everything here rejects a request before or instead of a
//! computation.

use thiserror::Error;

use crate::solvers::SolverError;

/// Result type alias for phasesim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all phasesim operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Requested energy lies below the potential at the fixed start position.
    #[error("energy {energy} lies below the potential floor {floor} at the starting position")]
    Domain {
        /// Requested total energy.
        energy: f64,
        /// Potential energy at the starting position.
        floor: f64,
    },

    /// Parameter value outside its declared range.
    #[error("parameter '{name}' = {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Time grid is empty, non-finite or not strictly ascending.
    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(String),

    /// Signal and time grid lengths disagree.
    #[error("signal has {signal} samples but the time grid has {grid}")]
    LengthMismatch {
        /// Number of signal samples.
        signal: usize,
        /// Number of grid points.
        grid: usize,
    },

    /// Spectral analysis needs a uniformly spaced grid.
    #[error("time grid is not uniformly spaced")]
    NonUniformGrid,

    /// Background recomputation thread is gone.
    #[error("recomputation worker disconnected")]
    WorkerDisconnected,

    /// Solver-level failure outside the integration loop.
    #[error(transparent)]
    Solver(#[from] SolverError),
}
