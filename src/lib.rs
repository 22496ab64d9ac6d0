//! phasesim - Driven pendulum and double-well oscillator
//!
//! Integrates two one-degree-of-freedom oscillators over fixed time grids and
//! derives what an interactive viewer plots: phase portraits, time series,
//! energy components and the Fourier spectrum of the position.
//!
//! # Architecture
//!
//! - `models`: equations of motion as pure [`DerivativeModel`] values
//! - `solvers`: explicit Runge-Kutta steppers driven by Butcher tableaus
//! - `integrator`: walks an output grid with adaptive sub-stepping and
//!   reports partial failure instead of losing the trajectory
//! - `analysis`: energies and spectra of a finished trajectory
//! - `scenario` / `controller`: one scalar parameter in, one immutable frame
//!   out, committed and redrawn only when computation succeeds
//!
//! # Example
//!
//! ```rust,ignore
//! use phasesim::prelude::*;
//!
//! let well = DoubleWellScenario::new(DoubleWellConfig::default())?;
//! let frame = well.compute(-15.2)?;
//! assert!(frame.integration.is_complete());
//! ```

pub mod analysis;
pub mod config;
pub mod controller;
pub mod error;
pub mod integrator;
pub mod models;
pub mod scenario;
pub mod solvers;
pub mod state;
pub mod utils;
pub mod worker;

pub use error::{SimError, SimResult};
pub use integrator::{Integration, IntegrationStatus, Integrator};
pub use models::DerivativeModel;
pub use state::{State, TimeGrid, Trajectory};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::*;
    pub use crate::config::*;
    pub use crate::controller::{ParameterController, Presentation, Update};
    pub use crate::error::{SimError, SimResult};
    pub use crate::integrator::*;
    pub use crate::models::*;
    pub use crate::scenario::*;
    pub use crate::solvers::{SolverError, SolverKind};
    pub use crate::state::*;
    pub use crate::worker::{Outcome, Recomputer};
}
