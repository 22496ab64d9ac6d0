//! Run settings for the integrator and both scenarios.
//!
//! Defaults reproduce the reference runs. Every struct deserializes with
//! `#[serde(default)]`, so a partial description fills in the rest.

use serde::{Deserialize, Serialize};

use crate::solvers::SolverKind;
use crate::utils::constants::*;

/// How the integrator walks the output grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegrationStrategy {
    /// Explicit loop over output intervals, step size restarted per interval
    #[default]
    FixedGrid,
    /// One adaptive sweep over the whole time array, step size carried across samples
    Adaptive,
}

/// Adaptive integration settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorSettings {
    pub strategy: IntegrationStrategy,

    /// ODE solver type
    pub solver: SolverKind,

    /// Absolute tolerance for adaptive stepping
    pub atol: f64,

    /// Relative tolerance for adaptive stepping
    pub rtol: f64,

    /// Minimum time step
    pub dt_min: f64,

    /// Maximum time step (`None`: unbounded)
    pub dt_max: Option<f64>,

    /// Sub-step budget between two consecutive output samples
    pub max_substeps: usize,
}

impl IntegratorSettings {
    /// scipy `dopri5` defaults
    pub fn dopri5() -> Self {
        Self {
            strategy: IntegrationStrategy::FixedGrid,
            solver: SolverKind::DOPRI54,
            atol: SOL_TOLERANCE_LTE_ABS,
            rtol: SOL_TOLERANCE_LTE_REL,
            dt_min: SIM_TIMESTEP_MIN,
            dt_max: None,
            max_substeps: SIM_SUBSTEPS_MAX,
        }
    }

    /// One-shot sweep with the tolerances of scipy `odeint`
    pub fn lsoda() -> Self {
        Self {
            strategy: IntegrationStrategy::Adaptive,
            atol: SOL_TOLERANCE_LSODA,
            rtol: SOL_TOLERANCE_LSODA,
            ..Self::dopri5()
        }
    }

    pub fn with_strategy(mut self, strategy: IntegrationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_tolerances(mut self, atol: f64, rtol: f64) -> Self {
        self.atol = atol;
        self.rtol = rtol;
        self
    }
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self::dopri5()
    }
}

/// What the controller does with a value outside the parameter range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Refuse the update with `ParameterOutOfRange`
    #[default]
    Reject,
    /// Clamp into range and continue
    Clamp,
}

/// Fixed constants of the driven pendulum run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendulumConfig {
    pub t_start: f64,
    pub t_stop: f64,
    pub steps: usize,
    /// Damping `γ`
    pub damping: f64,
    /// Driving frequency `ω_d`
    pub drive_frequency: f64,
    /// Initial angle `φ0`
    pub phi0: f64,
    /// Initial angular velocity `ω0`
    pub omega0: f64,
    pub amplitude_min: f64,
    pub amplitude_max: f64,
    pub amplitude_default: f64,
    pub integrator: IntegratorSettings,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            t_start: PENDULUM_T_START,
            t_stop: PENDULUM_T_STOP,
            steps: PENDULUM_STEPS,
            damping: PENDULUM_DAMPING,
            drive_frequency: PENDULUM_DRIVE_FREQUENCY,
            phi0: 0.0,
            omega0: 0.0,
            amplitude_min: PENDULUM_AMPLITUDE_MIN,
            amplitude_max: PENDULUM_AMPLITUDE_MAX,
            amplitude_default: PENDULUM_AMPLITUDE_DEFAULT,
            integrator: IntegratorSettings::dopri5(),
        }
    }
}

/// Fixed constants of the double-well run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleWellConfig {
    /// Well shape `a`
    pub a: f64,
    pub t_start: f64,
    pub t_stop: f64,
    pub samples: usize,
    pub energy_max: f64,
    /// Default energy as a fraction of `-a⁴`
    pub energy_default_fraction: f64,
    pub curve_x_min: f64,
    pub curve_x_max: f64,
    pub curve_points: usize,
    pub integrator: IntegratorSettings,
}

impl DoubleWellConfig {
    /// Lower bound of the energy slider, `-a⁴`
    pub fn energy_min(&self) -> f64 {
        -self.a.powi(4)
    }

    pub fn energy_default(&self) -> f64 {
        self.energy_default_fraction * self.energy_min()
    }
}

impl Default for DoubleWellConfig {
    fn default() -> Self {
        Self {
            a: WELL_SHAPE,
            t_start: WELL_T_START,
            t_stop: WELL_T_STOP,
            samples: WELL_SAMPLES,
            energy_max: WELL_ENERGY_MAX,
            energy_default_fraction: WELL_ENERGY_DEFAULT_FRACTION,
            curve_x_min: WELL_CURVE_X_MIN,
            curve_x_max: WELL_CURVE_X_MAX,
            curve_points: WELL_CURVE_POINTS,
            integrator: IntegratorSettings::lsoda(),
        }
    }
}
