//! The two interactive runs: driven pendulum and double well
//!
//! A scenario owns the fixed run constants and turns one value of its
//! adjustable parameter into a complete, immutable frame. Nothing here keeps
//! state between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{compute_spectrum, energies, starting_state, EnergySeries, Spectrum};
use crate::config::{DoubleWellConfig, PendulumConfig};
use crate::error::SimResult;
use crate::integrator::{Integration, Integrator};
use crate::models::{DoubleWell, DrivenPendulum};
use crate::state::{State, TimeGrid};

/// Closed interval of valid parameter values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Computed output of one scenario run
pub trait Frame {
    /// The trajectory and whether it covers the whole grid
    fn integration(&self) -> &Integration;
}

/// A run driven by one scalar parameter
pub trait Scenario {
    type Frame: Frame;

    /// Name of the adjustable parameter
    fn parameter(&self) -> &'static str;

    fn range(&self) -> ParameterRange;

    fn default_value(&self) -> f64;

    /// Full recomputation for `value`, which the caller has already range-checked
    fn compute(&self, value: f64) -> SimResult<Self::Frame>;
}

/// Pendulum trajectory for one driving amplitude
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumFrame {
    pub model: DrivenPendulum,
    pub integration: Integration,
}

impl Frame for PendulumFrame {
    fn integration(&self) -> &Integration {
        &self.integration
    }
}

/// Damped driven pendulum with adjustable amplitude `A`
#[derive(Debug, Clone)]
pub struct PendulumScenario {
    config: PendulumConfig,
    grid: TimeGrid,
}

impl PendulumScenario {
    pub fn new(config: PendulumConfig) -> SimResult<Self> {
        let grid = TimeGrid::fixed_step(config.t_start, config.t_stop, config.steps)?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn model(&self, amplitude: f64) -> DrivenPendulum {
        DrivenPendulum::new(amplitude, self.config.damping, self.config.drive_frequency)
    }
}

impl Scenario for PendulumScenario {
    type Frame = PendulumFrame;

    fn parameter(&self) -> &'static str {
        "A"
    }

    fn range(&self) -> ParameterRange {
        ParameterRange::new(self.config.amplitude_min, self.config.amplitude_max)
    }

    fn default_value(&self) -> f64 {
        self.config.amplitude_default
    }

    fn compute(&self, amplitude: f64) -> SimResult<PendulumFrame> {
        let model = self.model(amplitude);
        let initial = State::new(self.config.phi0, self.config.omega0);
        let integration = Integrator::new(self.config.integrator).integrate(&model, initial, &self.grid);
        Ok(PendulumFrame { model, integration })
    }
}

/// Double-well trajectory and its diagnostics for one total energy
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleWellFrame {
    pub model: DoubleWell,
    /// Requested total energy
    pub energy: f64,
    pub initial: State,
    pub integration: Integration,
    pub energies: EnergySeries,
    /// Present only when the integration covered the whole grid
    pub spectrum: Option<Spectrum>,
    /// `(x, V(x))` samples for the potential plot
    pub potential_curve: Vec<(f64, f64)>,
    /// Small-oscillation angular frequency, reference line of the spectrum plot
    pub harmonic_frequency: f64,
}

impl Frame for DoubleWellFrame {
    fn integration(&self) -> &Integration {
        &self.integration
    }
}

/// Particle in the double well with adjustable total energy `E`
#[derive(Debug, Clone)]
pub struct DoubleWellScenario {
    config: DoubleWellConfig,
    model: DoubleWell,
    grid: TimeGrid,
    potential_curve: Vec<(f64, f64)>,
}

impl DoubleWellScenario {
    pub fn new(config: DoubleWellConfig) -> SimResult<Self> {
        let grid = TimeGrid::linspace(config.t_start, config.t_stop, config.samples)?;
        let model = DoubleWell::new(config.a);
        let potential_curve = model.potential_curve(config.curve_x_min, config.curve_x_max, config.curve_points);
        Ok(Self {
            config,
            model,
            grid,
            potential_curve,
        })
    }

    pub fn config(&self) -> &DoubleWellConfig {
        &self.config
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn model(&self) -> &DoubleWell {
        &self.model
    }
}

impl Scenario for DoubleWellScenario {
    type Frame = DoubleWellFrame;

    fn parameter(&self) -> &'static str {
        "E"
    }

    fn range(&self) -> ParameterRange {
        ParameterRange::new(self.config.energy_min(), self.config.energy_max)
    }

    fn default_value(&self) -> f64 {
        self.config.energy_default()
    }

    fn compute(&self, energy: f64) -> SimResult<DoubleWellFrame> {
        let initial = starting_state(&self.model, energy)?;
        let integration = Integrator::new(self.config.integrator).integrate(&self.model, initial, &self.grid);
        let energies = energies(&self.model, &integration.trajectory);

        let spectrum = if integration.is_complete() {
            Some(compute_spectrum(&integration.trajectory, &self.grid)?.normalized())
        } else {
            None
        };

        debug!(
            energy,
            v0 = initial.velocity,
            drift = energies.max_drift(),
            "double well recomputed"
        );

        Ok(DoubleWellFrame {
            model: self.model,
            energy,
            initial,
            integration,
            energies,
            spectrum,
            potential_curve: self.potential_curve.clone(),
            harmonic_frequency: self.model.harmonic_frequency(),
        })
    }
}
