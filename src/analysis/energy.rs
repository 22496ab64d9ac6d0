//! Energy decomposition and energy-matched initial conditions

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::models::DoubleWell;
use crate::state::{State, Trajectory};

/// Start in the left minimum `x = -a`, moving right with the speed that gives
/// total energy `energy`
///
/// `v = sqrt(2 (E - V(-a)))`. Energies below the floor `V(-a) = -a⁴` (and NaN)
/// are rejected instead of producing a NaN velocity.
pub fn starting_state(model: &DoubleWell, energy: f64) -> SimResult<State> {
    let x = model.minima().0;
    let floor = model.potential(x);
    // also rejects NaN
    if !(energy >= floor) {
        return Err(SimError::Domain { energy, floor });
    }
    Ok(State::new(x, (2.0 * (energy - floor)).sqrt()))
}

/// Kinetic, potential and total energy along a trajectory
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergySeries {
    pub kinetic: Vec<f64>,
    pub potential: Vec<f64>,
    pub total: Vec<f64>,
}

impl EnergySeries {
    pub fn len(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Largest deviation of the total energy from its initial value
    ///
    /// The flow conserves energy exactly, so any drift is integration error.
    pub fn max_drift(&self) -> f64 {
        match self.total.first() {
            Some(&e0) => self.total.iter().map(|e| (e - e0).abs()).fold(0.0, f64::max),
            None => 0.0,
        }
    }
}

/// Elementwise `T = v²/2`, `V = x⁴ - 2a²x²`, `E = T + V`
pub fn energies(model: &DoubleWell, trajectory: &Trajectory) -> EnergySeries {
    let n = trajectory.len();
    let mut series = EnergySeries {
        kinetic: Vec::with_capacity(n),
        potential: Vec::with_capacity(n),
        total: Vec::with_capacity(n),
    };
    for s in trajectory.states() {
        let t = model.kinetic(s.velocity);
        let v = model.potential(s.position);
        series.kinetic.push(t);
        series.potential.push(v);
        series.total.push(t + v);
    }
    series
}
