//! State vectors, time grids and trajectories

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::utils::constants::GRID_UNIFORM_TOLERANCE;

/// Instantaneous `(position, velocity)` pair of a one-dimensional oscillator
///
/// For the pendulum this is `(angle, angular velocity)`, for the double well
/// `(x, v)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

impl State {
    pub const fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Both components are finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Pack into the solver's state vector
    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.position, self.velocity])
    }

    /// Unpack from a solver state vector of length 2
    pub fn from_vector(x: &DVector<f64>) -> Self {
        Self::new(x[0], x[1])
    }
}

impl From<(f64, f64)> for State {
    fn from((position, velocity): (f64, f64)) -> Self {
        Self::new(position, velocity)
    }
}

/// Ascending sample times of an integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// `steps` samples spaced `(stop - start) / steps` apart, starting at
    /// `start`. The stop time itself is not sampled.
    pub fn fixed_step(start: f64, stop: f64, steps: usize) -> SimResult<Self> {
        if steps == 0 {
            return Err(SimError::InvalidTimeGrid("zero steps".into()));
        }
        let dt = (stop - start) / steps as f64;
        Self::from_times((0..steps).map(|i| start + i as f64 * dt).collect())
    }

    /// `n` evenly spaced samples including both endpoints
    pub fn linspace(start: f64, stop: f64, n: usize) -> SimResult<Self> {
        let times = match n {
            0 => return Err(SimError::InvalidTimeGrid("zero samples".into())),
            1 => vec![start],
            _ => {
                let dt = (stop - start) / (n - 1) as f64;
                let mut times: Vec<f64> = (0..n).map(|i| start + i as f64 * dt).collect();
                times[n - 1] = stop;
                times
            }
        };
        Self::from_times(times)
    }

    /// Explicit array of times; must be non-empty, finite and strictly ascending
    pub fn from_times(times: Vec<f64>) -> SimResult<Self> {
        if times.is_empty() {
            return Err(SimError::InvalidTimeGrid("no samples".into()));
        }
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(SimError::InvalidTimeGrid(format!("non-finite time {t}")));
        }
        if let Some(w) = times.windows(2).find(|w| w[1] <= w[0]) {
            return Err(SimError::InvalidTimeGrid(format!(
                "times not strictly ascending at {} -> {}",
                w[0], w[1]
            )));
        }
        Ok(Self { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.times[0]
    }

    pub fn end(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Common spacing if all gaps agree within a relative tolerance
    pub fn uniform_step(&self) -> Option<f64> {
        if self.times.len() < 2 {
            return None;
        }
        let dt = (self.end() - self.start()) / (self.times.len() - 1) as f64;
        let uniform = self
            .times
            .windows(2)
            .all(|w| ((w[1] - w[0]) - dt).abs() <= GRID_UNIFORM_TOLERANCE * dt.abs());
        uniform.then_some(dt)
    }
}

/// Time-ordered sequence of states
///
/// `times.len() == states.len()` always holds; the first state is the initial
/// condition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<State>,
}

impl Trajectory {
    /// Empty trajectory with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, t: f64, state: State) {
        self.times.push(t);
        self.states.push(state);
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// Position component of every sample
    pub fn positions(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.position).collect()
    }

    /// Velocity component of every sample
    pub fn velocities(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.velocity).collect()
    }

    /// `(position, velocity)` pairs for a phase portrait
    pub fn phase_portrait(&self) -> Vec<(f64, f64)> {
        self.states.iter().map(|s| (s.position, s.velocity)).collect()
    }

    /// `(time, position)` pairs for a time-series plot
    pub fn position_series(&self) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(&self.states)
            .map(|(&t, s)| (t, s.position))
            .collect()
    }
}
