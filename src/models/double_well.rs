//! Particle in the symmetric double-well potential `V(x) = x⁴ - 2a²x²`

use serde::{Deserialize, Serialize};

use super::DerivativeModel;
use crate::utils::constants::WELL_SHAPE;
use crate::state::State;

/// Unit-mass particle in `V(x) = x⁴ - 2a²x²`
///
/// Minima sit at `x = ±a` with `V(±a) = -a⁴`, the barrier at `x = 0` has
/// `V(0) = 0`. The force is `-dV/dx = -4x(x² - a²)`; the system is
/// autonomous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleWell {
    /// Shape parameter `a`
    pub a: f64,
}

impl DoubleWell {
    pub fn new(a: f64) -> Self {
        Self { a }
    }

    /// Potential energy `V(x)`
    #[inline]
    pub fn potential(&self, x: f64) -> f64 {
        x.powi(4) - 2.0 * self.a * self.a * x * x
    }

    /// Kinetic energy `v²/2` (unit mass)
    #[inline]
    pub fn kinetic(&self, v: f64) -> f64 {
        0.5 * v * v
    }

    /// Total energy of a state
    pub fn energy(&self, x: &State) -> f64 {
        self.kinetic(x.velocity) + self.potential(x.position)
    }

    /// Positions of the two minima `(-a, a)`
    pub fn minima(&self) -> (f64, f64) {
        (-self.a, self.a)
    }

    /// `V(±a) = -a⁴`, the lowest reachable energy
    pub fn potential_floor(&self) -> f64 {
        self.potential(-self.a)
    }

    /// Angular frequency of small oscillations about a minimum, `sqrt(V''(±a)) = sqrt(8a²)`
    pub fn harmonic_frequency(&self) -> f64 {
        (8.0 * self.a * self.a).sqrt()
    }

    /// `n` samples of `(x, V(x))` with `x` evenly spaced over `[x_min, x_max]`
    pub fn potential_curve(&self, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
        match n {
            0 => Vec::new(),
            1 => vec![(x_min, self.potential(x_min))],
            _ => {
                let dx = (x_max - x_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = x_min + i as f64 * dx;
                        (x, self.potential(x))
                    })
                    .collect()
            }
        }
    }
}

impl Default for DoubleWell {
    fn default() -> Self {
        Self::new(WELL_SHAPE)
    }
}

impl DerivativeModel for DoubleWell {
    #[inline]
    fn derivative(&self, x: &State, _t: f64) -> State {
        let p = x.position;
        State::new(x.velocity, -4.0 * p * (p * p - self.a * self.a))
    }
}
