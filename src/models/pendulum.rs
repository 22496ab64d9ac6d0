//! Damped, sinusoidally driven pendulum

use serde::{Deserialize, Serialize};

use super::DerivativeModel;
use crate::state::State;
use crate::utils::constants::{
    PENDULUM_AMPLITUDE_DEFAULT, PENDULUM_DAMPING, PENDULUM_DRIVE_FREQUENCY,
};

/// Driven pendulum: `φ'' = -sin φ - 2γ φ' + A sin(ω_d t)`
///
/// State is `(φ, ω)`. The forcing makes the system non-autonomous, so the
/// time argument matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivenPendulum {
    /// Driving amplitude `A`
    pub amplitude: f64,
    /// Damping coefficient `γ`
    pub damping: f64,
    /// Driving angular frequency `ω_d`
    pub drive_frequency: f64,
}

impl DrivenPendulum {
    pub fn new(amplitude: f64, damping: f64, drive_frequency: f64) -> Self {
        Self {
            amplitude,
            damping,
            drive_frequency,
        }
    }

    /// Energy of the undriven pendulum per unit `m l^2`: `ω²/2 + 1 - cos φ`
    pub fn energy(&self, x: &State) -> f64 {
        0.5 * x.velocity * x.velocity + 1.0 - x.position.cos()
    }
}

impl Default for DrivenPendulum {
    fn default() -> Self {
        Self::new(
            PENDULUM_AMPLITUDE_DEFAULT,
            PENDULUM_DAMPING,
            PENDULUM_DRIVE_FREQUENCY,
        )
    }
}

impl DerivativeModel for DrivenPendulum {
    #[inline]
    fn derivative(&self, x: &State, t: f64) -> State {
        State::new(
            x.velocity,
            -x.position.sin() - 2.0 * self.damping * x.velocity
                + self.amplitude * (self.drive_frequency * t).sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rest_is_equilibrium_without_drive() {
        let model = DrivenPendulum::new(0.0, 0.25, 2.0 / 3.0);
        for &t in &[0.0, 1.3, 100.0] {
            assert_eq!(model.derivative(&State::new(0.0, 0.0), t), State::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_right_hand_side() {
        let model = DrivenPendulum::new(1.5, 0.25, 2.0 / 3.0);
        let x = State::new(0.3, -0.7);
        let t = 2.1;
        let dx = model.derivative(&x, t);

        assert_eq!(dx.position, -0.7);
        assert_relative_eq!(
            dx.velocity,
            -(0.3f64).sin() + 0.5 * 0.7 + 1.5 * (2.0 / 3.0 * 2.1f64).sin(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_forcing_depends_on_time() {
        let model = DrivenPendulum::default();
        let x = State::new(0.0, 0.0);
        let a = model.derivative(&x, 0.0);
        let b = model.derivative(&x, std::f64::consts::PI * 0.75);
        assert_eq!(a.velocity, 0.0);
        assert_relative_eq!(b.velocity, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_vector_form_matches() {
        let model = DrivenPendulum::default();
        let x = State::new(1.0, 0.5);
        let v = model.derivative_vector(&x.to_vector(), 3.0);
        assert_eq!(State::from_vector(&v), model.derivative(&x, 3.0));
    }
}
