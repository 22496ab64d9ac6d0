//! Equations of motion
//!
//! A [`DerivativeModel`] is the right-hand side of `dx/dt = f(x, t)` for a
//! `(position, velocity)` state. Models are plain values; parameters travel
//! with the model instead of living in shared mutable state.

mod double_well;
mod pendulum;

pub use double_well::DoubleWell;
pub use pendulum::DrivenPendulum;

use nalgebra::DVector;

use crate::state::State;

/// Right-hand side of a second-order ODE written as a first-order system
///
/// Implementations must be pure: the integrator calls `derivative` many
/// times per step, at trial states that are later discarded.
pub trait DerivativeModel: Send + Sync {
    /// `dx/dt` at state `x` and time `t`
    fn derivative(&self, x: &State, t: f64) -> State;

    /// Vector form used by the solvers
    fn derivative_vector(&self, x: &DVector<f64>, t: f64) -> DVector<f64> {
        self.derivative(&State::from_vector(x), t).to_vector()
    }
}

impl<M: DerivativeModel + ?Sized> DerivativeModel for &M {
    fn derivative(&self, x: &State, t: f64) -> State {
        (**self).derivative(x, t)
    }
}
