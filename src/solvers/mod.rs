//! Numerical integration solvers
//!
//! Explicit Runge-Kutta methods sharing one stage-wise stepper:
//! - Adaptive embedded pairs (DOPRI54, RKBS32, RKF45)
//! - Fixed-step classic RK4
//!
//! Each step is `buffer()`, then `stages()` calls to `step()`; adaptive
//! methods report an error norm and a timestep scale on the last stage.

mod base;
mod runge_kutta;
pub mod tableau;

pub use base::*;
pub use runge_kutta::ExplicitRungeKutta;
pub use tableau::Tableau;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Available ODE solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverKind {
    /// Dormand-Prince 5(4)
    #[default]
    DOPRI54,
    /// Bogacki-Shampine 3(2)
    RKBS32,
    /// Runge-Kutta-Fehlberg 4(5)
    RKF45,
    /// Classical RK4 (fixed step)
    RK4,
}

impl SolverKind {
    pub fn tableau(&self) -> &'static Tableau {
        match self {
            SolverKind::DOPRI54 => &tableau::DOPRI54,
            SolverKind::RKBS32 => &tableau::RKBS32,
            SolverKind::RKF45 => &tableau::RKF45,
            SolverKind::RK4 => &tableau::RK4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.tableau().name
    }

    /// Build a solver of this kind starting at `initial`
    pub fn build(&self, initial: DVector<f64>, tol_abs: f64, tol_rel: f64) -> ExplicitRungeKutta {
        ExplicitRungeKutta::new(self.tableau(), initial, tol_abs, tol_rel)
    }
}
