//! Explicit Runge-Kutta stepper driven by a Butcher tableau

use nalgebra::DVector;
use std::collections::VecDeque;

use super::tableau::Tableau;
use super::{ExplicitSolver, Solver, SolverError, SolverStepResult};
use crate::utils::constants::{SOL_BETA, SOL_ERROR_FLOOR, SOL_SCALE_MAX, SOL_SCALE_MIN};

/// Explicit Runge-Kutta solver for any [`Tableau`]
///
/// Stages are evaluated one call at a time. For adaptive tableaus the last
/// stage compares the propagated and embedded solutions and reports a
/// scaled error norm together with a timestep scale factor; the caller
/// decides whether to accept the step or `revert()` and retry.
#[derive(Debug, Clone)]
pub struct ExplicitRungeKutta {
    tableau: &'static Tableau,
    state: DVector<f64>,
    initial: DVector<f64>,
    history: VecDeque<DVector<f64>>,
    slopes: Vec<DVector<f64>>,
    stage: usize,
    tol_abs: f64,
    tol_rel: f64,
    beta: f64,
}

impl ExplicitRungeKutta {
    /// Create a solver with the given tableau and error tolerances
    ///
    /// # Arguments
    /// * `tableau` - Method coefficients
    /// * `initial` - Initial state vector
    /// * `tol_abs` - Absolute error tolerance
    /// * `tol_rel` - Relative error tolerance
    pub fn new(tableau: &'static Tableau, initial: DVector<f64>, tol_abs: f64, tol_rel: f64) -> Self {
        let n = initial.len();
        Self {
            tableau,
            state: initial.clone(),
            initial,
            history: VecDeque::with_capacity(2),
            slopes: vec![DVector::zeros(n); tableau.stages()],
            stage: 0,
            tol_abs,
            tol_rel,
            beta: SOL_BETA,
        }
    }

    pub fn tableau(&self) -> &'static Tableau {
        self.tableau
    }

    /// Scaled max-norm of the local error and the matching timestep scale
    fn error_controller(&self, weights: &[f64], dt: f64) -> SolverStepResult {
        let error_slope = weighted_sum(weights, &self.slopes);

        let scale = self.state.map(|x| self.tol_abs + self.tol_rel * x.abs());
        let scaled_error = (dt * error_slope).component_div(&scale).map(|e| e.abs());

        // A NaN would slip through `max`, so treat any non-finite entry as total failure
        let error_norm = if scaled_error.iter().all(|e| e.is_finite()) {
            scaled_error.max().max(SOL_ERROR_FLOOR)
        } else {
            f64::INFINITY
        };

        let exponent = 1.0 / (self.tableau.error_order as f64 + 1.0);
        let timestep_scale = (self.beta / error_norm.powf(exponent)).clamp(SOL_SCALE_MIN, SOL_SCALE_MAX);

        SolverStepResult {
            success: error_norm <= 1.0,
            error_norm,
            scale: Some(timestep_scale),
        }
    }
}

fn weighted_sum(weights: &[f64], slopes: &[DVector<f64>]) -> DVector<f64> {
    let mut sum = DVector::zeros(slopes[0].len());
    for (&w, k) in weights.iter().zip(slopes) {
        if w != 0.0 {
            sum += w * k;
        }
    }
    sum
}

impl Solver for ExplicitRungeKutta {
    fn state(&self) -> &DVector<f64> {
        &self.state
    }

    fn buffer(&mut self, _dt: f64) {
        if self.history.len() >= 2 {
            self.history.pop_back();
        }
        self.history.push_front(self.state.clone());
        self.stage = 0;
    }

    fn revert(&mut self) -> Result<(), SolverError> {
        self.state = self.history.pop_front().ok_or(SolverError::EmptyHistory)?;
        self.stage = 0;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.history.clear();
        self.stage = 0;
    }

    fn order(&self) -> usize {
        self.tableau.order
    }

    fn stages(&self) -> usize {
        self.tableau.stages()
    }

    fn is_adaptive(&self) -> bool {
        self.tableau.is_adaptive()
    }
}

impl ExplicitSolver for ExplicitRungeKutta {
    fn step<F>(&mut self, mut f: F, dt: f64) -> SolverStepResult
    where
        F: FnMut(&DVector<f64>, f64) -> DVector<f64>,
    {
        let tab = self.tableau;
        let x0 = self
            .history
            .front()
            .expect("Must call buffer() before step()");

        self.slopes[self.stage] = f(&self.state, tab.c[self.stage] * dt);

        if self.stage + 1 < tab.stages() {
            self.state = x0 + dt * weighted_sum(tab.a[self.stage], &self.slopes);
            self.stage += 1;
            return SolverStepResult::default();
        }

        self.state = x0 + dt * weighted_sum(tab.b, &self.slopes);
        self.stage = 0;

        match tab.error {
            Some(weights) => self.error_controller(weights, dt),
            None => SolverStepResult::default(),
        }
    }
}
