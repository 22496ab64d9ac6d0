//! Trajectory integration over a time grid
//!
//! Two strategies drive the same stage-wise solvers:
//!
//! - [`IntegrationStrategy::FixedGrid`]: an explicit loop over the output
//!   intervals. Each interval is integrated on its own (adaptive sub-steps
//!   when the solver supports them) and checked for success before the loop
//!   moves on.
//! - [`IntegrationStrategy::Adaptive`]: one sweep over an arbitrary ascending
//!   time array. The adaptive step size is carried from one output sample to
//!   the next, output times only clip the step that would overshoot them.
//!
//! Failures never panic and never discard work: the result is an
//! [`Integration`] holding every sample reached so far and the grid index
//! that could not be reached.

use tracing::{debug, warn};

use crate::config::{IntegrationStrategy, IntegratorSettings};
use crate::models::DerivativeModel;
use crate::solvers::{ExplicitRungeKutta, ExplicitSolver, Solver, SolverError, SolverStepResult};
use crate::state::{State, TimeGrid, Trajectory};
use crate::utils::constants::{SIM_TIME_EPSILON, SOL_SCALE_MIN};

/// Outcome of an integration
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationStatus {
    /// Every grid point was reached
    Complete,
    /// Grid point `index` at `time` could not be reached
    Failed {
        index: usize,
        time: f64,
        error: SolverError,
    },
}

/// Solver work counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegrationStats {
    pub accepted: usize,
    pub rejected: usize,
    pub evaluations: usize,
}

/// A trajectory together with how far the integration got
///
/// On failure the trajectory is truncated: it holds exactly the samples
/// before the failing grid index.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub trajectory: Trajectory,
    pub status: IntegrationStatus,
    pub stats: IntegrationStats,
}

impl Integration {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, IntegrationStatus::Complete)
    }

    /// Grid index at which the integration stopped, if it failed
    pub fn stopped_at(&self) -> Option<usize> {
        match self.status {
            IntegrationStatus::Complete => None,
            IntegrationStatus::Failed { index, .. } => Some(index),
        }
    }

    pub fn error(&self) -> Option<&SolverError> {
        match &self.status {
            IntegrationStatus::Complete => None,
            IntegrationStatus::Failed { error, .. } => Some(error),
        }
    }
}

/// Drives a solver from an initial state across a [`TimeGrid`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator {
    settings: IntegratorSettings,
}

impl Integrator {
    pub fn new(settings: IntegratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IntegratorSettings {
        &self.settings
    }

    /// Integrate with the configured strategy
    pub fn integrate<M: DerivativeModel>(&self, model: &M, initial: State, grid: &TimeGrid) -> Integration {
        match self.settings.strategy {
            IntegrationStrategy::FixedGrid => self.integrate_fixed_grid(model, initial, grid),
            IntegrationStrategy::Adaptive => self.integrate_adaptive(model, initial, grid),
        }
    }

    /// Explicit loop over output intervals, restarting the step size per interval
    pub fn integrate_fixed_grid<M: DerivativeModel>(
        &self,
        model: &M,
        initial: State,
        grid: &TimeGrid,
    ) -> Integration {
        self.run(model, initial, grid, |_dt, interval| interval)
    }

    /// One adaptive sweep over the whole time array
    pub fn integrate_adaptive<M: DerivativeModel>(
        &self,
        model: &M,
        initial: State,
        grid: &TimeGrid,
    ) -> Integration {
        self.run(model, initial, grid, |dt, _interval| dt)
    }

    /// Shared driver; `next_dt(carried, interval)` picks the first trial step
    /// of each output interval
    fn run<M, G>(&self, model: &M, initial: State, grid: &TimeGrid, next_dt: G) -> Integration
    where
        M: DerivativeModel,
        G: Fn(f64, f64) -> f64,
    {
        let times = grid.times();
        let mut trajectory = Trajectory::with_capacity(times.len());
        trajectory.push(times[0], initial);

        let mut stepper = Stepper::new(model, initial, &self.settings);
        let mut t = times[0];
        let mut dt = times.get(1).map_or(0.0, |t1| t1 - times[0]);
        let mut status = IntegrationStatus::Complete;

        for (index, &target) in times.iter().enumerate().skip(1) {
            dt = next_dt(dt, target - t);
            if let Err(error) = stepper.advance_to(&mut t, target, &mut dt) {
                warn!(
                    solver = self.settings.solver.as_str(),
                    index,
                    time = target,
                    %error,
                    "integration failed, keeping {} of {} samples",
                    trajectory.len(),
                    times.len()
                );
                status = IntegrationStatus::Failed {
                    index,
                    time: target,
                    error,
                };
                break;
            }
            trajectory.push(target, State::from_vector(stepper.solver.state()));
        }

        debug!(
            solver = self.settings.solver.as_str(),
            samples = trajectory.len(),
            accepted = stepper.stats.accepted,
            rejected = stepper.stats.rejected,
            evaluations = stepper.stats.evaluations,
            "integration finished"
        );

        Integration {
            trajectory,
            status,
            stats: stepper.stats,
        }
    }
}

/// Solver plus the sub-step loop between output samples
struct Stepper<'a, M> {
    model: &'a M,
    solver: ExplicitRungeKutta,
    settings: &'a IntegratorSettings,
    stats: IntegrationStats,
}

impl<'a, M: DerivativeModel> Stepper<'a, M> {
    fn new(model: &'a M, initial: State, settings: &'a IntegratorSettings) -> Self {
        Self {
            model,
            solver: settings
                .solver
                .build(initial.to_vector(), settings.atol, settings.rtol),
            settings,
            stats: IntegrationStats::default(),
        }
    }

    /// Advance from `*t` to exactly `target`, updating the proposed step `*dt`
    fn advance_to(&mut self, t: &mut f64, target: f64, dt: &mut f64) -> Result<(), SolverError> {
        let settings = self.settings;
        let reached = SIM_TIME_EPSILON * target.abs().max(1.0);
        let mut substeps = 0;

        if let Some(dt_max) = settings.dt_max {
            *dt = dt.min(dt_max);
        }

        while target - *t > reached {
            if substeps >= settings.max_substeps {
                return Err(SolverError::TooManySteps {
                    max_substeps: settings.max_substeps,
                    target,
                });
            }
            if *dt < settings.dt_min {
                return Err(SolverError::TimestepTooSmall {
                    dt: *dt,
                    dt_min: settings.dt_min,
                });
            }
            substeps += 1;

            let t0 = *t;
            let clipped = *dt >= target - t0;
            let h = if clipped { target - t0 } else { *dt };

            let result = self.full_step(t0, h);
            let finite = self.solver.is_finite();

            if result.success && finite {
                self.stats.accepted += 1;
                *t = if clipped { target } else { t0 + h };
                if let Some(scale) = result.scale {
                    let proposed = h * scale;
                    *dt = if clipped { dt.max(proposed) } else { proposed };
                    if let Some(dt_max) = settings.dt_max {
                        *dt = dt.min(dt_max);
                    }
                }
            } else if !self.solver.is_adaptive() {
                return Err(SolverError::NonFiniteState { time: t0 + h });
            } else {
                self.stats.rejected += 1;
                self.solver.revert()?;
                let scale = result.scale.filter(|s| s.is_finite()).unwrap_or(SOL_SCALE_MIN);
                *dt = h * scale.min(1.0);
            }
        }

        *t = target;
        Ok(())
    }

    fn full_step(&mut self, t0: f64, h: f64) -> SolverStepResult {
        let model = self.model;
        self.stats.evaluations += self.solver.stages();
        self.solver
            .full_step(|x, tau| model.derivative_vector(x, t0 + tau), h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoubleWell, DrivenPendulum};
    use crate::solvers::SolverKind;
    use approx::assert_relative_eq;

    /// x' = x², x(0) = 1 blows up at t = 1
    struct Blowup;

    impl DerivativeModel for Blowup {
        fn derivative(&self, x: &State, _t: f64) -> State {
            State::new(x.position * x.position, 0.0)
        }
    }

    /// Simple harmonic oscillator x'' = -x
    struct Harmonic;

    impl DerivativeModel for Harmonic {
        fn derivative(&self, x: &State, _t: f64) -> State {
            State::new(x.velocity, -x.position)
        }
    }

    #[test]
    fn test_fixed_grid_harmonic_accuracy() {
        let grid = TimeGrid::fixed_step(0.0, 10.0, 100).unwrap();
        let integration = Integrator::default().integrate_fixed_grid(&Harmonic, State::new(1.0, 0.0), &grid);

        assert!(integration.is_complete());
        assert_eq!(integration.trajectory.len(), 100);
        for (&t, s) in integration.trajectory.times().iter().zip(integration.trajectory.states()) {
            assert_relative_eq!(s.position, t.cos(), epsilon = 1e-5);
            assert_relative_eq!(s.velocity, -t.sin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_adaptive_harmonic_accuracy_on_irregular_grid() {
        let grid = TimeGrid::from_times(vec![0.0, 0.01, 0.5, 0.51, 3.0, 7.25, 7.3, 12.0]).unwrap();
        let integration = Integrator::new(IntegratorSettings::lsoda())
            .integrate_adaptive(&Harmonic, State::new(0.0, 1.0), &grid);

        assert!(integration.is_complete());
        let traj = &integration.trajectory;
        assert_eq!(traj.times(), grid.times());
        for (&t, s) in traj.times().iter().zip(traj.states()) {
            assert_relative_eq!(s.position, t.sin(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_initial_sample_is_initial_condition() {
        let grid = TimeGrid::fixed_step(0.0, 250.0, 2000).unwrap();
        let integration = Integrator::default().integrate(&DrivenPendulum::default(), State::new(0.0, 0.0), &grid);
        assert_eq!(integration.trajectory.first(), Some(&State::new(0.0, 0.0)));
        assert_eq!(integration.trajectory.len(), grid.len());
    }

    #[test]
    fn test_runs_are_bit_identical() {
        let grid = TimeGrid::linspace(0.0, 5.0, 500).unwrap();
        let integrator = Integrator::new(IntegratorSettings::lsoda());
        let model = DoubleWell::new(2.0);
        let a = integrator.integrate(&model, State::new(-2.0, 3.0), &grid);
        let b = integrator.integrate(&model, State::new(-2.0, 3.0), &grid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blowup_truncates_trajectory() {
        let grid = TimeGrid::fixed_step(0.0, 2.0, 20).unwrap();
        for strategy in [IntegrationStrategy::FixedGrid, IntegrationStrategy::Adaptive] {
            let settings = IntegratorSettings::default().with_strategy(strategy);
            let integration = Integrator::new(settings).integrate(&Blowup, State::new(1.0, 0.0), &grid);

            assert!(!integration.is_complete(), "{strategy:?}");
            let index = integration.stopped_at().unwrap();
            assert_eq!(integration.trajectory.len(), index);
            assert!((1..=10).contains(&index), "{strategy:?} stopped at {index}");
            assert!(integration.trajectory.times().iter().all(|&t| t < 1.0));
            assert!(integration.trajectory.states().iter().all(State::is_finite));
            assert!(integration.error().is_some());
        }
    }

    #[test]
    fn test_substep_budget_exhaustion() {
        let grid = TimeGrid::from_times(vec![0.0, 10.0]).unwrap();
        let settings = IntegratorSettings {
            max_substeps: 3,
            dt_max: Some(0.1),
            ..IntegratorSettings::default()
        };
        let integration = Integrator::new(settings).integrate(&Harmonic, State::new(1.0, 0.0), &grid);

        assert_eq!(integration.stopped_at(), Some(1));
        assert_eq!(integration.trajectory.len(), 1);
        assert!(matches!(
            integration.error(),
            Some(SolverError::TooManySteps { max_substeps: 3, .. })
        ));
    }

    #[test]
    fn test_fixed_step_solver_takes_one_step_per_interval() {
        let grid = TimeGrid::fixed_step(0.0, 1.0, 10).unwrap();
        let settings = IntegratorSettings::default().with_solver(SolverKind::RK4);
        let integration = Integrator::new(settings).integrate(&Harmonic, State::new(1.0, 0.0), &grid);

        assert!(integration.is_complete());
        assert_eq!(integration.stats.accepted, 9);
        assert_eq!(integration.stats.rejected, 0);
        assert_eq!(integration.stats.evaluations, 36);
    }

    #[test]
    fn test_single_point_grid() {
        let grid = TimeGrid::from_times(vec![3.0]).unwrap();
        let integration = Integrator::default().integrate(&Harmonic, State::new(0.5, 0.0), &grid);
        assert!(integration.is_complete());
        assert_eq!(integration.trajectory.times(), &[3.0]);
    }
}
