//! Parameter changes from the UI, recomputation and redraw requests
//!
//! The controller is the only place that mutates the active parameter. A new
//! value is validated, the full frame is computed for it, and only then are
//! the value and frame committed and handed to the presentation. A rejected
//! value leaves both the committed parameter and the display untouched.

use tracing::{info, warn};

use crate::config::RangePolicy;
use crate::error::{SimError, SimResult};
use crate::scenario::{Frame, Scenario};

/// Consumer of computed frames (plot axes, terminal, test recorder)
pub trait Presentation<F> {
    /// Replace whatever is shown with `frame`
    fn redraw(&mut self, frame: &F);
}

/// What happened to an accepted parameter change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    /// Value committed and the full grid integrated
    Complete { value: f64 },
    /// Value committed but the integration stopped at grid index `stopped_at`
    Partial { value: f64, stopped_at: usize },
}

impl Update {
    pub fn value(&self) -> f64 {
        match *self {
            Update::Complete { value } | Update::Partial { value, .. } => value,
        }
    }
}

/// Binds one scenario's parameter to a presentation
pub struct ParameterController<S: Scenario, P> {
    scenario: S,
    presentation: P,
    policy: RangePolicy,
    value: f64,
    frame: Option<S::Frame>,
}

impl<S, P> ParameterController<S, P>
where
    S: Scenario,
    P: Presentation<S::Frame>,
{
    pub fn new(scenario: S, presentation: P, policy: RangePolicy) -> Self {
        let value = scenario.default_value();
        Self {
            scenario,
            presentation,
            policy,
            value,
            frame: None,
        }
    }

    /// Compute and draw the default value
    pub fn initialize(&mut self) -> SimResult<Update> {
        let value = self.scenario.default_value();
        self.set_parameter(value)
    }

    /// Handle a parameter change event
    pub fn set_parameter(&mut self, requested: f64) -> SimResult<Update> {
        let name = self.scenario.parameter();
        let value = self.validate(requested)?;

        info!(parameter = name, value, "recomputing");
        let frame = match self.scenario.compute(value) {
            Ok(frame) => frame,
            Err(error) => {
                warn!(parameter = name, value, %error, "update rejected");
                return Err(error);
            }
        };

        let update = match frame.integration().stopped_at() {
            None => Update::Complete { value },
            Some(stopped_at) => {
                warn!(
                    parameter = name,
                    value, stopped_at, "integration incomplete, showing partial trajectory"
                );
                Update::Partial { value, stopped_at }
            }
        };

        self.value = value;
        self.presentation.redraw(&frame);
        self.frame = Some(frame);
        info!(parameter = name, value, "redraw requested");

        Ok(update)
    }

    fn validate(&self, value: f64) -> SimResult<f64> {
        let range = self.scenario.range();
        if range.contains(value) {
            return Ok(value);
        }
        let rejected = SimError::ParameterOutOfRange {
            name: self.scenario.parameter(),
            value,
            min: range.min,
            max: range.max,
        };
        match self.policy {
            RangePolicy::Clamp if !value.is_nan() => {
                let clamped = range.clamp(value);
                warn!(parameter = self.scenario.parameter(), value, clamped, "value clamped into range");
                Ok(clamped)
            }
            _ => {
                warn!(%rejected, "update rejected");
                Err(rejected)
            }
        }
    }

    /// Committed parameter value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Last committed frame
    pub fn frame(&self) -> Option<&S::Frame> {
        self.frame.as_ref()
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::{Integration, IntegrationStats, IntegrationStatus};
    use crate::scenario::ParameterRange;
    use crate::solvers::SolverError;
    use crate::state::Trajectory;

    /// Scenario whose frame just records the value; fails above 0.9
    struct Echo;

    struct EchoFrame {
        value: f64,
        integration: Integration,
    }

    impl Frame for EchoFrame {
        fn integration(&self) -> &Integration {
            &self.integration
        }
    }

    impl Scenario for Echo {
        type Frame = EchoFrame;

        fn parameter(&self) -> &'static str {
            "p"
        }

        fn range(&self) -> ParameterRange {
            ParameterRange::new(0.0, 1.0)
        }

        fn default_value(&self) -> f64 {
            0.25
        }

        fn compute(&self, value: f64) -> SimResult<EchoFrame> {
            if value == 0.0 {
                return Err(SimError::Domain { energy: value, floor: 0.0 });
            }
            let status = if value > 0.9 {
                IntegrationStatus::Failed {
                    index: 3,
                    time: 0.3,
                    error: SolverError::TimestepTooSmall { dt: 1e-13, dt_min: 1e-12 },
                }
            } else {
                IntegrationStatus::Complete
            };
            Ok(EchoFrame {
                value,
                integration: Integration {
                    trajectory: Trajectory::default(),
                    status,
                    stats: IntegrationStats::default(),
                },
            })
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<f64>);

    impl Presentation<EchoFrame> for Recorder {
        fn redraw(&mut self, frame: &EchoFrame) {
            self.0.push(frame.value);
        }
    }

    #[test]
    fn test_initialize_draws_default() {
        let mut ctl = ParameterController::new(Echo, Recorder::default(), RangePolicy::Reject);
        assert!(ctl.frame().is_none());
        assert_eq!(ctl.initialize(), Ok(Update::Complete { value: 0.25 }));
        assert_eq!(ctl.presentation().0, vec![0.25]);
        assert_eq!(ctl.value(), 0.25);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut ctl = ParameterController::new(Echo, Recorder::default(), RangePolicy::Reject);
        ctl.initialize().unwrap();
        assert!(matches!(
            ctl.set_parameter(1.5),
            Err(SimError::ParameterOutOfRange { name: "p", .. })
        ));
        assert!(ctl.set_parameter(f64::NAN).is_err());
        assert_eq!(ctl.value(), 0.25);
        assert_eq!(ctl.presentation().0, vec![0.25]);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let mut ctl = ParameterController::new(Echo, Recorder::default(), RangePolicy::Clamp);
        assert_eq!(ctl.set_parameter(7.0), Ok(Update::Partial { value: 1.0, stopped_at: 3 }));
        assert_eq!(ctl.value(), 1.0);
        // NaN has no meaningful clamp
        assert!(ctl.set_parameter(f64::NAN).is_err());
        assert_eq!(ctl.value(), 1.0);
    }

    #[test]
    fn test_compute_error_keeps_previous_state() {
        let mut ctl = ParameterController::new(Echo, Recorder::default(), RangePolicy::Reject);
        ctl.set_parameter(0.5).unwrap();
        assert!(matches!(ctl.set_parameter(0.0), Err(SimError::Domain { .. })));
        assert_eq!(ctl.value(), 0.5);
        assert_eq!(ctl.frame().unwrap().value, 0.5);
        assert_eq!(ctl.presentation().0, vec![0.5]);
    }

    #[test]
    fn test_partial_integration_is_committed_and_drawn() {
        let mut ctl = ParameterController::new(Echo, Recorder::default(), RangePolicy::Reject);
        let update = ctl.set_parameter(0.95).unwrap();
        assert_eq!(update, Update::Partial { value: 0.95, stopped_at: 3 });
        assert_eq!(update.value(), 0.95);
        assert_eq!(ctl.presentation().0, vec![0.95]);
    }
}
