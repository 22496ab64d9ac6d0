//! Parameter changes against the real scenarios

use phasesim::prelude::*;

/// Remembers every value it was asked to draw
#[derive(Default)]
struct Recorder {
    drawn: Vec<f64>,
}

impl Presentation<PendulumFrame> for Recorder {
    fn redraw(&mut self, frame: &PendulumFrame) {
        self.drawn.push(frame.model.amplitude);
    }
}

impl Presentation<DoubleWellFrame> for Recorder {
    fn redraw(&mut self, frame: &DoubleWellFrame) {
        self.drawn.push(frame.energy);
    }
}

fn short_well() -> DoubleWellScenario {
    DoubleWellScenario::new(DoubleWellConfig {
        t_stop: 4.0,
        samples: 800,
        ..DoubleWellConfig::default()
    })
    .unwrap()
}

fn short_pendulum() -> PendulumScenario {
    PendulumScenario::new(PendulumConfig {
        t_stop: 25.0,
        steps: 200,
        ..PendulumConfig::default()
    })
    .unwrap()
}

#[test]
fn test_initialize_uses_defaults() {
    let mut pendulum = ParameterController::new(short_pendulum(), Recorder::default(), RangePolicy::Reject);
    let mut well = ParameterController::new(short_well(), Recorder::default(), RangePolicy::Reject);

    assert_eq!(pendulum.initialize().unwrap(), Update::Complete { value: 0.5 });
    let update = well.initialize().unwrap();
    assert!((update.value() - (-15.2)).abs() < 1e-12);

    assert_eq!(pendulum.presentation().drawn, vec![0.5]);
    assert_eq!(well.presentation().drawn.len(), 1);
    assert!(well.frame().unwrap().spectrum.is_some());
}

#[test]
fn test_pendulum_amplitude_change_redraws() {
    let mut ctl = ParameterController::new(short_pendulum(), Recorder::default(), RangePolicy::Reject);
    ctl.initialize().unwrap();
    ctl.set_parameter(1.5).unwrap();

    assert_eq!(ctl.value(), 1.5);
    assert_eq!(ctl.frame().unwrap().model.amplitude, 1.5);
    assert_eq!(ctl.presentation().drawn, vec![0.5, 1.5]);
}

#[test]
fn test_out_of_range_energy_rejected_without_redraw() {
    let mut ctl = ParameterController::new(short_well(), Recorder::default(), RangePolicy::Reject);
    ctl.set_parameter(-10.0).unwrap();
    let before = ctl.frame().unwrap().clone();

    for bad in [-17.0, 250.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            ctl.set_parameter(bad),
            Err(SimError::ParameterOutOfRange { name: "E", .. })
        ));
    }
    assert_eq!(ctl.value(), -10.0);
    assert_eq!(ctl.frame(), Some(&before));
    assert_eq!(ctl.presentation().drawn, vec![-10.0]);
}

#[test]
fn test_clamp_policy_lands_on_bounds() {
    let mut ctl = ParameterController::new(short_well(), Recorder::default(), RangePolicy::Clamp);
    let update = ctl.set_parameter(-100.0).unwrap();
    assert_eq!(update, Update::Complete { value: -16.0 });
    let frame = ctl.frame().unwrap();
    assert_eq!(frame.initial, State::new(-2.0, 0.0));

    let mut pendulum = ParameterController::new(short_pendulum(), Recorder::default(), RangePolicy::Clamp);
    assert_eq!(pendulum.set_parameter(9.0).unwrap().value(), 2.5);
}

#[test]
fn test_worker_applies_latest_energy() {
    let mut worker = Recomputer::spawn(short_well());
    worker.request(-12.0).unwrap();
    worker.request(-8.0).unwrap();
    let generation = worker.request(-4.0).unwrap();

    let outcome = worker.wait_latest().unwrap();
    assert_eq!(outcome.generation, generation);
    assert_eq!(outcome.value, -4.0);
    let frame = outcome.result.unwrap();
    assert_eq!(frame.energy, -4.0);
    assert!(frame.integration.is_complete());
}
