use std::io::{self, BufRead};

use phasesim::config::{DoubleWellConfig, PendulumConfig, RangePolicy};
use phasesim::controller::{ParameterController, Presentation};
use phasesim::scenario::{DoubleWellFrame, DoubleWellScenario, PendulumFrame, PendulumScenario};
use phasesim::SimResult;
use tracing::{error, info, warn};

/// Text stand-in for the plot window: prints a summary of every redraw
struct Terminal;

impl Presentation<PendulumFrame> for Terminal {
    fn redraw(&mut self, frame: &PendulumFrame) {
        let traj = &frame.integration.trajectory;
        let (phi_min, phi_max) = extent(&traj.positions());
        println!("pendulum  A = {:.3}", frame.model.amplitude);
        println!("  samples   {}", traj.len());
        println!("  phi       [{:.4}, {:.4}]", phi_min, phi_max);
        if let Some(last) = traj.last() {
            println!("  final     phi = {:.4}, omega = {:.4}", last.position, last.velocity);
        }
        println!(
            "  solver    {} accepted, {} rejected, {} evaluations",
            frame.integration.stats.accepted, frame.integration.stats.rejected, frame.integration.stats.evaluations
        );
    }
}

impl Presentation<DoubleWellFrame> for Terminal {
    fn redraw(&mut self, frame: &DoubleWellFrame) {
        let traj = &frame.integration.trajectory;
        let (x_min, x_max) = extent(&traj.positions());
        println!("double well  E = {:.3}", frame.energy);
        println!(
            "  start     x = {:.4}, v = {:.4}",
            frame.initial.position, frame.initial.velocity
        );
        println!("  samples   {}", traj.len());
        println!("  x         [{:.4}, {:.4}]", x_min, x_max);
        println!("  drift     {:.3e}", frame.energies.max_drift());
        match frame.spectrum.as_ref().and_then(|s| s.peak()) {
            Some((freq, _)) => println!(
                "  peak      f = {:.4} (omega = {:.4}, harmonic {:.4})",
                freq,
                2.0 * std::f64::consts::PI * freq,
                frame.harmonic_frequency
            ),
            None => println!("  peak      -"),
        }
    }
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> SimResult<()> {
    let mut pendulum = ParameterController::new(
        PendulumScenario::new(PendulumConfig::default())?,
        Terminal,
        RangePolicy::Reject,
    );
    let mut well = ParameterController::new(
        DoubleWellScenario::new(DoubleWellConfig::default())?,
        Terminal,
        RangePolicy::Reject,
    );

    pendulum.initialize()?;
    well.initialize()?;

    info!("reading parameter changes from stdin: `pendulum <A>` or `well <E>`");
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("stdin: {}", e);
                break;
            }
        };
        let mut words = line.split_whitespace();
        let (Some(target), Some(raw)) = (words.next(), words.next()) else {
            if !line.trim().is_empty() {
                warn!(line = line.as_str(), "expected `pendulum <A>` or `well <E>`");
            }
            continue;
        };
        let value: f64 = match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(value = raw, "not a number");
                continue;
            }
        };

        // Errors are logged by the controller; the previous frame stays on screen
        let _ = match target {
            "pendulum" | "A" => pendulum.set_parameter(value),
            "well" | "E" => well.set_parameter(value),
            other => {
                warn!(scenario = other, "unknown scenario");
                continue;
            }
        };
    }

    info!("input closed, exiting");
    Ok(())
}
