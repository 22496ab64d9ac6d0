//! Solver benchmarks
//!
//! Single steps of every tableau, full scenario integrations and the spectrum.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::DVector;
use phasesim::analysis::compute_spectrum;
use phasesim::config::{DoubleWellConfig, IntegratorSettings, PendulumConfig};
use phasesim::models::DrivenPendulum;
use phasesim::scenario::{DoubleWellScenario, Scenario};
use phasesim::solvers::{ExplicitSolver, Solver, SolverKind};
use phasesim::{Integrator, State, TimeGrid};

/// Benchmark one full step (all stages) of each method on a harmonic oscillator
fn bench_tableau_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Full Step");
    let initial = DVector::from_vec(vec![1.0, 0.0]);
    let dt = 0.01;

    for kind in [SolverKind::DOPRI54, SolverKind::RKBS32, SolverKind::RKF45, SolverKind::RK4] {
        group.bench_with_input(BenchmarkId::new("method", kind.as_str()), &kind, |b, kind| {
            let mut solver = kind.build(initial.clone(), 1e-8, 1e-6);
            b.iter(|| {
                black_box(solver.full_step(|x, _t| DVector::from_vec(vec![x[1], -x[0]]), black_box(dt)));
                let _ = solver.revert();
            });
        });
    }

    group.finish();
}

/// Benchmark the two strategies on the pendulum grid
fn bench_pendulum(c: &mut Criterion) {
    let config = PendulumConfig::default();
    let grid = TimeGrid::fixed_step(config.t_start, config.t_stop, config.steps).unwrap();
    let model = DrivenPendulum::new(1.2, config.damping, config.drive_frequency);
    let initial = State::new(0.0, 0.0);

    let mut group = c.benchmark_group("Pendulum 2000 samples");
    group.sample_size(20);
    group.bench_function("fixed grid (dopri5)", |b| {
        let integrator = Integrator::new(IntegratorSettings::dopri5());
        b.iter(|| black_box(integrator.integrate(&model, initial, &grid)));
    });
    group.bench_function("adaptive (lsoda tolerances)", |b| {
        let integrator = Integrator::new(IntegratorSettings::lsoda());
        b.iter(|| black_box(integrator.integrate(&model, initial, &grid)));
    });
    group.finish();
}

/// Benchmark a complete double-well frame and its spectrum alone
fn bench_double_well(c: &mut Criterion) {
    let scenario = DoubleWellScenario::new(DoubleWellConfig::default()).unwrap();

    let mut group = c.benchmark_group("Double Well 10000 samples");
    group.sample_size(10);
    group.bench_function("frame", |b| {
        b.iter(|| black_box(scenario.compute(black_box(-15.2))));
    });

    let frame = scenario.compute(-15.2).unwrap();
    group.bench_function("spectrum", |b| {
        b.iter(|| black_box(compute_spectrum(&frame.integration.trajectory, scenario.grid())));
    });
    group.finish();
}

/// Benchmark solver buffer and revert operations
fn bench_solver_buffer_revert(c: &mut Criterion) {
    let initial = DVector::from_element(2, 1.0);
    let dt = 0.001;

    c.bench_function("DOPRI54 Buffer & Revert", |b| {
        let mut solver = SolverKind::DOPRI54.build(initial.clone(), 1e-8, 1e-6);

        b.iter(|| {
            solver.buffer(black_box(dt));
            let _ = solver.revert();
        });
    });
}

criterion_group!(
    benches,
    bench_tableau_step,
    bench_pendulum,
    bench_double_well,
    bench_solver_buffer_revert
);
criterion_main!(benches);
