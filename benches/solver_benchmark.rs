//! Solver benchmarks
//!
//! Benchmarks pendulum integration for various batch sizes and solvers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pendusim::dynamics::PendulumDynamics;
use pendusim::solvers::{Euler, ExplicitSolver, RK4};
use pendusim::{ComputeTarget, OutputFormat, PendulumParameters, PendulumSimulator, State, StateBatch, SolverType};

fn batch(size: usize) -> StateBatch {
    let states: Vec<State> = (0..size)
        .map(|i| State::new(0.1 + 0.01 * i as f64, 0.0))
        .collect();
    StateBatch::from_states(&states)
}

/// Benchmark a single RK4 step with different batch sizes
fn bench_rk4_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("RK4 Step");
    let f = PendulumDynamics::new(&PendulumParameters::default());

    for size in [1, 10, 100, 1000].iter() {
        let x = batch(*size);

        group.bench_with_input(BenchmarkId::new("batch_size", size), size, |b, _| {
            b.iter(|| RK4.step(|x, t| f.eval(x, t), x.matrix(), 0.0, black_box(0.01)));
        });
    }

    group.finish();
}

/// Benchmark a full trajectory with the simulator
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simulate 10s");

    for solver in [SolverType::RK4, SolverType::Euler] {
        let sim = PendulumSimulator::new(ComputeTarget::Cpu).with_solver(solver);
        group.bench_function(solver.as_str(), |b| {
            b.iter(|| {
                let out = sim
                    .simulate(black_box([0.1, 0.0]), 10.0, 0.01, OutputFormat::Native)
                    .unwrap();
                black_box(out);
            });
        });
    }

    group.finish();
}

/// Single Euler step, for comparison with the RK4 group
fn bench_euler_step(c: &mut Criterion) {
    let f = PendulumDynamics::new(&PendulumParameters::default());
    let x = batch(100);

    c.bench_function("Euler step (n=100)", |b| {
        b.iter(|| Euler.step(|x, t| f.eval(x, t), x.matrix(), 0.0, black_box(0.01)));
    });
}

criterion_group!(benches, bench_rk4_step, bench_simulate, bench_euler_step);
criterion_main!(benches);
