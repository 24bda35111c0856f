use std::error::Error;

use pendusim::diagnostics::{cartesian_coords, compute_energy, energy_drift, small_angle_period};
use pendusim::{OutputFormat, SimulationSettings};

/// Number of rows printed in the sample table
const TABLE_ROWS: usize = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Optional JSON settings file; otherwise a 0.1 rad release over one second
    let settings = match std::env::args().nth(1) {
        Some(path) => SimulationSettings::from_json(&std::fs::read_to_string(&path)?)?,
        None => SimulationSettings {
            duration: 1.0,
            ..Default::default()
        },
    };

    let sim = settings.build_simulator()?;
    let params = *sim.parameters();

    println!("pendusim - simple pendulum ({} on {})", sim.solver(), sim.target());
    println!("=============================================\n");
    println!(
        "g = {} m/s^2, L = {} m, m = {} kg, dt = {} s, duration = {} s",
        params.gravity, params.length, params.mass, settings.dt, settings.duration
    );
    println!("Small-angle period: {:.4} s\n", small_angle_period(&params));

    let output = sim.simulate(&settings.initial_state, settings.duration, settings.dt, OutputFormat::Native)?;
    let traj = output
        .into_native()
        .ok_or("simulator returned host output for a native request")?;

    println!("{} samples, batch shape {:?}\n", traj.len(), traj.initial().batch_shape());
    println!("{:>8}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}", "t", "theta", "omega", "x", "y", "E");

    let stride = (traj.len() / TABLE_ROWS).max(1);
    for (i, (t, batch)) in traj.iter().enumerate() {
        if i % stride != 0 && i + 1 != traj.len() {
            continue;
        }
        // First batch element only
        let (x, y) = cartesian_coords(&params, batch);
        let e = compute_energy(&params, batch);
        if let Some(s) = batch.get(0) {
            println!(
                "{:8.3}  {:10.6}  {:10.6}  {:10.6}  {:10.6}  {:10.6}",
                t, s.theta, s.omega, x[0], y[0], e[0]
            );
        }
    }

    let drift = energy_drift(&params, &traj);
    println!("\nMax energy drift: {:.3e} J", drift.max());

    if settings.output == OutputFormat::Host {
        println!("{}", serde_json::to_string(&traj.into_host())?);
    }

    Ok(())
}
