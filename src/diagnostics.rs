//! Scalar diagnostics derived from pendulum states
//!
//! All functions work elementwise over a batch and return one value per
//! state, flattened in the batch's row-major order.

use nalgebra::DVector;
use std::f64::consts::PI;

use crate::params::PendulumParameters;
use crate::state::StateBatch;
use crate::trajectory::Trajectory;

/// Bob position with the pivot at the origin and `y` measured downward:
/// `x = L sin(theta)`, `y = L cos(theta)`.
pub fn cartesian_coords(params: &PendulumParameters, states: &StateBatch) -> (DVector<f64>, DVector<f64>) {
    let l = params.length;
    let theta = states.matrix().column(0);
    (theta.map(|th| l * th.sin()), theta.map(|th| l * th.cos()))
}

/// Total mechanical energy, kinetic plus potential relative to the lowest point:
///
/// ```text
/// E = 0.5 * m * (L * omega)^2 + m * g * L * (1 - cos(theta))
/// ```
pub fn compute_energy(params: &PendulumParameters, states: &StateBatch) -> DVector<f64> {
    let PendulumParameters { gravity: g, length: l, mass: m } = *params;
    let x = states.matrix();
    x.column(0).zip_map(&x.column(1), |theta, omega| {
        0.5 * m * (l * omega).powi(2) + m * g * l * (1.0 - theta.cos())
    })
}

/// Period of the linearized pendulum, `2 pi sqrt(L / g)`
pub fn small_angle_period(params: &PendulumParameters) -> f64 {
    2.0 * PI * (params.length / params.gravity).sqrt()
}

/// Largest absolute deviation from the initial energy over a trajectory,
/// per batch element.
pub fn energy_drift(params: &PendulumParameters, trajectory: &Trajectory) -> DVector<f64> {
    let e0 = compute_energy(params, trajectory.initial());
    trajectory
        .states()
        .iter()
        .fold(DVector::zeros(e0.len()), |worst, batch| {
            let e = compute_energy(params, batch);
            worst.zip_zip_map(&e, &e0, |w, ei, e0i| w.max((ei - e0i).abs()))
        })
}
