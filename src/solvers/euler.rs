//! Forward Euler method for numerical integration

use super::ExplicitSolver;
use crate::state::StateMatrix;

/// Explicit forward Euler method
///
/// First-order, single-stage explicit integration method.
///
/// # Mathematical Form
/// ```text
/// x_{n+1} = x_n + h * f(x_n, t_n)
/// ```
///
/// # Note
/// Kept as a baseline. On the undamped pendulum it spirals outward and the
/// mechanical energy grows every step; prefer RK4.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl Euler {
    pub fn new() -> Self {
        Self
    }
}

impl ExplicitSolver for Euler {
    fn order(&self) -> usize {
        1
    }

    fn stages(&self) -> usize {
        1
    }

    fn step<F>(&self, f: F, x: &StateMatrix, t: f64, dt: f64) -> StateMatrix
    where
        F: Fn(&StateMatrix, f64) -> StateMatrix,
    {
        x + dt * f(x, t)
    }
}
