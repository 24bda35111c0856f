//! Base solver traits and types

use crate::state::StateMatrix;

/// Fixed-step explicit integrator.
///
/// Solvers are stateless: `step` maps a state matrix to the next one and
/// never touches its input, so one solver value can drive any number of
/// trajectories.
pub trait ExplicitSolver: Send + Sync {
    /// Order of the method
    fn order(&self) -> usize;

    /// Number of right-hand side evaluations per step
    fn stages(&self) -> usize;

    /// Fixed-step solvers never adapt `dt`
    fn is_adaptive(&self) -> bool {
        false
    }

    /// Advance `x` from `t` to `t + dt` under `dx/dt = f(x, t)`
    fn step<F>(&self, f: F, x: &StateMatrix, t: f64, dt: f64) -> StateMatrix
    where
        F: Fn(&StateMatrix, f64) -> StateMatrix;
}
