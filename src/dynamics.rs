//! Equations of motion of the simple pendulum
//!
//! ```text
//! dtheta/dt = omega
//! domega/dt = -(g/L) * sin(theta)
//! ```

use nalgebra::{Dyn, U2};

use crate::params::PendulumParameters;
use crate::state::StateMatrix;

/// Right-hand side of the pendulum ODE for a fixed parameter set.
///
/// The system is time invariant, so `t` is accepted only to match the solver
/// signature. Each row of the input is an independent state.
#[derive(Debug, Clone, Copy)]
pub struct PendulumDynamics {
    omega0_squared: f64,
}

impl PendulumDynamics {
    pub fn new(params: &PendulumParameters) -> Self {
        Self {
            omega0_squared: params.omega0_squared(),
        }
    }

    pub fn eval(&self, x: &StateMatrix, _t: f64) -> StateMatrix {
        let k = self.omega0_squared;
        let mut dxdt = StateMatrix::zeros_generic(Dyn(x.nrows()), U2);
        dxdt.set_column(0, &x.column(1));
        dxdt.set_column(1, &x.column(0).map(|theta| -k * theta.sin()));
        dxdt
    }
}
