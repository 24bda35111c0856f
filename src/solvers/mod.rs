//! Numerical integration solvers
//!
//! Fixed-step explicit methods operating on batched pendulum states:
//! - Classic Runge-Kutta (RK4), the default
//! - Forward Euler, as a low-order baseline

mod base;
mod euler;
mod rk4;

pub use base::*;
pub use euler::Euler;
pub use rk4::RK4;
