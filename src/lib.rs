//! pendusim - Simple pendulum simulation with fixed-step RK4 integration
//!
//! Integrates the undamped pendulum
//!
//! ```text
//! dtheta/dt = omega
//! domega/dt = -(g/L) * sin(theta)
//! ```
//!
//! for one state or a batch of independent states, and derives the bob's
//! Cartesian position and the mechanical energy from any state.
//!
//! # Architecture
//!
//! - [`params`]: physical constants with a validated bulk update
//! - [`state`]: `[theta, omega]` states and batches, plus input coercion
//! - [`dynamics`]: right-hand side of the ODE
//! - [`solvers`]: fixed-step explicit solvers (RK4, Euler)
//! - [`simulator`]: the trajectory driver tying it all together
//! - [`diagnostics`]: coordinates, energy and drift
//! - [`settings`]: serde-backed configuration
//!
//! # Example
//!
//! ```rust
//! use pendusim::prelude::*;
//!
//! let mut sim = PendulumSimulator::new(ComputeTarget::Cpu);
//! sim.set_params([("length", 1.0), ("mass", 1.0)]).unwrap();
//!
//! let traj = sim.trajectory([0.1, 0.0], 1.0).unwrap();
//! let energy = sim.compute_energy(traj.last()).unwrap();
//! assert!((energy[0] - 0.0490).abs() < 1e-4);
//! ```

pub mod diagnostics;
pub mod dynamics;
pub mod error;
pub mod params;
pub mod settings;
pub mod simulator;
pub mod solvers;
pub mod state;
pub mod trajectory;
pub mod utils;

pub use error::SimError;
pub use params::{ParamName, PendulumParameters};
pub use settings::{ComputeTarget, OutputFormat, SimulationSettings, SolverType};
pub use simulator::{PendulumSimulator, SimulationOutput};
pub use state::{IntoStateBatch, State, StateBatch, StateMatrix};
pub use trajectory::{HostTrajectory, Trajectory};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diagnostics::{energy_drift, small_angle_period};
    pub use crate::error::SimError;
    pub use crate::params::{ParamName, PendulumParameters};
    pub use crate::settings::{ComputeTarget, OutputFormat, SimulationSettings, SolverType};
    pub use crate::simulator::{PendulumSimulator, SimulationOutput};
    pub use crate::state::{IntoStateBatch, State, StateBatch};
    pub use crate::trajectory::{HostTrajectory, Trajectory};
}
