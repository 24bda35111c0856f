//! Physical constants and simulation defaults

/// Standard gravitational acceleration (m/s^2)
pub const GRAVITY: f64 = 9.81;

/// Default string length (m)
pub const DEFAULT_LENGTH: f64 = 1.0;

/// Default bob mass (kg)
pub const DEFAULT_MASS: f64 = 1.0;

/// Default integration timestep (s)
pub const SIM_TIMESTEP: f64 = 0.01;

/// Default simulated duration (s)
pub const SIM_DURATION: f64 = 10.0;

/// Upper bound on integration steps in one simulate call
pub const MAX_STEPS: usize = 100_000_000;

/// Number of components in a pendulum state vector: [theta, omega]
pub const STATE_DIM: usize = 2;
