//! Simulation settings types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_positive, SimError};
use crate::params::PendulumParameters;
use crate::simulator::{PendulumSimulator, SimulationOutput};
use crate::utils::constants::{SIM_DURATION, SIM_TIMESTEP};

/// Available ODE solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverType {
    /// Forward Euler (1st order)
    Euler,
    /// Classical RK4 (4th order)
    RK4,
}

impl Default for SolverType {
    fn default() -> Self {
        SolverType::RK4
    }
}

impl SolverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverType::Euler => "Euler",
            SolverType::RK4 => "RK4",
        }
    }
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(SolverType::Euler),
            "rk4" => Ok(SolverType::RK4),
            _ => Err(SimError::UnknownSolver(s.to_string())),
        }
    }
}

/// Where the numeric work is executed
///
/// Resolved once when a simulator is built. No accelerator back-end is
/// compiled in, so [`ComputeTarget::Accelerator`] resolves to the CPU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeTarget {
    #[default]
    Cpu,
    Accelerator,
}

impl ComputeTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeTarget::Cpu => "cpu",
            ComputeTarget::Accelerator => "accelerator",
        }
    }

    /// Target that will actually run the simulation
    pub fn resolve(self) -> ComputeTarget {
        match self {
            ComputeTarget::Cpu => ComputeTarget::Cpu,
            ComputeTarget::Accelerator => {
                log::warn!("no accelerator back-end available, running on cpu");
                ComputeTarget::Cpu
            }
        }
    }
}

impl fmt::Display for ComputeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputeTarget {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(ComputeTarget::Cpu),
            "accelerator" | "gpu" | "cuda" => Ok(ComputeTarget::Accelerator),
            _ => Err(SimError::UnknownTarget(s.to_string())),
        }
    }
}

/// Representation of a simulation result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// [`crate::Trajectory`] of nalgebra-backed batches
    #[default]
    Native,
    /// [`crate::HostTrajectory`] of plain arrays
    Host,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulation duration (s)
    pub duration: f64,

    /// Time step (s)
    pub dt: f64,

    /// ODE solver type
    pub solver: SolverType,

    /// Requested compute target
    pub target: ComputeTarget,

    /// Physical parameters
    pub parameters: PendulumParameters,

    /// Initial state: `[theta, omega]` or nested arrays of them
    pub initial_state: serde_json::Value,

    /// Result representation
    pub output: OutputFormat,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration: SIM_DURATION,
            dt: SIM_TIMESTEP,
            solver: SolverType::RK4,
            target: ComputeTarget::Cpu,
            parameters: PendulumParameters::default(),
            initial_state: serde_json::json!([0.1, 0.0]),
            output: OutputFormat::Native,
        }
    }
}

impl SimulationSettings {
    /// Parse settings from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: SimulationSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check timing and parameter constraints
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_positive("duration", self.duration)?;
        ensure_positive("dt", self.dt)?;
        self.parameters.validate()
    }

    /// Build a simulator configured by these settings
    pub fn build_simulator(&self) -> Result<PendulumSimulator, SimError> {
        Ok(PendulumSimulator::with_parameters(self.target, self.parameters)?.with_solver(self.solver))
    }

    /// Build a simulator and run it from `initial_state`
    pub fn run(&self) -> Result<SimulationOutput, SimError> {
        self.validate()?;
        let sim = self.build_simulator()?;
        sim.simulate(&self.initial_state, self.duration, self.dt, self.output)
    }
}
