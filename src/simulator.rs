//! Pendulum simulator: parameter store, stepper and trajectory driver.

use nalgebra::DVector;

use crate::diagnostics;
use crate::dynamics::PendulumDynamics;
use crate::error::{ensure_positive, SimError};
use crate::params::PendulumParameters;
use crate::settings::{ComputeTarget, OutputFormat, SolverType};
use crate::solvers::{Euler, ExplicitSolver, RK4};
use crate::state::{IntoStateBatch, StateBatch, StateMatrix};
use crate::trajectory::{linspace, HostTrajectory, Trajectory};
use crate::utils::constants::{MAX_STEPS, SIM_TIMESTEP};

/// Result of [`PendulumSimulator::simulate`] in the requested representation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutput {
    Native(Trajectory),
    Host(HostTrajectory),
}

impl SimulationOutput {
    pub fn times(&self) -> &[f64] {
        match self {
            SimulationOutput::Native(traj) => traj.times(),
            SimulationOutput::Host(host) => &host.times,
        }
    }

    pub fn len(&self) -> usize {
        self.times().len()
    }

    pub fn is_empty(&self) -> bool {
        self.times().is_empty()
    }

    pub fn into_native(self) -> Option<Trajectory> {
        match self {
            SimulationOutput::Native(traj) => Some(traj),
            SimulationOutput::Host(_) => None,
        }
    }

    pub fn into_host(self) -> HostTrajectory {
        match self {
            SimulationOutput::Native(traj) => traj.into_host(),
            SimulationOutput::Host(host) => host,
        }
    }
}

/// Simple pendulum integrated with a fixed-step explicit solver (RK4 by default).
///
/// The simulator exclusively owns its [`PendulumParameters`]. Updating them
/// needs `&mut self` while simulating borrows `&self`, so a single instance
/// can never be reconfigured in the middle of a run. Sharing an instance
/// across threads requires the caller's own locking; otherwise use one
/// simulator per thread.
///
/// # Example
///
/// ```
/// use pendusim::{OutputFormat, PendulumSimulator, ComputeTarget};
///
/// let sim = PendulumSimulator::new(ComputeTarget::Cpu);
/// let traj = sim
///     .simulate([0.1, 0.0], 1.0, 0.01, OutputFormat::Native)
///     .unwrap()
///     .into_native()
///     .unwrap();
/// assert_eq!(traj.len(), 101);
/// ```
#[derive(Debug, Clone)]
pub struct PendulumSimulator {
    params: PendulumParameters,
    target: ComputeTarget,
    solver: SolverType,
}

impl Default for PendulumSimulator {
    fn default() -> Self {
        Self::new(ComputeTarget::Cpu)
    }
}

impl PendulumSimulator {
    /// Simulator with default parameters on the given compute target
    pub fn new(target: ComputeTarget) -> Self {
        Self {
            params: PendulumParameters::default(),
            target: target.resolve(),
            solver: SolverType::default(),
        }
    }

    /// Simulator with explicit parameters
    pub fn with_parameters(target: ComputeTarget, params: PendulumParameters) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::new(target)
        })
    }

    /// Replace the integration method
    pub fn with_solver(mut self, solver: SolverType) -> Self {
        self.solver = solver;
        self
    }

    /// Compute target the simulator resolved to
    pub fn target(&self) -> ComputeTarget {
        self.target
    }

    pub fn solver(&self) -> SolverType {
        self.solver
    }

    pub fn parameters(&self) -> &PendulumParameters {
        &self.params
    }

    /// Update parameters by name, e.g. `[("length", 2.0), ("mass", 0.5)]`.
    ///
    /// Either every update is applied or none is; see
    /// [`PendulumParameters::apply_updates`].
    pub fn set_params<I, K>(&mut self, updates: I) -> Result<(), SimError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        self.params.apply_updates(updates)?;
        log::debug!(
            "parameters updated: g={} L={} m={}",
            self.params.gravity,
            self.params.length,
            self.params.mass
        );
        Ok(())
    }

    /// Time derivative `[omega, -(g/L) sin(theta)]` of each state
    pub fn dynamics(&self, state: impl IntoStateBatch, t: f64) -> Result<StateBatch, SimError> {
        let state = state.into_state_batch()?;
        let f = PendulumDynamics::new(&self.params);
        Ok(state.with_matrix(f.eval(state.matrix(), t)))
    }

    /// Advance each state by one step of size `dt`
    pub fn step(&self, state: impl IntoStateBatch, dt: f64) -> Result<StateBatch, SimError> {
        ensure_positive("dt", dt)?;
        let state = state.into_state_batch()?;
        let f = PendulumDynamics::new(&self.params);
        Ok(state.with_matrix(self.advance(&f, state.matrix(), 0.0, dt)))
    }

    fn advance(&self, f: &PendulumDynamics, x: &StateMatrix, t: f64, dt: f64) -> StateMatrix {
        let rhs = |x: &StateMatrix, t: f64| f.eval(x, t);
        match self.solver {
            SolverType::RK4 => RK4.step(rhs, x, t, dt),
            SolverType::Euler => Euler.step(rhs, x, t, dt),
        }
    }

    /// Integrate from `initial` over `[0, duration]` with fixed step `dt`.
    ///
    /// A single state is promoted to a batch of one. The result holds
    /// `floor(duration / dt) + 1` samples; `times` runs evenly from 0 to
    /// `duration` and the first state equals the (promoted) input.
    ///
    /// # Errors
    ///
    /// - [`SimError::Domain`] for non-positive or non-finite `duration` / `dt`
    /// - [`SimError::TypeShape`] if `initial` is not a state or batch of states
    pub fn simulate(
        &self,
        initial: impl IntoStateBatch,
        duration: f64,
        dt: f64,
        output: OutputFormat,
    ) -> Result<SimulationOutput, SimError> {
        let traj = self.run(initial, duration, dt)?;
        Ok(match output {
            OutputFormat::Native => SimulationOutput::Native(traj),
            OutputFormat::Host => SimulationOutput::Host(traj.into_host()),
        })
    }

    /// [`simulate`](Self::simulate) with the default step, returning the native trajectory
    pub fn trajectory(&self, initial: impl IntoStateBatch, duration: f64) -> Result<Trajectory, SimError> {
        self.run(initial, duration, SIM_TIMESTEP)
    }

    fn run(&self, initial: impl IntoStateBatch, duration: f64, dt: f64) -> Result<Trajectory, SimError> {
        ensure_positive("duration", duration)?;
        ensure_positive("dt", dt)?;
        let initial = initial.into_state_batch()?.promoted();

        let steps = (duration / dt).floor();
        if !steps.is_finite() || steps > MAX_STEPS as f64 {
            return Err(SimError::Domain {
                name: "duration / dt",
                value: steps,
                reason: "step count exceeds the supported maximum",
            });
        }
        let n_steps = steps as usize;
        let n_samples = n_steps.checked_add(1).ok_or(SimError::Domain {
            name: "duration / dt",
            value: steps,
            reason: "step count exceeds the supported maximum",
        })?;
        log::debug!(
            "simulating {} state(s) with {} for {} steps (dt={}, target={})",
            initial.len(),
            self.solver,
            n_steps,
            dt,
            self.target
        );

        let f = PendulumDynamics::new(&self.params);
        let mut traj = Trajectory::new(linspace(0.0, duration, n_samples), initial);
        for i in 0..n_steps {
            let current = traj.last();
            let next = current.with_matrix(self.advance(&f, current.matrix(), i as f64 * dt, dt));
            traj.push(next);
        }

        log::debug!("simulation finished: {} samples", traj.len());
        Ok(traj)
    }

    /// Bob positions `(x, y)` for each state
    pub fn cartesian_coords(&self, states: impl IntoStateBatch) -> Result<(DVector<f64>, DVector<f64>), SimError> {
        Ok(diagnostics::cartesian_coords(&self.params, &states.into_state_batch()?))
    }

    /// Mechanical energy for each state
    pub fn compute_energy(&self, states: impl IntoStateBatch) -> Result<DVector<f64>, SimError> {
        Ok(diagnostics::compute_energy(&self.params, &states.into_state_batch()?))
    }
}
