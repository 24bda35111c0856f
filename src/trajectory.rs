//! Time series produced by the simulator

use serde::{Deserialize, Serialize};

use crate::state::{State, StateBatch};

/// Chronological sequence of state batches with their sample times.
///
/// `times` and `states` always have the same, non-zero length and every
/// batch shares the shape of the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<StateBatch>,
}

impl Trajectory {
    pub(crate) fn new(times: Vec<f64>, initial: StateBatch) -> Self {
        let mut states = Vec::with_capacity(times.len());
        states.push(initial);
        Self { times, states }
    }

    pub(crate) fn push(&mut self, state: StateBatch) {
        debug_assert!(self.states.len() < self.times.len());
        self.states.push(state);
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[StateBatch] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial(&self) -> &StateBatch {
        &self.states[0]
    }

    pub fn last(&self) -> &StateBatch {
        &self.states[self.states.len() - 1]
    }

    /// `(t, batch)` pairs in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (f64, &StateBatch)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Time series of one batch element
    pub fn series(&self, index: usize) -> Option<Vec<State>> {
        self.states.iter().map(|batch| batch.get(index)).collect()
    }

    /// Convert to plain host arrays
    pub fn into_host(self) -> HostTrajectory {
        let batch_shape = self.initial().batch_shape().to_vec();
        HostTrajectory {
            states: self.states.iter().map(StateBatch::to_vec).collect(),
            times: self.times,
            batch_shape,
        }
    }
}

/// Trajectory as plain vectors, for consumers outside the numeric core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostTrajectory {
    pub times: Vec<f64>,
    /// Leading batch dimensions of every entry in `states`
    pub batch_shape: Vec<usize>,
    /// `states[i]` holds the batch at `times[i]`, flattened row-major
    pub states: Vec<Vec<[f64; 2]>>,
}

/// `n` evenly spaced samples from `start` to `end` inclusive.
///
/// A single sample is `[start]`; the final sample is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}
