//! Pendulum state vectors and batches of them.
//!
//! A batch is stored as an `N x 2` matrix (column 0 is `theta`, column 1 is
//! `omega`) together with the leading batch dimensions it was built from.
//! `N` is the product of those dimensions; an empty dimension list marks a
//! single, unbatched state.
//!
//! Inputs enter through [`IntoStateBatch`], which is the only place where
//! foreign data (slices, nested vectors, JSON arrays) is checked against the
//! shape contract.

use nalgebra::{DVector, Dyn, OMatrix, U2};
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::utils::constants::STATE_DIM;

/// Row-per-state matrix used by the dynamics and solvers
pub type StateMatrix = OMatrix<f64, Dyn, U2>;

/// A single pendulum state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Angle from vertical (rad)
    pub theta: f64,
    /// Angular velocity (rad/s)
    pub omega: f64,
}

impl State {
    pub fn new(theta: f64, omega: f64) -> Self {
        Self { theta, omega }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.theta, self.omega]
    }
}

impl From<[f64; 2]> for State {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// One or more pendulum states with an explicit batch shape
#[derive(Debug, Clone, PartialEq)]
pub struct StateBatch {
    batch_shape: Vec<usize>,
    data: StateMatrix,
}

impl StateBatch {
    /// Wrap a single state (no batch dimension)
    pub fn single(state: State) -> Self {
        Self {
            batch_shape: Vec::new(),
            data: StateMatrix::from_row_slice_generic(Dyn(1), U2, &state.to_array()),
        }
    }

    /// One-dimensional batch from a list of states
    pub fn from_states(states: &[State]) -> Self {
        let flat: Vec<f64> = states.iter().flat_map(|s| s.to_array()).collect();
        Self {
            batch_shape: vec![states.len()],
            data: StateMatrix::from_row_slice_generic(Dyn(states.len()), U2, &flat),
        }
    }

    /// Build a batch from row-major data laid out as `batch_shape x 2`.
    ///
    /// # Errors
    ///
    /// [`SimError::TypeShape`] when `data.len()` differs from
    /// `2 * product(batch_shape)` or that product overflows `usize`.
    pub fn from_shape(batch_shape: &[usize], data: &[f64]) -> Result<Self, SimError> {
        let overflow = || SimError::shape(format!("batch shape {:?} is too large", batch_shape));
        let n = batch_shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(overflow)?;
        let needed = n.checked_mul(STATE_DIM).ok_or_else(overflow)?;
        if data.len() != needed {
            return Err(SimError::shape(format!(
                "batch shape {:?} needs {} values, got {}",
                batch_shape,
                needed,
                data.len()
            )));
        }
        Ok(Self {
            batch_shape: batch_shape.to_vec(),
            data: StateMatrix::from_row_slice_generic(Dyn(n), U2, data),
        })
    }

    /// Same batch shape, new values. Row counts must match.
    pub(crate) fn with_matrix(&self, data: StateMatrix) -> Self {
        debug_assert_eq!(data.nrows(), self.data.nrows());
        Self {
            batch_shape: self.batch_shape.clone(),
            data,
        }
    }

    /// Leading batch dimensions (empty for a single state)
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Full shape including the trailing state axis of size 2
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.batch_shape.clone();
        shape.push(STATE_DIM);
        shape
    }

    pub fn is_single(&self) -> bool {
        self.batch_shape.is_empty()
    }

    /// Number of states in the batch
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Give a single state a batch dimension of size 1
    pub fn promoted(mut self) -> Self {
        if self.batch_shape.is_empty() {
            self.batch_shape.push(1);
        }
        self
    }

    pub fn matrix(&self) -> &StateMatrix {
        &self.data
    }

    /// Angles of all states, flattened in row-major batch order
    pub fn theta(&self) -> DVector<f64> {
        self.data.column(0).into_owned()
    }

    /// Angular velocities of all states, flattened in row-major batch order
    pub fn omega(&self) -> DVector<f64> {
        self.data.column(1).into_owned()
    }

    pub fn get(&self, index: usize) -> Option<State> {
        (index < self.len()).then(|| State::new(self.data[(index, 0)], self.data[(index, 1)]))
    }

    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.data
            .row_iter()
            .map(|row| State::new(row[0], row[1]))
    }

    pub fn to_vec(&self) -> Vec<[f64; 2]> {
        self.iter().map(State::to_array).collect()
    }
}

impl From<State> for StateBatch {
    fn from(state: State) -> Self {
        StateBatch::single(state)
    }
}

/// Conversion of caller input into a [`StateBatch`].
///
/// Implemented for the native types and for the common host forms. Every
/// implementation either produces a batch honouring the shape contract or
/// returns [`SimError::TypeShape`].
pub trait IntoStateBatch {
    fn into_state_batch(self) -> Result<StateBatch, SimError>;
}

impl IntoStateBatch for StateBatch {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(self)
    }
}

impl IntoStateBatch for &StateBatch {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(self.clone())
    }
}

impl IntoStateBatch for State {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(StateBatch::single(self))
    }
}

impl IntoStateBatch for [f64; 2] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(StateBatch::single(self.into()))
    }
}

impl IntoStateBatch for &[f64] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        match self {
            [theta, omega] => Ok(StateBatch::single(State::new(*theta, *omega))),
            _ => Err(SimError::shape(format!(
                "expected [theta, omega], got {} values",
                self.len()
            ))),
        }
    }
}

impl IntoStateBatch for Vec<f64> {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        self.as_slice().into_state_batch()
    }
}

impl IntoStateBatch for &[State] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(StateBatch::from_states(self))
    }
}

impl IntoStateBatch for Vec<State> {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        Ok(StateBatch::from_states(&self))
    }
}

impl IntoStateBatch for &[[f64; 2]] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        let flat: Vec<f64> = self.iter().flatten().copied().collect();
        StateBatch::from_shape(&[self.len()], &flat)
    }
}

impl IntoStateBatch for Vec<[f64; 2]> {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        self.as_slice().into_state_batch()
    }
}

impl<const N: usize> IntoStateBatch for [[f64; 2]; N] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        self.as_slice().into_state_batch()
    }
}

impl IntoStateBatch for &[Vec<f64>] {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        let mut flat = Vec::with_capacity(self.len() * STATE_DIM);
        for (i, row) in self.iter().enumerate() {
            if row.len() != STATE_DIM {
                return Err(SimError::shape(format!(
                    "state {} has {} values, expected 2",
                    i,
                    row.len()
                )));
            }
            flat.extend_from_slice(row);
        }
        StateBatch::from_shape(&[self.len()], &flat)
    }
}

impl IntoStateBatch for Vec<Vec<f64>> {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        self.as_slice().into_state_batch()
    }
}

/// Nested JSON arrays of numbers of any depth; the innermost arrays must
/// hold exactly two numbers and all siblings must agree in shape.
impl IntoStateBatch for &serde_json::Value {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        let mut shape = Vec::new();
        let mut probe = self;
        while let serde_json::Value::Array(items) = probe {
            shape.push(items.len());
            match items.first() {
                Some(first) => probe = first,
                None => break,
            }
        }
        if shape.last() != Some(&STATE_DIM) {
            return Err(SimError::shape(format!(
                "expected nested arrays ending in an axis of size 2, got shape {:?}",
                shape
            )));
        }

        let mut flat = Vec::with_capacity(shape.iter().product());
        flatten_json(self, &shape, &mut flat)?;
        shape.pop();
        StateBatch::from_shape(&shape, &flat)
    }
}

impl IntoStateBatch for serde_json::Value {
    fn into_state_batch(self) -> Result<StateBatch, SimError> {
        (&self).into_state_batch()
    }
}

fn flatten_json(value: &serde_json::Value, shape: &[usize], out: &mut Vec<f64>) -> Result<(), SimError> {
    match (value, shape.split_first()) {
        (serde_json::Value::Array(items), Some((&len, rest))) => {
            if items.len() != len {
                return Err(SimError::shape(format!(
                    "ragged array: expected {} elements, found {}",
                    len,
                    items.len()
                )));
            }
            items.iter().try_for_each(|item| flatten_json(item, rest, out))
        }
        (serde_json::Value::Number(n), None) => {
            let v = n
                .as_f64()
                .ok_or_else(|| SimError::shape(format!("{} is not representable as f64", n)))?;
            out.push(v);
            Ok(())
        }
        (other, _) => Err(SimError::shape(format!("unexpected element {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_state() {
        let batch = [0.1, 0.2].into_state_batch().unwrap();
        assert!(batch.is_single());
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.shape(), vec![2]);
        assert_eq!(batch.get(0), Some(State::new(0.1, 0.2)));
        assert_eq!(batch.get(1), None);
    }

    #[test]
    fn test_promotion() {
        let batch = StateBatch::single(State::new(0.3, 0.0)).promoted();
        assert_eq!(batch.batch_shape(), &[1]);

        let batch = StateBatch::from_states(&[State::default(); 3]).promoted();
        assert_eq!(batch.batch_shape(), &[3]);
    }

    #[test]
    fn test_slice_of_wrong_length() {
        let err = vec![1.0, 2.0, 3.0].into_state_batch().unwrap_err();
        assert!(matches!(err, SimError::TypeShape(_)));
    }

    #[test]
    fn test_ragged_nested_vec() {
        let input = vec![vec![0.1, 0.0], vec![0.2]];
        assert!(matches!(
            input.into_state_batch(),
            Err(SimError::TypeShape(_))
        ));
    }

    #[test]
    fn test_from_shape() {
        let data = [0.1, 0.0, 0.2, 0.0, 0.3, 0.0, 0.4, 0.0, 0.5, 0.0, 0.6, 0.0];
        let batch = StateBatch::from_shape(&[2, 3], &data).unwrap();
        assert_eq!(batch.len(), 6);
        assert_eq!(batch.shape(), vec![2, 3, 2]);
        assert_eq!(batch.theta().as_slice(), &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);

        assert!(StateBatch::from_shape(&[2, 3], &data[..10]).is_err());
    }

    #[test]
    fn test_from_shape_overflowing_dims() {
        for shape in [&[usize::MAX, 3][..], &[usize::MAX / 2 + 1][..]] {
            assert!(matches!(
                StateBatch::from_shape(shape, &[0.1, 0.0]),
                Err(SimError::TypeShape(_))
            ));
        }
    }

    #[test]
    fn test_json_nested() {
        let value = json!([[[0.1, 0.0], [0.2, 0.5]], [[0.3, 0.0], [0.4, -0.5]]]);
        let batch = value.into_state_batch().unwrap();
        assert_eq!(batch.batch_shape(), &[2, 2]);
        assert_eq!(batch.get(3), Some(State::new(0.4, -0.5)));

        let single = json!([0.1, 0.0]).into_state_batch().unwrap();
        assert!(single.is_single());
    }

    #[test]
    fn test_json_rejects_bad_input() {
        for value in [
            json!("0.1, 0.0"),
            json!([0.1, 0.0, 0.0]),
            json!([[0.1, 0.0], [0.2]]),
            json!([[0.1, "x"]]),
            json!([]),
        ] {
            assert!(
                matches!((&value).into_state_batch(), Err(SimError::TypeShape(_))),
                "accepted {}",
                value
            );
        }
    }

    #[test]
    fn test_iter_roundtrip() {
        let rows = vec![[0.1, 1.0], [0.2, 2.0]];
        let batch = rows.clone().into_state_batch().unwrap();
        assert_eq!(batch.to_vec(), rows);
    }
}
