//! `StateVector` — the fixed-dimension numeric summary of one iteration.

use std::ops::Index;

use crate::{CoreError, CoreResult};

/// An ordered sequence of reals.  Layout is defined by whoever produced it;
/// this type only guarantees ordered storage and the combination helpers the
/// trajectory window needs.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateVector(Vec<f64>);

impl StateVector {
    /// An all-zero vector of dimension `len`.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Append all elements of `other`.
    pub fn extend_from(&mut self, other: &StateVector) {
        self.0.extend_from_slice(&other.0);
    }

    /// Concatenate `parts` in iteration order.
    pub fn concat<'a, I>(parts: I) -> StateVector
    where
        I: IntoIterator<Item = &'a StateVector>,
    {
        let mut out = StateVector::default();
        for part in parts {
            out.extend_from(part);
        }
        out
    }

    /// Element-wise mean of `parts`.  All parts must share one dimension.
    ///
    /// An empty slice yields an empty vector.
    pub fn average(parts: &[StateVector]) -> CoreResult<StateVector> {
        let Some(first) = parts.first() else {
            return Ok(StateVector::default());
        };
        let mut sum = first.0.clone();
        for part in &parts[1..] {
            if part.len() != sum.len() {
                return Err(CoreError::DimensionMismatch { expected: sum.len(), got: part.len() });
            }
            for (acc, x) in sum.iter_mut().zip(&part.0) {
                *acc += x;
            }
        }
        let n = parts.len() as f64;
        for x in &mut sum {
            *x /= n;
        }
        Ok(StateVector(sum))
    }
}

impl From<Vec<f64>> for StateVector {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl Index<usize> for StateVector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}
