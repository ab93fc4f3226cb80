//! Bounded memory of the most recent instantaneous state vectors.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use ms_core::StateVector;

use crate::{OptError, OptResult};

/// How the window's entries are folded into one vector.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Newest first; dimension is `memory × instantaneous dimension`.
    #[default]
    Concatenate,
    /// Element-wise mean; dimension is the instantaneous dimension.
    Average,
}

/// The `memory` most recent vectors, newest at the front.
///
/// While fewer than `memory` vectors have been observed, the oldest one is
/// replicated backward to fill the window.
#[derive(Clone, Debug)]
pub struct TrajectoryWindow {
    memory:  usize,
    entries: VecDeque<StateVector>,
}

impl TrajectoryWindow {
    /// `memory` is clamped to at least 1.
    pub fn new(memory: usize) -> Self {
        let memory = memory.max(1);
        Self { memory, entries: VecDeque::with_capacity(memory) }
    }

    pub fn memory(&self) -> usize {
        self.memory
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&StateVector> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateVector> {
        self.entries.iter()
    }

    /// Insert `vector` as the newest entry, evicting the oldest beyond
    /// `memory` and padding with copies of the oldest while short.
    pub fn push(&mut self, vector: StateVector) {
        self.entries.push_front(vector);
        self.entries.truncate(self.memory);
        while self.entries.len() < self.memory {
            let Some(oldest) = self.entries.back().cloned() else { break };
            self.entries.push_back(oldest);
        }
    }

    pub fn combine(&self, mode: CombineMode) -> OptResult<StateVector> {
        if self.entries.is_empty() {
            return Err(OptError::EmptyWindow);
        }
        match mode {
            CombineMode::Concatenate => Ok(StateVector::concat(&self.entries)),
            CombineMode::Average => {
                let parts: Vec<StateVector> = self.entries.iter().cloned().collect();
                Ok(StateVector::average(&parts)?)
            }
        }
    }
}
