//! `SimulatorState<D>` — what the optimizer receives once per iteration.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use ms_core::StateVector;

use crate::DecisionVariable;

// ── StateComponents ───────────────────────────────────────────────────────────

/// Externally attached data, at most one value per type.
///
/// Opaque to the trajectory layer; state factories put things in, the
/// optimizer's objective function takes them out.
#[derive(Default)]
pub struct StateComponents {
    items: HashMap<TypeId, Box<dyn Any>>,
}

impl StateComponents {
    /// Attach `value`, returning the previous value of the same type.
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        self.items
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|b| *b)
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.items.get(&TypeId::of::<T>()).and_then(|b| b.downcast_ref::<T>())
    }

    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.items
            .remove(&TypeId::of::<T>())
            .and_then(|b| b.downcast::<T>().ok())
            .map(|b| *b)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for StateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateComponents({} attached)", self.items.len())
    }
}

// ── SimulatorState ────────────────────────────────────────────────────────────

/// One iteration's (possibly history-combined) macro-state, paired with the
/// decision variable that was active while it was observed.
#[derive(Debug)]
pub struct SimulatorState<D> {
    vector:            StateVector,
    decision_variable: D,
    components:        StateComponents,
}

impl<D> SimulatorState<D> {
    pub fn new(vector: StateVector, decision_variable: D) -> Self {
        Self { vector, decision_variable, components: StateComponents::default() }
    }

    pub fn vector(&self) -> &StateVector {
        &self.vector
    }

    pub fn decision_variable(&self) -> &D {
        &self.decision_variable
    }

    pub fn components(&self) -> &StateComponents {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut StateComponents {
        &mut self.components
    }

    /// Implement this state's decision variable into `scenario`.
    pub fn implement_in_simulation<S: ?Sized>(&self, scenario: &mut S)
    where
        D: DecisionVariable<S>,
    {
        self.decision_variable.implement_in_simulation(scenario);
    }
}

// ── StateFactory ──────────────────────────────────────────────────────────────

/// Builds the [`SimulatorState`] delivered to the optimizer.
///
/// Override to attach problem-specific components (e.g. raw counts an
/// objective function needs) next to the macro-state vector.
pub trait StateFactory<D> {
    fn new_state(&self, vector: StateVector, decision_variable: D) -> SimulatorState<D>;
}

/// A [`StateFactory`] that attaches nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlainStateFactory;

impl<D> StateFactory<D> for PlainStateFactory {
    fn new_state(&self, vector: StateVector, decision_variable: D) -> SimulatorState<D> {
        SimulatorState::new(vector, decision_variable)
    }
}
