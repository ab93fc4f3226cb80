//! Decision variables — optimizer-controlled inputs applied before a run.

/// An exogenous simulation input the optimizer varies.
///
/// This crate never inspects a decision variable; it only carries the one
/// that was active during an iteration alongside that iteration's state and
/// implements it into the scenario before a run that starts from a given
/// state.
pub trait DecisionVariable<S: ?Sized> {
    /// Write this decision into `scenario`.
    fn implement_in_simulation(&self, scenario: &mut S);
}

/// Several decision variables applied as one, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeDecisionVariable<D> {
    parts: Vec<D>,
}

impl<D> CompositeDecisionVariable<D> {
    pub fn new(parts: Vec<D>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[D] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<D> {
        self.parts
    }
}

impl<S: ?Sized, D: DecisionVariable<S>> DecisionVariable<S> for CompositeDecisionVariable<D> {
    fn implement_in_simulation(&self, scenario: &mut S) {
        for part in &self.parts {
            part.implement_in_simulation(scenario);
        }
    }
}
