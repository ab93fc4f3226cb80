//! The optimizer side of the boundary.

use ms_analysis::AnalyzerSet;

use crate::SimulatorState;

/// The external optimizer's per-run trajectory consumer.
///
/// `after_iteration` may block (scoring, I/O); the listener waits for it
/// before resetting analyzers for the next iteration.
pub trait TrajectorySampler<D> {
    /// One iteration has completed; `state` describes it.
    fn after_iteration(&mut self, state: SimulatorState<D>);

    /// `true` once the sampler has seen enough; the run stops at the next
    /// iteration boundary.
    fn found_solution(&self) -> bool;

    /// The decision variable currently implemented in the simulation.
    fn current_decision_variable(&self) -> D;
}

/// Side-channel inspection right before the macro-state vector is
/// extracted.  Receives the analyzers read-only.
pub trait BeforeExtractionHook {
    fn before_extraction(&mut self, iteration: u32, analyzers: &AnalyzerSet);
}
