//! The `MacroStateAnalyzer` trait and the ordered `AnalyzerSet`.

use log::debug;

use ms_core::{StateVector, VehicleEvent};

use crate::{AnalysisError, AnalysisResult};

/// An event handler that composes part of the macro-state of a simulation.
///
/// The reset needed between iterations lives in [`clear`][Self::clear]
/// rather than in event-bus bookkeeping: the host engine resets handlers
/// *before* the iteration boundary at which the macro-state is read, so the
/// caller (the trajectory listener) decides when to clear.
///
/// # Example
///
/// ```rust,ignore
/// struct EventCount { id: String, n: u64 }
///
/// impl MacroStateAnalyzer for EventCount {
///     fn id(&self) -> &str { &self.id }
///     fn clear(&mut self) { self.n = 0; }
///     fn handle_event(&mut self, _e: &VehicleEvent) -> AnalysisResult<()> {
///         self.n += 1;
///         Ok(())
///     }
///     fn dimension(&self) -> usize { 1 }
///     fn new_state_vector(&self) -> StateVector {
///         StateVector::from(vec![self.n as f64])
///     }
/// }
/// ```
pub trait MacroStateAnalyzer {
    /// Stable identifier, unique within one [`AnalyzerSet`].
    fn id(&self) -> &str;

    /// Discard all bookkeeping accumulated from the event stream.  Idempotent.
    fn clear(&mut self);

    /// Observe one event.  Errors abort the current run.
    fn handle_event(&mut self, event: &VehicleEvent) -> AnalysisResult<()>;

    /// Length of the vector [`new_state_vector`][Self::new_state_vector]
    /// returns.
    fn dimension(&self) -> usize;

    /// A new fixed-dimension vector built from the events handled since the
    /// last [`clear`][Self::clear].
    fn new_state_vector(&self) -> StateVector;
}

/// Analyzers in registration order.
///
/// The order fixes the layout of the concatenated macro-state vector, so it
/// is part of the contract with whoever interprets the vector.
#[derive(Default)]
pub struct AnalyzerSet {
    analyzers: Vec<Box<dyn MacroStateAnalyzer>>,
}

impl AnalyzerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `analyzer`.  Fails if an analyzer with the same id is present.
    pub fn add(&mut self, analyzer: Box<dyn MacroStateAnalyzer>) -> AnalysisResult<()> {
        if self.analyzers.iter().any(|a| a.id() == analyzer.id()) {
            return Err(AnalysisError::AlreadyRegistered(analyzer.id().to_owned()));
        }
        debug!("registered analyzer {:?} (dimension {})", analyzer.id(), analyzer.dimension());
        self.analyzers.push(analyzer);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.analyzers.iter().map(|a| a.id())
    }

    pub fn get(&self, id: &str) -> Option<&dyn MacroStateAnalyzer> {
        self.analyzers.iter().find(|a| a.id() == id).map(|a| a.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MacroStateAnalyzer> {
        self.analyzers.iter().map(|a| a.as_ref())
    }

    /// Sum of all analyzer dimensions.
    pub fn dimension(&self) -> usize {
        self.analyzers.iter().map(|a| a.dimension()).sum()
    }

    pub fn clear_all(&mut self) {
        for analyzer in &mut self.analyzers {
            analyzer.clear();
        }
    }

    /// Forward `event` to every analyzer in registration order.
    pub fn dispatch(&mut self, event: &VehicleEvent) -> AnalysisResult<()> {
        for analyzer in &mut self.analyzers {
            analyzer.handle_event(event)?;
        }
        Ok(())
    }

    /// Concatenate every analyzer's vector in registration order.
    pub fn extract(&self) -> StateVector {
        let parts: Vec<StateVector> = self.analyzers.iter().map(|a| a.new_state_vector()).collect();
        StateVector::concat(&parts)
    }
}

impl std::fmt::Debug for AnalyzerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
