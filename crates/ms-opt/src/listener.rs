//! `TrajectoryListener` — turns one host run into a trajectory of
//! [`SimulatorState`]s.
//!
//! # Lifecycle
//!
//! ```text
//! NotStarted ──startup──▶ JustStarted ──1st boundary──▶ Running ──shutdown──▶ Stopped
//!                                                        │   ▲
//!                                                        └───┘ every later boundary:
//!                                                              hook, extract, window,
//!                                                              combine, deliver, clear
//! ```
//!
//! The first iteration boundary comes before any event has been observed,
//! so it only arms the listener.  Every later boundary closes the previous
//! iteration.  Shutdown closes the last one without delivering it; the
//! resulting final state is approximate because the host would normally
//! still replan after that iteration.

use log::{debug, info};

use ms_analysis::AnalyzerSet;
use ms_control::{ControlResult, ControlerContext, ControlerListener};
use ms_core::VehicleEvent;

use crate::{
    BeforeExtractionHook, CombineMode, OptError, OptResult, SimulatorState, StateFactory,
    StateVectorWriter, TrajectorySampler, TrajectoryWindow,
};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ListenerState {
    NotStarted,
    JustStarted,
    Running,
    Stopped,
}

impl ListenerState {
    pub fn as_str(self) -> &'static str {
        match self {
            ListenerState::NotStarted => "not started",
            ListenerState::JustStarted => "just started",
            ListenerState::Running => "running",
            ListenerState::Stopped => "stopped",
        }
    }
}

/// Wires analyzers, window and sampler into the host's lifecycle for one run.
///
/// Events are forwarded to the analyzers in registration order.  The
/// termination predicate is the sampler's `found_solution`.
pub struct TrajectoryListener<'a, D> {
    analyzers: &'a mut AnalyzerSet,
    sampler:   &'a mut dyn TrajectorySampler<D>,
    factory:   &'a dyn StateFactory<D>,
    hook:      Option<&'a mut dyn BeforeExtractionHook>,
    combine:   CombineMode,
    window:    TrajectoryWindow,

    write_state_vectors: bool,
    writer:              Option<StateVectorWriter>,

    state:       ListenerState,
    /// Iteration announced by the latest boundary.
    iteration:   Option<u32>,
    delivered:   u32,
    final_state: Option<SimulatorState<D>>,
}

impl<'a, D> TrajectoryListener<'a, D> {
    pub fn new(
        analyzers: &'a mut AnalyzerSet,
        sampler:   &'a mut dyn TrajectorySampler<D>,
        factory:   &'a dyn StateFactory<D>,
        memory:    usize,
        combine:   CombineMode,
    ) -> Self {
        Self {
            analyzers,
            sampler,
            factory,
            hook: None,
            combine,
            window: TrajectoryWindow::new(memory),
            write_state_vectors: false,
            writer: None,
            state: ListenerState::NotStarted,
            iteration: None,
            delivered: 0,
            final_state: None,
        }
    }

    /// Write every delivered vector to `state_vectors.csv` in the run's
    /// output directory.
    pub fn writing_state_vectors(mut self, enabled: bool) -> Self {
        self.write_state_vectors = enabled;
        self
    }

    pub fn with_hook(mut self, hook: &'a mut dyn BeforeExtractionHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// States handed to the sampler so far.
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    /// The approximate final state, available once the run has shut down.
    pub fn take_final_state(&mut self) -> Option<SimulatorState<D>> {
        self.final_state.take()
    }

    fn startup(&mut self, ctx: &ControlerContext<'_>) -> OptResult<()> {
        if self.state != ListenerState::NotStarted {
            return Err(OptError::OutOfSequence(self.state.as_str()));
        }
        if self.analyzers.is_empty() {
            return Err(OptError::NoAnalyzers);
        }
        self.analyzers.clear_all();
        self.window = TrajectoryWindow::new(self.window.memory());
        if self.write_state_vectors {
            self.writer = Some(StateVectorWriter::new(ctx.output_directory)?);
        }
        self.state = ListenerState::JustStarted;
        debug!(
            "trajectory listener started: analyzers {:?}, memory {}, {:?}",
            self.analyzers,
            self.window.memory(),
            self.combine
        );
        Ok(())
    }

    fn iteration_boundary(&mut self, iteration: u32) -> OptResult<()> {
        match self.state {
            ListenerState::JustStarted => {
                self.analyzers.clear_all();
                self.state = ListenerState::Running;
            }
            ListenerState::Running => {
                // The boundary closes the previously announced iteration.
                let completed = self.iteration.unwrap_or(iteration.saturating_sub(1));
                if let Some(hook) = self.hook.as_deref_mut() {
                    hook.before_extraction(completed, &*self.analyzers);
                }
                let state = self.observe()?;
                if let Some(writer) = &mut self.writer {
                    writer.write(completed, state.vector())?;
                }
                debug!("iteration {completed}: delivering state of dimension {}", state.vector().len());
                self.sampler.after_iteration(state);
                self.delivered += 1;
                self.analyzers.clear_all();
            }
            other => return Err(OptError::OutOfSequence(other.as_str())),
        }
        self.iteration = Some(iteration);
        Ok(())
    }

    fn shutdown(&mut self) -> OptResult<()> {
        match self.state {
            ListenerState::JustStarted | ListenerState::Running => {}
            other => return Err(OptError::OutOfSequence(other.as_str())),
        }
        self.final_state = Some(self.observe()?);
        if let Some(writer) = &mut self.writer {
            writer.finish()?;
        }
        self.state = ListenerState::Stopped;
        info!("trajectory listener stopped after {} delivered states", self.delivered);
        Ok(())
    }

    /// Extract, push into the window, combine.
    fn observe(&mut self) -> OptResult<SimulatorState<D>> {
        self.window.push(self.analyzers.extract());
        let vector = self.window.combine(self.combine)?;
        Ok(self.factory.new_state(vector, self.sampler.current_decision_variable()))
    }
}

impl<D> ControlerListener for TrajectoryListener<'_, D> {
    fn notify_startup(&mut self, ctx: &ControlerContext<'_>) -> ControlResult<()> {
        Ok(self.startup(ctx)?)
    }

    fn notify_before_mobsim(&mut self, iteration: u32) -> ControlResult<()> {
        Ok(self.iteration_boundary(iteration)?)
    }

    fn handle_event(&mut self, event: &VehicleEvent) -> ControlResult<()> {
        if self.state != ListenerState::Running {
            return Err(OptError::OutOfSequence(self.state.as_str()).into());
        }
        self.analyzers.dispatch(event).map_err(OptError::from)?;
        Ok(())
    }

    fn continue_iterations(&self, _iteration: u32) -> bool {
        !self.sampler.found_solution()
    }

    fn notify_shutdown(&mut self, _ctx: &ControlerContext<'_>) -> ControlResult<()> {
        Ok(self.shutdown()?)
    }
}
