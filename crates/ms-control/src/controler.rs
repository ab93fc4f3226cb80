//! The `Controler` trait — one host engine executing one run at a time.

use std::path::PathBuf;

use crate::{ControlResult, ControlerConfig, ControlerListener};

/// Outcome of one [`Controler::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Iterations whose mobsim was started.
    pub iterations_started: u32,
    /// Last iteration started, `None` if the run stopped before the first.
    pub last_iteration:     Option<u32>,
    pub output_directory:   PathBuf,
}

/// A host simulation engine.
///
/// `Scenario` is whatever decision variables mutate before a run (network,
/// facilities, population parameters…); it is opaque here.
pub trait Controler {
    type Scenario;

    fn config(&self) -> &ControlerConfig;

    fn config_mut(&mut self) -> &mut ControlerConfig;

    fn scenario_mut(&mut self) -> &mut Self::Scenario;

    /// Execute one complete run, driving `listener` through its lifecycle.
    fn run(&mut self, listener: &mut dyn ControlerListener) -> ControlResult<RunSummary>;
}
