//! `ReplayControler` — a host engine that replays per-iteration event streams.
//!
//! Events for iteration `i` come from an event source closure that sees the
//! current scenario, so a decision variable implemented into the scenario
//! can change what the next run replays.  [`ReplayControler::from_script`]
//! covers the common case of a fixed recording.

use std::fs;
use std::path::Path;

use log::{debug, info};

use ms_core::VehicleEvent;

use crate::{
    ControlError, ControlResult, Controler, ControlerConfig, ControlerContext, ControlerListener,
    IterationSummaryWriter, OverwritePolicy, RunSummary,
};

type EventSource<S> = Box<dyn FnMut(&S, u32) -> Vec<VehicleEvent>>;

/// Replays events into listeners, one iteration at a time.
pub struct ReplayControler<S = ()> {
    config:   ControlerConfig,
    scenario: S,
    source:   EventSource<S>,
    runs:     u32,
}

impl<S> ReplayControler<S> {
    /// Replay whatever `source(scenario, iteration)` returns.
    ///
    /// The returned events must be in non-decreasing time order.
    pub fn new<F>(config: ControlerConfig, scenario: S, source: F) -> Self
    where
        F: FnMut(&S, u32) -> Vec<VehicleEvent> + 'static,
    {
        Self { config, scenario, source: Box::new(source), runs: 0 }
    }

    /// Replay a fixed recording: iteration `i` replays
    /// `script[(i - first_iteration) % script.len()]`.  Each day is sorted by
    /// time (stable, so simultaneous events keep their order).
    pub fn from_script(config: ControlerConfig, scenario: S, script: Vec<Vec<VehicleEvent>>) -> Self {
        let mut script = script;
        for day in &mut script {
            day.sort_by(|a, b| a.time_s().total_cmp(&b.time_s()));
        }
        let first = config.first_iteration;
        Self::new(config, scenario, move |_, iteration| {
            if script.is_empty() {
                return Vec::new();
            }
            let day = (iteration - first) as usize % script.len();
            script[day].clone()
        })
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    /// Runs completed by this controler.
    pub fn completed_runs(&self) -> u32 {
        self.runs
    }
}

impl<S> Controler for ReplayControler<S> {
    type Scenario = S;

    fn config(&self) -> &ControlerConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ControlerConfig {
        &mut self.config
    }

    fn scenario_mut(&mut self) -> &mut S {
        &mut self.scenario
    }

    fn run(&mut self, listener: &mut dyn ControlerListener) -> ControlResult<RunSummary> {
        self.config.validate()?;
        let output_directory = self.config.output_directory.clone();
        prepare_output_directory(&output_directory, self.config.overwrite)?;
        info!("replay run starting in {}", output_directory.display());

        let ctx = ControlerContext {
            output_directory: &output_directory,
            first_iteration:  self.config.first_iteration,
            last_iteration:   self.config.last_iteration,
        };
        let mut summaries = IterationSummaryWriter::new(&output_directory)?;

        listener.notify_startup(&ctx)?;

        let mut started = 0;
        let mut last = None;
        for iteration in self.config.first_iteration..=self.config.last_iteration {
            if !listener.continue_iterations(iteration) {
                info!("termination requested before iteration {iteration}");
                break;
            }
            listener.notify_before_mobsim(iteration)?;

            let events = (self.source)(&self.scenario, iteration);
            for event in &events {
                listener.handle_event(event)?;
            }
            debug!("iteration {iteration}: replayed {} events", events.len());

            summaries.write(
                iteration,
                events.len(),
                self.config.innovation_enabled(iteration),
                self.config.score_averaging_enabled(iteration),
            )?;
            started += 1;
            last = Some(iteration);
        }
        summaries.finish()?;

        listener.notify_shutdown(&ctx)?;
        self.runs += 1;

        Ok(RunSummary { iterations_started: started, last_iteration: last, output_directory })
    }
}

fn prepare_output_directory(dir: &Path, policy: OverwritePolicy) -> ControlResult<()> {
    if dir.exists() {
        match policy {
            OverwritePolicy::FailIfExists => {
                return Err(ControlError::OutputExists(dir.to_path_buf()));
            }
            OverwritePolicy::Overwrite => {}
            OverwritePolicy::DeleteIfExists => fs::remove_dir_all(dir)?,
        }
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
