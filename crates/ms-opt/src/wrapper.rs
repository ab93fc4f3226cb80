//! `SimulationWrapper` — repeated runs of one host engine on behalf of an
//! optimizer's outer search loop.

use std::path::{Path, PathBuf};

use log::info;

use ms_analysis::{AnalyzerSet, MacroStateAnalyzer};
use ms_control::Controler;

use crate::{
    BeforeExtractionHook, CombineMode, DecisionVariable, OptError, OptResult, PlainStateFactory,
    SimulatorState, StateFactory, TrajectoryConfig, TrajectoryListener, TrajectorySampler,
};

/// A stochastic simulation the optimizer can run to obtain a final state.
pub trait Simulator<D> {
    /// Run from whatever decision variable is currently implemented.
    fn run(&mut self, sampler: &mut dyn TrajectorySampler<D>) -> OptResult<SimulatorState<D>> {
        self.run_from(sampler, None)
    }

    /// Implement `initial`'s decision variable (if any), then run.
    fn run_from(
        &mut self,
        sampler: &mut dyn TrajectorySampler<D>,
        initial: Option<&SimulatorState<D>>,
    ) -> OptResult<SimulatorState<D>>;
}

/// Owns a host engine and the analyzers that summarize its runs.
///
/// Every run writes into its own directory `<base>_<n>`, where `<base>` is
/// the controler's output directory at construction time and `n` counts the
/// runs this wrapper has attempted.  Takes `&mut self` for every run, so a
/// wrapper is never reentered.
pub struct SimulationWrapper<C: Controler, D> {
    controler:           C,
    analyzers:           AnalyzerSet,
    factory:             Box<dyn StateFactory<D>>,
    hook:                Option<Box<dyn BeforeExtractionHook>>,
    base_output:         PathBuf,
    memory:              usize,
    combine:             CombineMode,
    write_state_vectors: bool,
    completed_runs:      u32,
}

impl<C: Controler, D> SimulationWrapper<C, D> {
    /// Take over `controler`.
    ///
    /// Switches off the host's scheduled behavioral changes (innovation and
    /// score averaging never kick in) so that dynamics stay stationary across
    /// the iterations of a run, and points the output at `<base>_0`.
    pub fn new(mut controler: C, config: &TrajectoryConfig) -> OptResult<Self> {
        config.validate()?;
        let base_output = controler.config().output_directory.clone();
        let first = run_directory(&base_output, 0)?;

        let host = controler.config_mut();
        host.fraction_of_iterations_to_disable_innovation = f64::INFINITY;
        host.fraction_of_iterations_to_start_score_msa = f64::INFINITY;
        host.output_directory = first;

        Ok(Self {
            controler,
            analyzers: AnalyzerSet::new(),
            factory: Box::new(PlainStateFactory),
            hook: None,
            base_output,
            memory: config.memory,
            combine: config.combine,
            write_state_vectors: config.write_state_vectors,
            completed_runs: 0,
        })
    }

    /// Register an analyzer.  Its position fixes its slice of every state
    /// vector.
    pub fn add_analyzer(&mut self, analyzer: Box<dyn MacroStateAnalyzer>) -> OptResult<()> {
        self.analyzers.add(analyzer)?;
        Ok(())
    }

    pub fn analyzers(&self) -> &AnalyzerSet {
        &self.analyzers
    }

    pub fn set_state_factory(&mut self, factory: Box<dyn StateFactory<D>>) {
        self.factory = factory;
    }

    pub fn set_before_extraction_hook(&mut self, hook: Box<dyn BeforeExtractionHook>) {
        self.hook = Some(hook);
    }

    /// Runs attempted so far; also the index of the next run directory.
    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    pub fn controler(&self) -> &C {
        &self.controler
    }

    pub fn controler_mut(&mut self) -> &mut C {
        &mut self.controler
    }

    /// Directory the next run will write into.
    pub fn next_output_directory(&self) -> OptResult<PathBuf> {
        run_directory(&self.base_output, self.completed_runs)
    }

    fn execute(&mut self, sampler: &mut dyn TrajectorySampler<D>) -> OptResult<SimulatorState<D>> {
        if self.analyzers.is_empty() {
            return Err(OptError::NoAnalyzers);
        }
        let output = run_directory(&self.base_output, self.completed_runs)?;
        info!("run {} writing to {}", self.completed_runs, output.display());
        self.controler.config_mut().output_directory = output;

        let mut listener = TrajectoryListener::new(
            &mut self.analyzers,
            sampler,
            &*self.factory,
            self.memory,
            self.combine,
        )
        .writing_state_vectors(self.write_state_vectors);
        if let Some(hook) = self.hook.as_deref_mut() {
            listener = listener.with_hook(hook);
        }

        let outcome = self.controler.run(&mut listener);
        // Counted even on failure so a directory is never handed out twice.
        self.completed_runs += 1;
        let summary = outcome?;

        info!(
            "run finished after {} iterations, {} states delivered",
            summary.iterations_started,
            listener.delivered()
        );
        listener.take_final_state().ok_or(OptError::MissingFinalState)
    }
}

impl<C, D> Simulator<D> for SimulationWrapper<C, D>
where
    C: Controler,
    D: DecisionVariable<C::Scenario>,
{
    fn run_from(
        &mut self,
        sampler: &mut dyn TrajectorySampler<D>,
        initial: Option<&SimulatorState<D>>,
    ) -> OptResult<SimulatorState<D>> {
        if let Some(state) = initial {
            state.implement_in_simulation(self.controler.scenario_mut());
        }
        self.execute(sampler)
    }
}

/// `<base>_<index>`, e.g. `out/run` → `out/run_3`.
pub fn run_directory(base: &Path, index: u32) -> OptResult<PathBuf> {
    let normalized: PathBuf = base.components().collect();
    let Some(name) = normalized.file_name() else {
        return Err(OptError::OutputPath(format!("{base:?} does not end in a directory name")));
    };
    let name = format!("{}_{index}", name.to_string_lossy());
    Ok(normalized.with_file_name(name))
}
