//! The host engine's mutable run configuration.

use std::path::PathBuf;

use crate::{ControlError, ControlResult};

/// What to do when a run's output directory already exists.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverwritePolicy {
    /// Refuse to start the run.
    #[default]
    FailIfExists,
    /// Write into the existing directory, replacing files of the same name.
    Overwrite,
    /// Remove the directory first.
    DeleteIfExists,
}

/// Run configuration read and mutated by the trajectory layer.
///
/// The two `fraction_*` fields schedule behavioral changes over the
/// iterations of one run (innovation switched off, score averaging switched
/// on).  `f64::INFINITY` disables the change entirely.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlerConfig {
    /// Where this run writes its output.
    pub output_directory: PathBuf,

    pub first_iteration: u32,

    /// Inclusive.
    pub last_iteration: u32,

    /// Fraction of the iteration range after which plan innovation stops.
    pub fraction_of_iterations_to_disable_innovation: f64,

    /// Fraction of the iteration range after which scores are averaged.
    pub fraction_of_iterations_to_start_score_msa: f64,

    pub overwrite: OverwritePolicy,
}

impl ControlerConfig {
    pub fn validate(&self) -> ControlResult<()> {
        if self.last_iteration < self.first_iteration {
            return Err(ControlError::Config(format!(
                "last iteration {} precedes first iteration {}",
                self.last_iteration, self.first_iteration
            )));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(ControlError::Config("output directory is empty".into()));
        }
        Ok(())
    }

    /// `true` while plan innovation is still scheduled at `iteration`.
    pub fn innovation_enabled(&self, iteration: u32) -> bool {
        iteration < self.switch_iteration(self.fraction_of_iterations_to_disable_innovation)
    }

    /// `true` once score averaging is scheduled at `iteration`.
    pub fn score_averaging_enabled(&self, iteration: u32) -> bool {
        iteration >= self.switch_iteration(self.fraction_of_iterations_to_start_score_msa)
    }

    /// First iteration at which a fraction-scheduled switch applies.
    fn switch_iteration(&self, fraction: f64) -> u32 {
        if !fraction.is_finite() {
            return u32::MAX;
        }
        let span = self.last_iteration.saturating_sub(self.first_iteration) as f64;
        let offset = (fraction.max(0.0) * span).ceil();
        self.first_iteration.saturating_add(offset.min(u32::MAX as f64) as u32)
    }
}

impl Default for ControlerConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("./output"),
            first_iteration: 0,
            last_iteration: 1_000,
            fraction_of_iterations_to_disable_innovation: 0.8,
            fraction_of_iterations_to_start_score_msa: 0.8,
            overwrite: OverwritePolicy::default(),
        }
    }
}
