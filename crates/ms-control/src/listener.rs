//! Lifecycle hooks the host engine calls during one run.

use std::path::Path;

use ms_core::VehicleEvent;

use crate::ControlResult;

/// Read-only run facts handed to startup and shutdown hooks.
#[derive(Copy, Clone, Debug)]
pub struct ControlerContext<'a> {
    pub output_directory: &'a Path,
    pub first_iteration:  u32,
    pub last_iteration:   u32,
}

/// Callbacks invoked by [`Controler::run`][crate::Controler::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  A hook returning `Err` aborts the run;
/// the host surfaces the error from `run`.
///
/// Hooks are called from a single thread, strictly in the order described in
/// the crate docs.  `handle_event` receives every event of the iteration
/// that was announced by the preceding `notify_before_mobsim`.
pub trait ControlerListener {
    /// Called once before the first iteration.
    fn notify_startup(&mut self, _ctx: &ControlerContext<'_>) -> ControlResult<()> {
        Ok(())
    }

    /// Called at each iteration boundary, before the iteration's events.
    fn notify_before_mobsim(&mut self, _iteration: u32) -> ControlResult<()> {
        Ok(())
    }

    /// Called for each event of the current iteration.
    fn handle_event(&mut self, _event: &VehicleEvent) -> ControlResult<()> {
        Ok(())
    }

    /// Early-termination predicate, evaluated once before every iteration.
    fn continue_iterations(&self, _iteration: u32) -> bool {
        true
    }

    /// Called once after the last iteration (or after early termination).
    fn notify_shutdown(&mut self, _ctx: &ControlerContext<'_>) -> ControlResult<()> {
        Ok(())
    }
}

/// A [`ControlerListener`] that does nothing.
pub struct NoopListener;

impl ControlerListener for NoopListener {}
