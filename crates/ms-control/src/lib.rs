//! `ms-control` — the boundary to the host traffic simulation.
//!
//! The host engine owns the iteration loop.  This crate describes what it
//! exposes to trajectory extraction and ships one concrete engine,
//! [`ReplayControler`], that replays recorded event streams.
//!
//! # Run lifecycle
//!
//! ```text
//! notify_startup
//! for iteration in first..=last:
//!   ① continue_iterations(iteration)?   — early termination, once per iteration
//!   ② notify_before_mobsim(iteration)   — iteration boundary
//!   ③ handle_event(e) for each event    — the day's mobsim, in time order
//!   ④ iteration summary row written
//! notify_shutdown
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`config`]     | `ControlerConfig`, `OverwritePolicy`                     |
//! | [`listener`]   | `ControlerListener` trait, `ControlerContext`            |
//! | [`controler`]  | `Controler` trait, `RunSummary`                          |
//! | [`replay`]     | `ReplayControler<S>`                                     |
//! | [`output`]     | `IterationSummaryWriter` (`iteration_summaries.csv`)     |
//! | [`error`]      | `ControlError`, `ControlResult<T>`                       |

pub mod config;
pub mod controler;
pub mod error;
pub mod listener;
pub mod output;
pub mod replay;


pub use config::{ControlerConfig, OverwritePolicy};
pub use controler::{Controler, RunSummary};
pub use error::{ControlError, ControlResult};
pub use listener::{ControlerContext, ControlerListener, NoopListener};
pub use output::IterationSummaryWriter;
pub use replay::ReplayControler;
