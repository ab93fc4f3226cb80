//! `ms-analysis` — turns a vehicle event stream into macro-state vectors.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`counter`]   | `OccupancyCounter<K>` — per-key, per-bin occupancy tallies     |
//! | [`occupancy`] | `LinkOccupancyAnalyzer` — one counter per tracked mode         |
//! | [`entry`]     | `LinkEntryAnalyzer` — link entries per bin                     |
//! | [`analyzer`]  | `MacroStateAnalyzer` trait, ordered `AnalyzerSet`              |
//! | [`error`]     | `AnalysisError`, `AnalysisResult<T>`                           |
//!
//! # Iteration protocol
//!
//! ```text
//! clear()                      ← analyzers start empty
//! handle_event(e) for each e   ← one simulated day, timestamps non-decreasing
//! new_state_vector()           ← fixed-dimension summary of that day
//! clear()                      ← ready for the next day
//! ```
//!
//! Everything here is single-threaded: the host engine calls analyzers
//! synchronously from its event dispatch loop.

pub mod analyzer;
pub mod counter;
pub mod entry;
pub mod error;
pub mod occupancy;

#[cfg(test)]
mod tests;

pub use analyzer::{AnalyzerSet, MacroStateAnalyzer};
pub use counter::OccupancyCounter;
pub use entry::LinkEntryAnalyzer;
pub use error::{AnalysisError, AnalysisResult};
pub use occupancy::LinkOccupancyAnalyzer;
