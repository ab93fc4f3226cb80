//! `ms-core` — foundational types for macro-state trajectory extraction.
//!
//! This crate is a dependency of every other `ms-*` crate.  It has no `ms-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `LinkId`                                 |
//! | [`time`]        | `TimeDiscretization`                                  |
//! | [`transport`]   | `TransportMode` enum                                  |
//! | [`event`]       | `VehicleEvent` — the movement event stream            |
//! | [`vector`]      | `StateVector` — fixed-dimension macro-state vector    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod event;
pub mod ids;
pub mod time;
pub mod transport;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use event::VehicleEvent;
pub use ids::{LinkId, VehicleId};
pub use time::TimeDiscretization;
pub use transport::TransportMode;
pub use vector::StateVector;
