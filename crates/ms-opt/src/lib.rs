//! `ms-opt` — feeds per-iteration macro-state trajectories to an optimizer.
//!
//! The optimizer treats the host simulation as a black-box stochastic
//! dynamical system: it implements a decision variable, runs the simulation,
//! watches the resulting state trajectory, and says when it has seen enough.
//!
//! ```text
//! events ─▶ AnalyzerSet ─▶ instantaneous vector ─▶ TrajectoryWindow
//!                                                        │ combine
//!                                                        ▼
//!        TrajectorySampler::after_iteration ◀── SimulatorState<D>
//!                 │ found_solution()
//!                 ▼
//!        ControlerListener::continue_iterations ─▶ host stops the run
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`decision`]  | `DecisionVariable<S>`, `CompositeDecisionVariable<D>`         |
//! | [`state`]     | `SimulatorState<D>`, `StateComponents`, `StateFactory<D>`     |
//! | [`sampler`]   | `TrajectorySampler<D>`, `BeforeExtractionHook`                |
//! | [`window`]    | `TrajectoryWindow`, `CombineMode`                             |
//! | [`listener`]  | `TrajectoryListener` — the per-run state machine              |
//! | [`wrapper`]   | `Simulator<D>`, `SimulationWrapper<C, D>`                     |
//! | [`config`]    | `TrajectoryConfig` (JSON)                                     |
//! | [`output`]    | `StateVectorWriter` (`state_vectors.csv`)                     |
//! | [`error`]     | `OptError`, `OptResult<T>`                                    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let config = TrajectoryConfig::from_json_path(Path::new("trajectory.json"))?;
//! let mut sim = SimulationWrapper::new(controler, &config)?;
//! if let Some(analyzer) = config.occupancy_analyzer()? {
//!     sim.add_analyzer(Box::new(analyzer))?;
//! }
//! let final_state = sim.run(&mut sampler)?;
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod listener;
pub mod output;
pub mod sampler;
pub mod state;
pub mod window;
pub mod wrapper;


pub use config::TrajectoryConfig;
pub use decision::{CompositeDecisionVariable, DecisionVariable};
pub use error::{OptError, OptResult};
pub use listener::{ListenerState, TrajectoryListener};
pub use output::StateVectorWriter;
pub use sampler::{BeforeExtractionHook, TrajectorySampler};
pub use state::{PlainStateFactory, SimulatorState, StateComponents, StateFactory};
pub use window::{CombineMode, TrajectoryWindow};
pub use wrapper::{SimulationWrapper, Simulator};
