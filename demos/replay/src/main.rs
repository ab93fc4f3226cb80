//! replay — end-to-end demo of macro-state trajectory extraction.
//!
//! A three-link corridor is driven by a synthetic host engine: every
//! iteration, commuters pick car or ride depending on the toll currently
//! implemented in the scenario.  The occupancy analyzer and a link entry
//! counter summarize each iteration; a toy sampler stops the run once two
//! consecutive states are close.  The outer loop evaluates a few tolls.
//!
//! ```text
//! RUST_LOG=info cargo run -p replay [-- trajectory.json]
//! ```

mod corridor;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;

use ms_analysis::LinkEntryAnalyzer;
use ms_control::{ControlerConfig, OverwritePolicy, ReplayControler};
use ms_core::{LinkId, StateVector, TransportMode};
use ms_opt::{
    DecisionVariable, SimulationWrapper, Simulator, SimulatorState, TrajectoryConfig,
    TrajectorySampler,
};

use corridor::{CORRIDOR, Corridor, corridor_day};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:     &str = "output/replay";
const LAST_ITERATION: u32  = 30;
const TOLLS:          [u32; 4] = [0, 2, 4, 8];
/// Mean absolute change per element below which a run counts as stationary.
const TOLERANCE:      f64 = 0.25;

const TRAJECTORY_JSON: &str = r#"{
    "start_time": 21600,
    "bin_size": 900,
    "bin_count": 16,
    "memory": 2,
    "combine": "average",
    "write_state_vectors": true,
    "modes": ["car", "ride"],
    "links": [1, 2, 3]
}"#;

// ── Decision variable ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
struct Toll(u32);

impl DecisionVariable<Corridor> for Toll {
    fn implement_in_simulation(&self, scenario: &mut Corridor) {
        scenario.toll = self.0;
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

/// Declares a solution once consecutive states differ by less than
/// `TOLERANCE` per element.
struct StationarySampler {
    toll:      Toll,
    previous:  Option<StateVector>,
    delivered: u32,
    converged: bool,
}

impl StationarySampler {
    fn new(toll: Toll) -> Self {
        Self { toll, previous: None, delivered: 0, converged: false }
    }
}

impl TrajectorySampler<Toll> for StationarySampler {
    fn after_iteration(&mut self, state: SimulatorState<Toll>) {
        self.delivered += 1;
        let current = state.vector();
        if let Some(previous) = &self.previous {
            if previous.len() == current.len() && !current.is_empty() {
                let change: f64 = previous
                    .as_slice()
                    .iter()
                    .zip(current.as_slice())
                    .map(|(a, b)| (a - b).abs())
                    .sum();
                self.converged = change / (current.len() as f64) < TOLERANCE;
            }
        }
        self.previous = Some(current.clone());
    }

    fn found_solution(&self) -> bool {
        self.converged
    }

    fn current_decision_variable(&self) -> Toll {
        self.toll
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let trajectory = match std::env::args().nth(1) {
        Some(path) => TrajectoryConfig::from_json_path(Path::new(&path))?,
        None => TrajectoryConfig::from_json_reader(TRAJECTORY_JSON.as_bytes())?,
    };
    println!("=== replay — macro-state trajectories on a {}-link corridor ===", CORRIDOR.len());
    println!(
        "Bins: {} × {} s  |  memory: {}  |  combine: {:?}",
        trajectory.bin_count, trajectory.bin_size, trajectory.memory, trajectory.combine
    );
    println!();

    let host_config = ControlerConfig {
        output_directory: Path::new(OUTPUT_DIR).join("run"),
        first_iteration: 0,
        last_iteration: LAST_ITERATION,
        overwrite: OverwritePolicy::DeleteIfExists,
        ..ControlerConfig::default()
    };
    let host = ReplayControler::new(host_config, Corridor::default(), corridor_day);

    let mut sim: SimulationWrapper<_, Toll> = SimulationWrapper::new(host, &trajectory)?;
    if let Some(occupancy) = trajectory.occupancy_analyzer()? {
        sim.add_analyzer(Box::new(occupancy))?;
    }
    sim.add_analyzer(Box::new(
        LinkEntryAnalyzer::new(trajectory.time_discretization()?, [LinkId(2)])
            .with_id("corridorEntries"),
    ))?;
    println!("Analyzers: {:?} (dimension {})", sim.analyzers(), sim.analyzers().dimension());
    println!();

    let t0 = Instant::now();
    let mut finals: Vec<(u32, Vec<f64>)> = Vec::new();

    println!("{:<6} {:<10} {:<10} {:<12} {:<12}", "Toll", "Delivered", "Stopped", "Car load", "Ride load");
    println!("{}", "-".repeat(52));
    for toll in TOLLS {
        let initial = SimulatorState::new(StateVector::default(), Toll(toll));
        let mut sampler = StationarySampler::new(Toll(toll));
        let final_state = sim.run_from(&mut sampler, Some(&initial))?;

        let (car, ride) = mode_loads(final_state.vector(), &trajectory);
        println!(
            "{:<6} {:<10} {:<10} {:<12.1} {:<12.1}",
            toll,
            sampler.delivered,
            if sampler.converged { "early" } else { "last" },
            car,
            ride,
        );
        finals.push((toll, final_state.vector().as_slice().to_vec()));
    }
    println!();

    let summary_path = Path::new(OUTPUT_DIR).join("final_states.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&finals)?)?;
    info!("wrote {}", summary_path.display());

    println!("{} runs in {:.3} s", sim.completed_runs(), t0.elapsed().as_secs_f64());
    println!("  per-run output : {OUTPUT_DIR}/run_<n>/");
    println!("  final states   : {}", summary_path.display());

    Ok(())
}

/// Summed occupancy per mode in the occupancy part of `vector`.
fn mode_loads(vector: &StateVector, trajectory: &TrajectoryConfig) -> (f64, f64) {
    let links = trajectory.links.len();
    let per_mode = links * trajectory.bin_count;
    let sum_for = |mode: TransportMode| -> f64 {
        let Some(slot) = trajectory.modes.iter().position(|&m| m == mode) else {
            return 0.0;
        };
        let start = slot * per_mode;
        vector.as_slice().get(start..start + per_mode).map_or(0.0, |s| s.iter().sum())
    };
    (sum_for(TransportMode::Car), sum_for(TransportMode::Ride))
}
