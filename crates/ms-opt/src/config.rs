//! `TrajectoryConfig` — the optimizer-facing configuration group.
//!
//! ```json
//! {
//!   "start_time": 0, "bin_size": 3600, "bin_count": 24,
//!   "memory": 2, "combine": "average",
//!   "modes": ["car", "ride"], "links": [1, 2, 3]
//! }
//! ```
//!
//! Every field is optional, except that `links` must be non-empty once
//! `modes` is.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use ms_analysis::LinkOccupancyAnalyzer;
use ms_core::{LinkId, TimeDiscretization, TransportMode};

use crate::{CombineMode, OptError, OptResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Start of bin 0, seconds.
    pub start_time: i64,
    /// Bin width, seconds.
    pub bin_size:   u32,
    pub bin_count:  usize,

    /// Instantaneous vectors kept in the trajectory window.
    pub memory:              usize,
    pub combine:             CombineMode,
    /// Write `state_vectors.csv` into each run directory.
    pub write_state_vectors: bool,

    /// Modes for the occupancy analyzer; empty disables it.
    pub modes: Vec<TransportMode>,
    /// Tracked links in vector order.  Fixes the analyzer's dimension, so
    /// list every link of interest up front.
    pub links: Vec<LinkId>,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            start_time:          0,
            bin_size:            3600,
            bin_count:           24,
            memory:              1,
            combine:             CombineMode::Concatenate,
            write_state_vectors: false,
            modes:               Vec::new(),
            links:               Vec::new(),
        }
    }
}

impl TrajectoryConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> OptResult<Self> {
        let config: TrajectoryConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: &Path) -> OptResult<Self> {
        Self::from_json_reader(BufReader::new(File::open(path)?))
    }

    pub fn validate(&self) -> OptResult<()> {
        if self.memory == 0 {
            return Err(OptError::Config("memory must be at least 1".into()));
        }
        if !self.modes.is_empty() && self.links.is_empty() {
            return Err(OptError::Config("modes are configured but no links are".into()));
        }
        self.time_discretization()?;
        Ok(())
    }

    pub fn time_discretization(&self) -> OptResult<TimeDiscretization> {
        Ok(TimeDiscretization::new(self.start_time, self.bin_size, self.bin_count)?)
    }

    /// The occupancy analyzer this configuration describes, or `None` when
    /// no modes are configured.
    pub fn occupancy_analyzer(&self) -> OptResult<Option<LinkOccupancyAnalyzer>> {
        if self.modes.is_empty() {
            return Ok(None);
        }
        self.validate()?;
        Ok(Some(LinkOccupancyAnalyzer::new(
            self.time_discretization()?,
            self.modes.iter().copied(),
            self.links.iter().copied(),
        )))
    }
}
