//! `iteration_summaries.csv` — one row per executed iteration.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::ControlResult;

pub const ITERATION_SUMMARIES_FILE: &str = "iteration_summaries.csv";

/// Writes per-iteration diagnostics into a run's output directory.
pub struct IterationSummaryWriter {
    writer:   Writer<File>,
    finished: bool,
}

impl IterationSummaryWriter {
    /// Create `iteration_summaries.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> ControlResult<Self> {
        let mut writer = Writer::from_path(dir.join(ITERATION_SUMMARIES_FILE))?;
        writer.write_record(["iteration", "events", "innovation", "score_averaging"])?;
        Ok(Self { writer, finished: false })
    }

    pub fn write(
        &mut self,
        iteration:       u32,
        events:          usize,
        innovation:      bool,
        score_averaging: bool,
    ) -> ControlResult<()> {
        self.writer.write_record(&[
            iteration.to_string(),
            events.to_string(),
            (innovation as u8).to_string(),
            (score_averaging as u8).to_string(),
        ])?;
        Ok(())
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> ControlResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
