//! `state_vectors.csv` — the delivered trajectory, one row per element.
//!
//! Long format (`iteration,index,value`) because the dimension of an
//! analyzer without a link filter may grow between iterations.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use ms_core::StateVector;

use crate::OptResult;

pub const STATE_VECTORS_FILE: &str = "state_vectors.csv";

pub struct StateVectorWriter {
    writer:   Writer<File>,
    rows:     u64,
    finished: bool,
}

impl StateVectorWriter {
    /// Create `state_vectors.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OptResult<Self> {
        let mut writer = Writer::from_path(dir.join(STATE_VECTORS_FILE))?;
        writer.write_record(["iteration", "index", "value"])?;
        Ok(Self { writer, rows: 0, finished: false })
    }

    pub fn write(&mut self, iteration: u32, vector: &StateVector) -> OptResult<()> {
        let iteration = iteration.to_string();
        for (index, value) in vector.as_slice().iter().enumerate() {
            self.writer.write_record(&[iteration.clone(), index.to_string(), value.to_string()])?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Element rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush the file.  Idempotent.
    pub fn finish(&mut self) -> OptResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
