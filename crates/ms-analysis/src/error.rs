use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("occupancy of {key} would become negative at t={time_s}s")]
    NegativeOccupancy { key: String, time_s: f64 },

    #[error("bin {bin} out of range (bin count {bin_count})")]
    BinOutOfRange { bin: usize, bin_count: usize },

    #[error("analyzer {0:?} already registered")]
    AlreadyRegistered(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
