use ms_analysis::AnalysisError;
use ms_control::ControlError;
use ms_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptError {
    #[error("no macro-state analyzers configured")]
    NoAnalyzers,

    #[error("trajectory window is empty")]
    EmptyWindow,

    #[error("hook called while listener is {0}")]
    OutOfSequence(&'static str),

    #[error("run finished without a final state")]
    MissingFinalState,

    #[error("cannot derive run output directory: {0}")]
    OutputPath(String),

    #[error("trajectory configuration error: {0}")]
    Config(String),

    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Control(ControlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type OptResult<T> = Result<T, OptError>;

/// Listener failures cross the host engine boundary boxed.
impl From<OptError> for ControlError {
    fn from(e: OptError) -> Self {
        match e {
            OptError::Control(inner) => inner,
            other => ControlError::Listener(Box::new(other)),
        }
    }
}

/// Unwraps errors that originated in a trajectory listener.
impl From<ControlError> for OptError {
    fn from(e: ControlError) -> Self {
        match e {
            ControlError::Listener(source) => match source.downcast::<OptError>() {
                Ok(opt) => *opt,
                Err(other) => OptError::Control(ControlError::Listener(other)),
            },
            other => OptError::Control(other),
        }
    }
}
