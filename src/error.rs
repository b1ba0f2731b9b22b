use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: cannot parse coordinate {value:?}")]
    Parse { line: u64, value: String },

    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CurveError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CurveError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CurveError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, CurveError>;
