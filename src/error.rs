use thiserror::Error;

/// Errors from reading bars or chart configs before indicators run.
///
/// Indicator functions themselves never fail: short input gives short output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognised bar time '{time}'")]
    InvalidTime { time: String },
}

pub type Result<T> = std::result::Result<T, Error>;
