use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type DetectResult<T> = Result<T, DetectError>;
