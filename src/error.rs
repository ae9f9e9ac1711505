use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("complexity of an empty sequence is undefined")]
    EmptyInput,

    #[error("invalid decay rate: {rate} (must be in 1..=13)")]
    InvalidRate { rate: u32 },

    #[error("search corpus is empty")]
    EmptyCorpus,

    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
