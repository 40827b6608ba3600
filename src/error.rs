use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid request descriptor: {0}")]
    Descriptor(#[source] serde_json::Error),
    #[error("invalid header '{0}': expected 'Name: value'")]
    InvalidHeader(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
