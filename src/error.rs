use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitPayError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
}

/// Failure of a single call to the external payment rail.
#[derive(Error, Debug)]
pub enum RailError {
    #[error("payment rail credential missing")]
    MissingCredential,
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("invalid transfer request: {0}")]
    InvalidRequest(String),
    #[error("malformed rail response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, SplitPayError>;
