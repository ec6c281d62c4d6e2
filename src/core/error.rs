use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaqwimError {
    #[error("Path data error: {0}")]
    PathData(String),

    #[error("Raster error: {0}")]
    Raster(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaqwimError>;
