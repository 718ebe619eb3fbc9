//! Error types for the surveillance pipeline

use thiserror::Error;

/// Result type alias for the surveillance pipeline
pub type Result<T> = std::result::Result<T, VigilanceError>;

/// Errors that can occur around the tracking core
#[derive(Error, Debug)]
pub enum VigilanceError {
    #[error("Frame capture failed: {0}")]
    CaptureError(String),

    #[error("Detection failed: {0}")]
    DetectorError(String),

    #[error("Plate recognition failed: {0}")]
    PlateReadError(String),

    #[error("Plate storage failed: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VigilanceError {
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Self::CaptureError(msg.into())
    }

    pub fn detector<S: Into<String>>(msg: S) -> Self {
        Self::DetectorError(msg.into())
    }

    pub fn plate_read<S: Into<String>>(msg: S) -> Self {
        Self::PlateReadError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }
}
