use thiserror::Error;

/// Errors raised while configuring or running the lane counter.
#[derive(Error, Debug)]
pub enum Error {
    /// A frame size was zero, negative or not finite.
    #[error("Invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// A lane whose two endpoints coincide. `lane` is the 0-based index.
    #[error("Invalid geometry for lane {}: endpoints coincide", .lane + 1)]
    InvalidLaneGeometry { lane: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for laneflow operations.
pub type Result<T> = std::result::Result<T, Error>;
