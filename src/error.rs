//! Errors raised while building or loading levels and their tuning
//!
//! `step` itself never fails: death and completion are outcomes, not errors.

/// Alias for `Result<T, LevelError>`.
pub type LevelResult<T> = Result<T, LevelError>;

/// Errors that can occur when loading the level catalog or a level.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The requested level number is outside `[1, count]`.
    #[error("invalid level {level}: catalog has levels 1..={count}")]
    InvalidLevel {
        /// The requested level number.
        level: u32,
        /// Number of levels in the catalog.
        count: u32,
    },

    /// An obstacle descriptor is missing a required field or fails validation.
    #[error("malformed template in level {level}, obstacle {index}: {reason}")]
    MalformedTemplate {
        /// 1-based level number.
        level: u32,
        /// 0-based obstacle index within the level.
        index: usize,
        /// What was wrong with the descriptor.
        reason: String,
    },

    /// The catalog contains no levels at all.
    #[error("level catalog is empty")]
    EmptyCatalog,

    /// A tuning override is out of range.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// The document is not JSON of the expected outer shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
