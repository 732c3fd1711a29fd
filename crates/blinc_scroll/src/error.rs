//! Scroll error types

use thiserror::Error;

/// Errors reported by the scroll engine.
///
/// Most invalid input is normalized or ignored; only values handed back by a
/// caller for restoration are rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    /// Restore info is not a decimal number
    #[error("Invalid restore info: {0:?}")]
    InvalidRestoreInfo(String),

    /// Restore info parsed to NaN or infinity
    #[error("Restore offset is not finite: {0}")]
    NonFiniteRestoreOffset(f32),
}

/// Result type for scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;
