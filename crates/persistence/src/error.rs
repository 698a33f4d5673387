//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping IO và serde_json errors.

use cashdesk_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === File errors ===
    #[error("Account file IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Account file serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // === Content errors ===
    #[error("Unsupported account file version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Corrupt account file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Kiểm tra nội dung file có hỏng không (JSON sai hoặc dữ liệu không hợp lệ)
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_) | Self::Corrupt { .. } | Self::UnsupportedVersion { .. }
        )
    }
}
