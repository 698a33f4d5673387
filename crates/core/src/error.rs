//! # Error Module
//!
//! Định nghĩa các domain errors cho Cashdesk sử dụng thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Chỉ gồm các lỗi làm hỏng một thao tác (tạo account, thêm vào registry).
/// Các kết quả validation như số tiền âm hay không đủ tiền không phải lỗi,
/// chúng được trả về trong [`crate::Outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Validation errors ===
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid account number: {0:?}")]
    InvalidAccountNumber(String),

    // === Registry errors ===
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // === Variant errors ===
    #[error("Operation '{operation}' is not supported by {account_type}")]
    UnsupportedOperation {
        operation: &'static str,
        account_type: &'static str,
    },
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Tạo InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
