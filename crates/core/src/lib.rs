//! # Cashdesk Core
//!
//! Core domain types cho Cashdesk - mô phỏng tài khoản ngân hàng.
//!
//! ## Modules
//! - `number`: Chuẩn hóa số tài khoản `XXX-XXX-XXX`
//! - `account`: Account (Basic, Savings, Checking) và các thao tác
//! - `registry`: AccountRegistry - danh sách account của phiên làm việc
//! - `error`: Domain errors
//!
//! ## Example
//! ```
//! use cashdesk_core::{Account, AccountRegistry};
//! use rust_decimal_macros::dec;
//!
//! let mut registry = AccountRegistry::new();
//! registry.add(Account::checking("42", dec!(0), dec!(200)).unwrap()).unwrap();
//!
//! let account = registry.find_mut("000-000-042").unwrap();
//! let outcome = account.withdraw(dec!(150));
//! assert!(!outcome.is_rejected());
//! assert_eq!(account.balance(), dec!(-150));
//! ```

pub mod account;
pub mod error;
pub mod number;
pub mod registry;

// Re-exports
pub use account::{Account, AccountKind, AccountType, Movement, Outcome, Rejection};
pub use error::{CoreError, CoreResult};
pub use number::{format_account_number, AccountNumber};
pub use registry::AccountRegistry;
