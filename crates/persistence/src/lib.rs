//! # Cashdesk Persistence
//!
//! Persistence layer cho Cashdesk - lưu danh sách account vào một file JSON.
//!
//! ## File format
//!
//! ```text
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-19T08:00:00Z",
//!   "accounts": [
//!     { "kind": "basic",    "number": "000-000-001", "balance": "70", "cash_on_hand": "30" },
//!     { "kind": "savings",  "number": "123-456-789", "balance": "1000", "cash_on_hand": "0", "interest_rate": "5" },
//!     { "kind": "checking", "number": "999-999-999", "balance": "-150", "cash_on_hand": "150", "credit_limit": "200" }
//!   ]
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cashdesk_persistence::AccountStore;
//!
//! let store = AccountStore::new("data/accounts.json");
//! let report = store.load();
//! if let Some(err) = &report.error {
//!     println!("Failed to load accounts: {err}");
//! }
//! store.save(&report.registry)?;
//! ```

pub mod error;
pub mod record;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use record::{AccountFile, AccountRecord, FILE_VERSION};
pub use store::{AccountStore, LoadReport};
