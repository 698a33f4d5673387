//! File record definitions
//!
//! Record types cho file JSON. Mỗi account được tag bằng `kind`
//! (`basic` / `savings` / `checking`), Decimal được lưu dạng string.

use cashdesk_core::{Account, AccountKind, AccountNumber, CoreResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Phiên bản định dạng file hiện tại
pub const FILE_VERSION: u32 = 1;

/// Nội dung của file account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFile {
    pub version: u32,
    /// Thời điểm lưu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
}

impl AccountFile {
    pub fn new(accounts: Vec<AccountRecord>) -> Self {
        Self {
            version: FILE_VERSION,
            saved_at: Some(Utc::now()),
            accounts,
        }
    }
}

/// Record của một account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountRecord {
    Basic {
        number: AccountNumber,
        balance: Decimal,
        cash_on_hand: Decimal,
    },
    Savings {
        number: AccountNumber,
        balance: Decimal,
        cash_on_hand: Decimal,
        interest_rate: Decimal,
    },
    Checking {
        number: AccountNumber,
        balance: Decimal,
        cash_on_hand: Decimal,
        credit_limit: Decimal,
    },
}

impl AccountRecord {
    /// Chuyển record thành Account (có validate)
    pub fn into_account(self) -> CoreResult<Account> {
        match self {
            AccountRecord::Basic {
                number,
                balance,
                cash_on_hand,
            } => Account::restore(number, balance, cash_on_hand, AccountKind::Basic),
            AccountRecord::Savings {
                number,
                balance,
                cash_on_hand,
                interest_rate,
            } => Account::restore(
                number,
                balance,
                cash_on_hand,
                AccountKind::Savings { interest_rate },
            ),
            AccountRecord::Checking {
                number,
                balance,
                cash_on_hand,
                credit_limit,
            } => Account::restore(
                number,
                balance,
                cash_on_hand,
                AccountKind::Checking { credit_limit },
            ),
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        let number = account.number().clone();
        let balance = account.balance();
        let cash_on_hand = account.cash_on_hand();

        match *account.kind() {
            AccountKind::Basic => AccountRecord::Basic {
                number,
                balance,
                cash_on_hand,
            },
            AccountKind::Savings { interest_rate } => AccountRecord::Savings {
                number,
                balance,
                cash_on_hand,
                interest_rate,
            },
            AccountKind::Checking { credit_limit } => AccountRecord::Checking {
                number,
                balance,
                cash_on_hand,
                credit_limit,
            },
        }
    }
}
