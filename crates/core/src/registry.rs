//! # Registry Module
//!
//! AccountRegistry - danh sách account theo thứ tự thêm vào, khóa bằng
//! số tài khoản dạng chuẩn. Registry sở hữu toàn bộ Account.

use crate::account::Account;
use crate::error::{CoreError, CoreResult};
use crate::number::AccountNumber;

/// Danh sách account của phiên làm việc.
///
/// - Giữ nguyên thứ tự thêm vào
/// - Không có 2 account trùng số tài khoản
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tạo registry từ danh sách đã có (ví dụ đọc từ file)
    pub fn from_accounts(accounts: Vec<Account>) -> CoreResult<Self> {
        let mut registry = Self::new();
        for account in accounts {
            registry.add(account)?;
        }
        Ok(registry)
    }

    /// Thêm account vào cuối danh sách.
    ///
    /// # Errors
    /// `DuplicateAccount` nếu số tài khoản đã tồn tại
    pub fn add(&mut self, account: Account) -> CoreResult<()> {
        if self.position(account.number()).is_some() {
            return Err(CoreError::DuplicateAccount(account.number().to_string()));
        }
        tracing::debug!(account = %account.number(), "Account registered");
        self.accounts.push(account);
        Ok(())
    }

    /// Tìm account theo số tài khoản (chuẩn hóa trước khi so sánh).
    /// Số không hợp lệ được coi như không tìm thấy.
    pub fn find(&self, number: &str) -> Option<&Account> {
        let number = AccountNumber::parse(number).ok()?;
        self.position(&number).map(|idx| &self.accounts[idx])
    }

    /// Tìm mutable account theo số tài khoản
    pub fn find_mut(&mut self, number: &str) -> Option<&mut Account> {
        let number = AccountNumber::parse(number).ok()?;
        let idx = self.position(&number)?;
        self.accounts.get_mut(idx)
    }

    /// Lấy account, trả về lỗi `AccountNotFound` nếu không có
    pub fn get_mut(&mut self, number: &str) -> CoreResult<&mut Account> {
        let canonical = AccountNumber::parse(number)
            .map(|n| n.to_string())
            .unwrap_or_else(|_| number.trim().to_string());
        self.find_mut(number)
            .ok_or(CoreError::AccountNotFound(canonical))
    }

    /// Xóa và trả về account
    pub fn remove(&mut self, number: &str) -> Option<Account> {
        let number = AccountNumber::parse(number).ok()?;
        let idx = self.position(&number)?;
        let account = self.accounts.remove(idx);
        tracing::debug!(account = %account.number(), "Account removed");
        Some(account)
    }

    /// Duyệt các account theo thứ tự thêm vào. Có thể gọi lại nhiều lần.
    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.find(number).is_some()
    }

    fn position(&self, number: &AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|a| a.number() == number)
    }
}

impl<'a> IntoIterator for &'a AccountRegistry {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
