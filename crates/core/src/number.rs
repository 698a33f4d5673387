//! # Account Number Module
//!
//! Định dạng số tài khoản về dạng chuẩn `XXX-XXX-XXX`.
//! Dạng chuẩn là khóa duy nhất cho mọi thao tác tìm kiếm trong registry.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Số chữ số tối thiểu sau khi pad
const MIN_DIGITS: usize = 9;

/// Chuẩn hóa số tài khoản thô.
///
/// - Bỏ toàn bộ dấu `-`
/// - Pad `'0'` bên trái đến tối thiểu 9 ký tự
/// - Chèn lại dấu `-` sau nhóm 3 thứ nhất và thứ hai; phần còn lại
///   (có thể dài hơn 3) nối vào sau nhóm thứ hai
///
/// # Examples
/// ```
/// use cashdesk_core::format_account_number;
///
/// assert_eq!(format_account_number("12345").unwrap(), "000-012-345");
/// assert_eq!(format_account_number("123-456-789").unwrap(), "123-456-789");
/// ```
pub fn format_account_number(raw: &str) -> CoreResult<String> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::InvalidAccountNumber(raw.to_string()));
    }

    let padded = format!("{:0>width$}", digits, width = MIN_DIGITS);
    Ok(format!("{}-{}-{}", &padded[..3], &padded[3..6], &padded[6..]))
}

/// Số tài khoản ở dạng chuẩn.
///
/// Chỉ tạo được qua [`format_account_number`], nên giá trị bên trong
/// luôn ở dạng chuẩn, kể cả khi deserialize từ file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Parse và chuẩn hóa số tài khoản
    pub fn parse(raw: &str) -> CoreResult<Self> {
        format_account_number(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for AccountNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccountNumber {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for AccountNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
