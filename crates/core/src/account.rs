//! # Account Module
//!
//! Định nghĩa Account với 3 biến thể (Basic, Savings, Checking) và các
//! thao tác Deposit / Withdraw / ApplyInterest.
//!
//! Mỗi thao tác là một state transition thuần: thay đổi account và trả về
//! [`Outcome`] mô tả chuyện gì đã xảy ra. Việc in thông báo cho người dùng
//! thuộc về tầng presentation (CLI).

use crate::error::{CoreError, CoreResult};
use crate::number::AccountNumber;
use rust_decimal::Decimal;
use std::fmt;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Loại account, dùng làm tag khi lưu file và làm nhãn hiển thị
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Basic,
    Savings,
    Checking,
}

impl AccountType {
    /// Trả về code string cho file lưu trữ
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Basic => "basic",
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }

    /// Nhãn mô tả hiển thị cho người dùng
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Basic => "Basic account",
            AccountType::Savings => "Savings account",
            AccountType::Checking => "Credit-line account",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Phần riêng của từng biến thể
#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    /// Tài khoản thường
    Basic,
    /// Tài khoản tiết kiệm, cộng lãi (theo %) sau mỗi Deposit/Withdraw
    Savings { interest_rate: Decimal },
    /// Tài khoản có hạn mức tín dụng, balance được âm đến `-credit_limit`
    Checking { credit_limit: Decimal },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Basic => AccountType::Basic,
            AccountKind::Savings { .. } => AccountType::Savings,
            AccountKind::Checking { .. } => AccountType::Checking,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        match self {
            AccountKind::Basic => Ok(()),
            AccountKind::Savings { interest_rate } => {
                ensure_non_negative("interest rate", *interest_rate)
            }
            AccountKind::Checking { credit_limit } => {
                ensure_non_negative("credit limit", *credit_limit)
            }
        }
    }
}

/// Lý do một thao tác bị từ chối. Không phải lỗi: state giữ nguyên,
/// chương trình tiếp tục chạy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Số tiền <= 0
    NonPositiveAmount { amount: Decimal },
    /// Basic/Savings: rút nhiều hơn balance
    InsufficientFunds { requested: Decimal, available: Decimal },
    /// Checking: rút vượt quá balance + credit limit
    CreditLimitExceeded { requested: Decimal, available: Decimal },
    /// Số tiền làm balance hoặc tiền mặt vượt quá phạm vi của Decimal
    AmountOverflow { amount: Decimal },
    /// Tiền lãi vượt quá phạm vi của Decimal, balance giữ nguyên
    InterestOverflow { interest_rate: Decimal },
}

/// Tiền đã di chuyển thế nào trong một thao tác
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    Deposited {
        amount: Decimal,
        /// Phần lấy từ tiền mặt
        cash_used: Decimal,
        /// Phần nạp từ nguồn ngoài
        external_funds: Decimal,
        /// Khoản trừ nợ tự động khi balance còn âm sau khi nạp
        debt_paid: Option<Decimal>,
    },
    Withdrawn {
        amount: Decimal,
    },
    Rejected(Rejection),
    /// Chỉ cộng lãi thủ công, không có deposit/withdraw
    InterestOnly,
}

/// Kết quả của một thao tác trên account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub movement: Movement,
    /// Lãi đã cộng (chỉ Savings, khi balance > 0)
    pub interest: Option<Decimal>,
    /// Lý do không cộng được lãi (overflow)
    pub interest_rejected: Option<Rejection>,
    /// Balance sau thao tác
    pub balance: Decimal,
    /// Tiền mặt sau thao tác
    pub cash_on_hand: Decimal,
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self.movement, Movement::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.movement {
            Movement::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Thao tác có thay đổi state của account không
    pub fn changed_state(&self) -> bool {
        matches!(
            self.movement,
            Movement::Deposited { .. } | Movement::Withdrawn { .. }
        ) || self.interest.is_some()
    }
}

/// Tài khoản ngân hàng.
///
/// - `balance`: số dư tại ngân hàng, có thể âm với Checking
/// - `cash_on_hand`: tiền mặt chủ tài khoản đang giữ, không bao giờ âm
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,
    balance: Decimal,
    cash_on_hand: Decimal,
    kind: AccountKind,
}

impl Account {
    /// Tạo Account mới với `cash_on_hand = 0`.
    ///
    /// # Errors
    /// - `InvalidAccountNumber` nếu số tài khoản không hợp lệ
    /// - `InvalidArgument` nếu `initial_balance < 0` hoặc tham số biến thể âm
    pub fn new(number: &str, initial_balance: Decimal, kind: AccountKind) -> CoreResult<Self> {
        let number = AccountNumber::parse(number)?;
        if initial_balance < Decimal::ZERO {
            return Err(CoreError::invalid_argument(format!(
                "initial balance cannot be negative: {}",
                initial_balance
            )));
        }
        kind.validate()?;

        tracing::debug!(
            account = %number,
            kind = kind.account_type().as_str(),
            %initial_balance,
            "Account created"
        );

        Ok(Self {
            number,
            balance: initial_balance,
            cash_on_hand: Decimal::ZERO,
            kind,
        })
    }

    /// Tạo Basic account
    pub fn basic(number: &str, initial_balance: Decimal) -> CoreResult<Self> {
        Self::new(number, initial_balance, AccountKind::Basic)
    }

    /// Tạo Savings account
    pub fn savings(number: &str, initial_balance: Decimal, interest_rate: Decimal) -> CoreResult<Self> {
        Self::new(number, initial_balance, AccountKind::Savings { interest_rate })
    }

    /// Tạo Checking account
    pub fn checking(number: &str, initial_balance: Decimal, credit_limit: Decimal) -> CoreResult<Self> {
        Self::new(number, initial_balance, AccountKind::Checking { credit_limit })
    }

    /// Khôi phục Account từ dữ liệu đã lưu.
    ///
    /// Khác với [`Account::new`], balance âm được chấp nhận (nợ của Checking,
    /// kể cả khi credit limit đã bị hạ thấp hơn khoản nợ).
    pub fn restore(
        number: AccountNumber,
        balance: Decimal,
        cash_on_hand: Decimal,
        kind: AccountKind,
    ) -> CoreResult<Self> {
        ensure_non_negative("cash on hand", cash_on_hand)?;
        kind.validate()?;
        Ok(Self {
            number,
            balance,
            cash_on_hand,
            kind,
        })
    }

    // === Getters ===

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn cash_on_hand(&self) -> Decimal {
        self.cash_on_hand
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn interest_rate(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Savings { interest_rate } => Some(interest_rate),
            _ => None,
        }
    }

    pub fn credit_limit(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Checking { credit_limit } => Some(credit_limit),
            _ => None,
        }
    }

    // === Operations ===

    /// Nạp tiền vào account.
    ///
    /// Dùng tiền mặt trước, thiếu bao nhiêu thì lấy từ nguồn ngoài. Nếu sau đó
    /// balance vẫn âm, trừ nợ thêm `min(-balance, amount)`. Khoản trừ nợ này
    /// tính theo `amount` gốc và cộng dồn lên phần đã nạp ở trên.
    ///
    /// Savings: cộng lãi sau bước nạp, kể cả khi bước nạp bị từ chối.
    pub fn deposit(&mut self, amount: Decimal) -> Outcome {
        let movement = self.deposit_funds(amount);
        self.finish(movement)
    }

    /// Rút tiền, số tiền rút chuyển thành tiền mặt.
    ///
    /// Savings: cộng lãi sau bước rút, kể cả khi bước rút bị từ chối.
    pub fn withdraw(&mut self, amount: Decimal) -> Outcome {
        let movement = self.withdraw_funds(amount);
        self.finish(movement)
    }

    /// Cộng lãi thủ công (chỉ Savings)
    pub fn apply_interest(&mut self) -> CoreResult<Outcome> {
        match self.kind {
            AccountKind::Savings { .. } => Ok(self.finish(Movement::InterestOnly)),
            _ => Err(self.unsupported("apply interest")),
        }
    }

    /// Đặt hạn mức tín dụng mới (chỉ Checking).
    ///
    /// Hạ hạn mức thấp hơn khoản nợ hiện tại vẫn được phép; giới hạn chỉ
    /// được kiểm tra khi rút tiền.
    pub fn set_credit_limit(&mut self, limit: Decimal) -> CoreResult<()> {
        ensure_non_negative("credit limit", limit)?;
        match &mut self.kind {
            AccountKind::Checking { credit_limit } => {
                *credit_limit = limit;
                tracing::debug!(account = %self.number, %limit, "Credit limit updated");
                Ok(())
            }
            _ => Err(self.unsupported("set credit limit")),
        }
    }

    fn deposit_funds(&mut self, amount: Decimal) -> Movement {
        if amount <= Decimal::ZERO {
            return Movement::Rejected(Rejection::NonPositiveAmount { amount });
        }

        let cash_used = if amount <= self.cash_on_hand {
            amount
        } else {
            self.cash_on_hand
        };
        let external_funds = amount - cash_used;
        let Some(mut balance) = self.balance.checked_add(amount) else {
            tracing::warn!(account = %self.number, %amount, "Deposit would overflow balance");
            return Movement::Rejected(Rejection::AmountOverflow { amount });
        };

        let debt_paid = if balance < Decimal::ZERO {
            let debt = (-balance).min(amount);
            balance += debt;
            Some(debt)
        } else {
            None
        };

        self.cash_on_hand -= cash_used;
        self.balance = balance;

        tracing::debug!(
            account = %self.number,
            %amount,
            %cash_used,
            %external_funds,
            balance = %self.balance,
            "Deposit applied"
        );

        Movement::Deposited {
            amount,
            cash_used,
            external_funds,
            debt_paid,
        }
    }

    fn withdraw_funds(&mut self, amount: Decimal) -> Movement {
        if amount <= Decimal::ZERO {
            return Movement::Rejected(Rejection::NonPositiveAmount { amount });
        }

        match self.kind {
            AccountKind::Checking { credit_limit } => {
                // None: balance + limit is beyond Decimal::MAX, so any amount fits
                if let Some(available) = self.balance.checked_add(credit_limit) {
                    if amount > available {
                        return Movement::Rejected(Rejection::CreditLimitExceeded {
                            requested: amount,
                            available,
                        });
                    }
                }
            }
            AccountKind::Basic | AccountKind::Savings { .. } => {
                if amount > self.balance {
                    return Movement::Rejected(Rejection::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
            }
        }

        let (Some(balance), Some(cash_on_hand)) = (
            self.balance.checked_sub(amount),
            self.cash_on_hand.checked_add(amount),
        ) else {
            tracing::warn!(account = %self.number, %amount, "Withdrawal would overflow");
            return Movement::Rejected(Rejection::AmountOverflow { amount });
        };
        self.balance = balance;
        self.cash_on_hand = cash_on_hand;

        tracing::debug!(
            account = %self.number,
            %amount,
            balance = %self.balance,
            "Withdrawal applied"
        );

        Movement::Withdrawn { amount }
    }

    /// Cộng lãi nếu là Savings và balance > 0.
    ///
    /// Overflow trả về `Err`, balance giữ nguyên.
    fn accrue_interest(&mut self) -> Result<Option<Decimal>, Rejection> {
        let AccountKind::Savings { interest_rate } = self.kind else {
            return Ok(None);
        };
        if self.balance <= Decimal::ZERO {
            return Ok(None);
        }

        let accrued = self
            .balance
            .checked_mul(interest_rate)
            .and_then(|v| v.checked_div(HUNDRED))
            .and_then(|interest| Some((interest, self.balance.checked_add(interest)?)));
        let Some((interest, balance)) = accrued else {
            tracing::warn!(account = %self.number, %interest_rate, "Interest would overflow balance");
            return Err(Rejection::InterestOverflow { interest_rate });
        };

        self.balance = balance;
        tracing::debug!(account = %self.number, %interest, "Interest accrued");
        Ok(Some(interest))
    }

    fn finish(&mut self, movement: Movement) -> Outcome {
        let (interest, interest_rejected) = match self.accrue_interest() {
            Ok(interest) => (interest, None),
            Err(rejection) => (None, Some(rejection)),
        };
        Outcome {
            movement,
            interest,
            interest_rejected,
            balance: self.balance,
            cash_on_hand: self.cash_on_hand,
        }
    }

    fn unsupported(&self, operation: &'static str) -> CoreError {
        CoreError::UnsupportedOperation {
            operation,
            account_type: self.account_type().label(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: {}, Number: {}, Balance: {}, Cash on hand: {}",
            self.account_type(),
            self.number,
            self.balance.normalize(),
            self.cash_on_hand.normalize()
        )?;
        match self.kind {
            AccountKind::Basic => Ok(()),
            AccountKind::Savings { interest_rate } => {
                write!(f, ", Interest rate: {}%", interest_rate.normalize())
            }
            AccountKind::Checking { credit_limit } => {
                write!(f, ", Credit limit: {}", credit_limit.normalize())
            }
        }
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> CoreResult<()> {
    if value < Decimal::ZERO {
        return Err(CoreError::invalid_argument(format!(
            "{} cannot be negative: {}",
            field, value
        )));
    }
    Ok(())
}
