//! Presentation of account outcomes as operator-facing text

use cashdesk_core::{Movement, Outcome, Rejection};
use rust_decimal::Decimal;

/// Render an amount without trailing zeros
pub fn amount(value: Decimal) -> Decimal {
    value.normalize()
}

/// Lines describing a deposit/withdraw/interest outcome
pub fn outcome(outcome: &Outcome) -> Vec<String> {
    let mut lines = Vec::new();

    match &outcome.movement {
        Movement::Deposited {
            amount: deposited,
            cash_used,
            external_funds,
            debt_paid,
        } => {
            if external_funds.is_zero() {
                lines.push(format!(
                    "Deposited {} from cash on hand.",
                    amount(*deposited)
                ));
            } else {
                lines.push(format!(
                    "Deposited {}: cash used {}, external funds added {}.",
                    amount(*deposited),
                    amount(*cash_used),
                    amount(*external_funds)
                ));
            }
            if let Some(debt) = debt_paid {
                lines.push(format!("Debt paid off: {}.", amount(*debt)));
            }
        }
        Movement::Withdrawn { amount: withdrawn } => {
            lines.push(format!("Withdrew {}.", amount(*withdrawn)));
        }
        Movement::Rejected(rejection) => lines.push(self::rejection(rejection)),
        Movement::InterestOnly => {
            if outcome.interest.is_none() && outcome.interest_rejected.is_none() {
                lines.push("No interest accrued: balance is not positive.".to_string());
            }
        }
    }

    if let Some(interest) = outcome.interest {
        lines.push(format!("Interest accrued: {}.", amount(interest)));
    }
    if let Some(rejection) = &outcome.interest_rejected {
        lines.push(self::rejection(rejection));
    }

    lines.push(format!(
        "Balance: {}. Cash on hand: {}.",
        amount(outcome.balance),
        amount(outcome.cash_on_hand)
    ));
    lines
}

/// Message for a rejected operation
pub fn rejection(rejection: &Rejection) -> String {
    match rejection {
        Rejection::NonPositiveAmount { .. } => "Amount must be greater than 0.".to_string(),
        Rejection::InsufficientFunds {
            requested,
            available,
        } => format!(
            "Insufficient funds: requested {}, available {}.",
            amount(*requested),
            amount(*available)
        ),
        Rejection::CreditLimitExceeded {
            requested,
            available,
        } => format!(
            "Credit limit exceeded: requested {}, available {}. Operation cancelled.",
            amount(*requested),
            amount(*available)
        ),
        Rejection::AmountOverflow { amount: requested } => format!(
            "Amount {} is too large for this account. Operation cancelled.",
            amount(*requested)
        ),
        Rejection::InterestOverflow { interest_rate } => format!(
            "Interest at {}% is too large for this account. No interest accrued.",
            amount(*interest_rate)
        ),
    }
}
