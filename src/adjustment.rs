use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::terms::TermUnit;

/// how the new due date is derived after a mid-term recompute
///
/// the source behavior adds the remaining-day delta back onto the payment
/// date, which reconstructs the original due date; whether that is the
/// intended semantics is an open business question, so both readings are
/// available as an explicit choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DueDatePolicy {
    /// new due date = payment date + remaining days (keeps the original due date)
    #[default]
    PreserveOriginal,
    /// new due date = payment date + adjusted term periods
    FromAdjustedTerm,
}

/// result of recomputing loan terms after a partial payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTermAdjustment {
    pub original_term: u32,
    pub adjusted_term: u32,
    pub term_unit: TermUnit,
    pub adjustment_reason: String,
    pub new_due_date: DateTime<Utc>,
}

/// revised schedule shape after a partial payment: new per-period payments
/// spread evenly over the remaining window, plus the term adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexibleRepaymentResult {
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub new_daily_payment: Money,
    pub new_weekly_payment: Money,
    pub new_monthly_payment: Money,
    pub remaining_days: u32,
    pub new_due_date: DateTime<Utc>,
    pub adjustment: LoanTermAdjustment,
}

impl FlexibleRepaymentResult {
    /// serialize for display or persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// days left in the repayment window, clamped to at least 1
///
/// payments dated on or after the due date are a distinct late-payment case
/// and are rejected rather than producing a zero or negative window
fn remaining_window_days(
    payment_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
) -> Result<u32> {
    if payment_date >= due_date {
        return Err(EngineError::PaymentWindowClosed { payment_date, due_date });
    }
    let days = (due_date - payment_date).num_days().max(1);
    Ok(days as u32)
}

fn check_adjustment_inputs(
    original_amount: Money,
    remaining_amount: Money,
    original_term: u32,
) -> Result<()> {
    if original_term == 0 {
        return Err(EngineError::InvalidTermCount { count: original_term });
    }
    if !original_amount.is_positive() {
        return Err(EngineError::NonPositiveAmount { amount: original_amount });
    }
    if remaining_amount.is_negative() {
        return Err(EngineError::NegativeRemainingBalance { amount: remaining_amount });
    }
    Ok(())
}

/// ceil(remaining / (original / original_term)): how many original-sized
/// installments are still needed to absorb the remaining balance
///
/// deliberately decoupled from the calendar window, which answers a
/// different question (how many days remain, not how many installments)
fn installments_remaining(
    original_amount: Money,
    remaining_amount: Money,
    original_term: u32,
) -> Result<u32> {
    let per_period = original_amount.as_decimal() / Decimal::from(original_term);
    let periods = (remaining_amount.as_decimal() / per_period).ceil();
    periods.to_u32().ok_or_else(|| EngineError::CalculationError {
        message: format!("adjusted term {periods} does not fit a period count"),
    })
}

/// recompute the loan term after a partial payment
pub fn calculate_adjusted_loan_terms(
    original_amount: Money,
    remaining_amount: Money,
    original_term: u32,
    term_unit: TermUnit,
    payment_date: DateTime<Utc>,
    original_due_date: DateTime<Utc>,
    due_date_policy: DueDatePolicy,
) -> Result<LoanTermAdjustment> {
    check_adjustment_inputs(original_amount, remaining_amount, original_term)?;
    let remaining_days = remaining_window_days(payment_date, original_due_date)?;
    let adjusted_term = installments_remaining(original_amount, remaining_amount, original_term)?;

    let new_due_date = match due_date_policy {
        DueDatePolicy::PreserveOriginal => payment_date + Duration::days(remaining_days as i64),
        DueDatePolicy::FromAdjustedTerm => {
            payment_date + Duration::days((adjusted_term * term_unit.days_per_term()) as i64)
        }
    };

    Ok(LoanTermAdjustment {
        original_term,
        adjusted_term,
        term_unit,
        adjustment_reason: format!(
            "term adjusted from {original_term} to {adjusted_term} {term_unit} installments \
             after payment of {} on {}",
            original_amount - remaining_amount,
            payment_date.format("%Y-%m-%d"),
        ),
        new_due_date,
    })
}

/// spread the remaining balance evenly over the remaining window and return
/// the revised per-period payments with the nested term adjustment
#[allow(clippy::too_many_arguments)]
pub fn calculate_flexible_repayment(
    original_amount: Money,
    paid_amount: Money,
    remaining_amount: Money,
    original_term: u32,
    term_unit: TermUnit,
    payment_date: DateTime<Utc>,
    original_due_date: DateTime<Utc>,
    due_date_policy: DueDatePolicy,
) -> Result<FlexibleRepaymentResult> {
    check_adjustment_inputs(original_amount, remaining_amount, original_term)?;
    let remaining_days = remaining_window_days(payment_date, original_due_date)?;

    let daily = remaining_amount.as_decimal() / Decimal::from(remaining_days);
    let new_due_date = payment_date + Duration::days(remaining_days as i64);

    let adjustment = calculate_adjusted_loan_terms(
        original_amount,
        remaining_amount,
        original_term,
        term_unit,
        payment_date,
        original_due_date,
        due_date_policy,
    )?;

    Ok(FlexibleRepaymentResult {
        paid_amount,
        remaining_amount,
        new_daily_payment: Money::from_decimal(daily),
        new_weekly_payment: Money::from_decimal(daily * Decimal::from(7)),
        new_monthly_payment: Money::from_decimal(daily * Decimal::from(30)),
        remaining_days,
        new_due_date,
        adjustment,
    })
}

/// payment-modal helper: the amount due today to stay on track, rounded up
/// to a whole currency unit
pub fn amount_due_today(remaining_amount: Money, days_remaining: u32) -> Result<Money> {
    if remaining_amount.is_negative() {
        return Err(EngineError::NegativeRemainingBalance { amount: remaining_amount });
    }
    if days_remaining == 0 {
        return Err(EngineError::CalculationError {
            message: "days remaining must be at least 1".to_string(),
        });
    }
    Ok((remaining_amount / Decimal::from(days_remaining)).ceil_major())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_flexible_repayment_worked_example() {
        // 30k loan over 30 days, 5k paid on day 2, 25k left over 28 days
        let result = calculate_flexible_repayment(
            Money::from_major(30_000),
            Money::from_major(5_000),
            Money::from_major(25_000),
            30,
            TermUnit::Day,
            start() + Duration::days(2),
            start() + Duration::days(30),
            DueDatePolicy::PreserveOriginal,
        )
        .unwrap();

        assert_eq!(result.remaining_days, 28);
        assert_eq!(result.new_daily_payment, Money::from_str_exact("892.86").unwrap());
        assert_eq!(result.new_weekly_payment, Money::from_major(6_250));
        assert_eq!(result.new_monthly_payment, Money::from_str_exact("26785.71").unwrap());
        // preserving the window reconstructs the original due date
        assert_eq!(result.new_due_date, start() + Duration::days(30));
        // 25 original-sized installments of 1000 are still owed
        assert_eq!(result.adjustment.adjusted_term, 25);
        assert_eq!(result.adjustment.original_term, 30);
    }

    #[test]
    fn test_adjusted_terms_rounds_up() {
        // 10500 remaining at 1000/period needs 11 installments
        let adjustment = calculate_adjusted_loan_terms(
            Money::from_major(30_000),
            Money::from_major(10_500),
            30,
            TermUnit::Day,
            start() + Duration::days(10),
            start() + Duration::days(30),
            DueDatePolicy::PreserveOriginal,
        )
        .unwrap();

        assert_eq!(adjustment.adjusted_term, 11);
        assert!(adjustment.adjustment_reason.contains("from 30 to 11"));
    }

    #[test]
    fn test_due_date_from_adjusted_term() {
        let payment_date = start() + Duration::days(10);
        let adjustment = calculate_adjusted_loan_terms(
            Money::from_major(30_000),
            Money::from_major(10_000),
            30,
            TermUnit::Day,
            payment_date,
            start() + Duration::days(30),
            DueDatePolicy::FromAdjustedTerm,
        )
        .unwrap();

        // 10 installments of 1 day each from the payment date
        assert_eq!(adjustment.adjusted_term, 10);
        assert_eq!(adjustment.new_due_date, payment_date + Duration::days(10));
    }

    #[test]
    fn test_fully_paid_collapses_to_zero() {
        let result = calculate_flexible_repayment(
            Money::from_major(30_000),
            Money::from_major(30_000),
            Money::ZERO,
            30,
            TermUnit::Day,
            start() + Duration::days(5),
            start() + Duration::days(30),
            DueDatePolicy::PreserveOriginal,
        )
        .unwrap();

        assert_eq!(result.new_daily_payment, Money::ZERO);
        assert_eq!(result.new_monthly_payment, Money::ZERO);
        assert_eq!(result.adjustment.adjusted_term, 0);
    }

    #[test]
    fn test_rejects_payment_on_due_date() {
        let due = start() + Duration::days(30);
        let err = calculate_flexible_repayment(
            Money::from_major(30_000),
            Money::from_major(5_000),
            Money::from_major(25_000),
            30,
            TermUnit::Day,
            due,
            due,
            DueDatePolicy::PreserveOriginal,
        );
        assert!(matches!(err, Err(EngineError::PaymentWindowClosed { .. })));
    }

    #[test]
    fn test_rejects_payment_after_due_date() {
        let err = calculate_adjusted_loan_terms(
            Money::from_major(30_000),
            Money::from_major(25_000),
            30,
            TermUnit::Day,
            start() + Duration::days(31),
            start() + Duration::days(30),
            DueDatePolicy::PreserveOriginal,
        );
        assert!(matches!(err, Err(EngineError::PaymentWindowClosed { .. })));
    }

    #[test]
    fn test_sub_day_window_clamps_to_one() {
        // payment 12 hours before the due date still leaves a 1-day window
        let due = start() + Duration::days(30);
        let result = calculate_flexible_repayment(
            Money::from_major(30_000),
            Money::from_major(29_000),
            Money::from_major(1_000),
            30,
            TermUnit::Day,
            due - Duration::hours(12),
            due,
            DueDatePolicy::PreserveOriginal,
        )
        .unwrap();

        assert_eq!(result.remaining_days, 1);
        assert_eq!(result.new_daily_payment, Money::from_major(1_000));
    }

    #[test]
    fn test_rejects_negative_remaining() {
        let err = calculate_adjusted_loan_terms(
            Money::from_major(30_000),
            Money::from_major(-100),
            30,
            TermUnit::Day,
            start() + Duration::days(2),
            start() + Duration::days(30),
            DueDatePolicy::PreserveOriginal,
        );
        assert!(matches!(err, Err(EngineError::NegativeRemainingBalance { .. })));
    }

    #[test]
    fn test_amount_due_today() {
        // 25000 over 28 days: 892.857... rounds up to a whole 893
        let due = amount_due_today(Money::from_major(25_000), 28).unwrap();
        assert_eq!(due, Money::from_major(893));

        assert!(amount_due_today(Money::from_major(100), 0).is_err());
        assert!(amount_due_today(Money::from_major(-1), 5).is_err());
        assert_eq!(amount_due_today(Money::ZERO, 10).unwrap(), Money::ZERO);
    }
}
