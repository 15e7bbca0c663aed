use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::terms::TermUnit;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// per-period payment breakdown and total duration for a new loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub term_unit: TermUnit,
    pub daily_payment: Money,
    pub weekly_payment: Money,
    pub monthly_payment: Money,
    pub total_amount: Money,
    pub total_days: u32,
    pub total_weeks: u32,
    pub total_months: u32,
}

/// one row of a generated repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub payment_number: u32,
    pub due_date: DateTime<Utc>,
    pub amount: Money,
    pub cumulative_amount: Money,
    pub remaining_amount: Money,
}

/// compute the per-period payments and total duration for a loan
///
/// the payment in the given unit is `amount / max_term`; the other two
/// period payments are derived through the days-per-term ratio, and the
/// duration counts round up to whole periods
pub fn calculate_initial_loan_payments(
    amount: Money,
    max_term: u32,
    term_unit: TermUnit,
) -> Result<LoanCalculation> {
    if max_term == 0 {
        return Err(EngineError::InvalidTermCount { count: max_term });
    }
    if !amount.is_positive() {
        return Err(EngineError::NonPositiveAmount { amount });
    }

    let per_period = amount.as_decimal() / Decimal::from(max_term);
    let daily = per_period / Decimal::from(term_unit.days_per_term());

    let total_days = max_term * term_unit.days_per_term();

    Ok(LoanCalculation {
        term_unit,
        daily_payment: Money::from_decimal(daily),
        weekly_payment: Money::from_decimal(daily * Decimal::from(7)),
        monthly_payment: Money::from_decimal(daily * Decimal::from(30)),
        total_amount: amount,
        total_days,
        total_weeks: periods_covering(total_days, TermUnit::Week),
        total_months: periods_covering(total_days, TermUnit::Month),
    })
}

/// whole periods of `unit` needed to cover `days`, rounded up
fn periods_covering(days: u32, unit: TermUnit) -> u32 {
    let factor = unit.days_per_term();
    (days + factor - 1) / factor
}

/// generate the full flat-installment schedule: `max_term` entries, one per
/// period, due dates stepping by the unit's day factor from `start_date`
pub fn calculate_dynamic_repayment_schedule(
    amount: Money,
    term_unit: TermUnit,
    max_term: u32,
    start_date: DateTime<Utc>,
) -> Result<Vec<ScheduleEntry>> {
    if max_term == 0 {
        return Err(EngineError::InvalidTermCount { count: max_term });
    }
    if !amount.is_positive() {
        return Err(EngineError::NonPositiveAmount { amount });
    }

    let total = amount.as_decimal();
    let per_period = total / Decimal::from(max_term);
    let step_days = term_unit.days_per_term() as i64;

    let mut entries = Vec::with_capacity(max_term as usize);
    for i in 1..=max_term {
        let cumulative = per_period * Decimal::from(i);
        let remaining = (total - cumulative).max(Decimal::ZERO);

        entries.push(ScheduleEntry {
            payment_number: i,
            due_date: start_date + Duration::days(i as i64 * step_days),
            amount: Money::from_decimal(per_period),
            cumulative_amount: Money::from_decimal(cumulative),
            remaining_amount: Money::from_decimal(remaining),
        });
    }

    Ok(entries)
}

/// a generated schedule tied to a loan record, for callers that persist or
/// display the whole table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub loan_id: LoanId,
    pub total_amount: Money,
    pub term_unit: TermUnit,
    pub max_term: u32,
    pub start_date: DateTime<Utc>,
    pub entries: Vec<ScheduleEntry>,
}

impl RepaymentSchedule {
    /// generate the schedule for a loan
    pub fn generate(
        loan_id: LoanId,
        amount: Money,
        term_unit: TermUnit,
        max_term: u32,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        let entries = calculate_dynamic_repayment_schedule(amount, term_unit, max_term, start_date)?;
        Ok(Self {
            loan_id,
            total_amount: amount,
            term_unit,
            max_term,
            start_date,
            entries,
        })
    }

    /// get entry for a specific payment number (1-based)
    pub fn entry(&self, payment_number: u32) -> Option<&ScheduleEntry> {
        self.entries.get(payment_number.checked_sub(1)? as usize)
    }

    /// due date of the final installment
    pub fn final_due_date(&self) -> Option<DateTime<Utc>> {
        self.entries.last().map(|e| e.due_date)
    }

    /// serialize for display or persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
