use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adjustment::{
    calculate_adjusted_loan_terms, calculate_flexible_repayment, DueDatePolicy,
    FlexibleRepaymentResult, LoanTermAdjustment,
};
use crate::decimal::Money;
use crate::errors::Result;
use crate::extension::{calculate_loan_extension, ExtensionOutcome, DEFAULT_MAX_EXTENSION_TERMS};
use crate::terms::TermUnit;

/// engine policy knobs
///
/// groups the choices that vary between deployments so callers thread one
/// value instead of repeating them at every call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// cap on additional periods a loan extension may be granted
    pub max_extension_terms: u32,
    /// how mid-term recomputes derive the new due date
    pub due_date_policy: DueDatePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_extension_terms: DEFAULT_MAX_EXTENSION_TERMS,
            due_date_policy: DueDatePolicy::PreserveOriginal,
        }
    }
}

impl EngineConfig {
    pub fn new(max_extension_terms: u32, due_date_policy: DueDatePolicy) -> Self {
        Self { max_extension_terms, due_date_policy }
    }

    /// recompute loan terms after a partial payment under this configuration
    pub fn adjusted_loan_terms(
        &self,
        original_amount: Money,
        remaining_amount: Money,
        original_term: u32,
        term_unit: TermUnit,
        payment_date: DateTime<Utc>,
        original_due_date: DateTime<Utc>,
    ) -> Result<LoanTermAdjustment> {
        calculate_adjusted_loan_terms(
            original_amount,
            remaining_amount,
            original_term,
            term_unit,
            payment_date,
            original_due_date,
            self.due_date_policy,
        )
    }

    /// re-amortize the remaining balance after a partial payment under this
    /// configuration
    #[allow(clippy::too_many_arguments)]
    pub fn flexible_repayment(
        &self,
        original_amount: Money,
        paid_amount: Money,
        remaining_amount: Money,
        original_term: u32,
        term_unit: TermUnit,
        payment_date: DateTime<Utc>,
        original_due_date: DateTime<Utc>,
    ) -> Result<FlexibleRepaymentResult> {
        calculate_flexible_repayment(
            original_amount,
            paid_amount,
            remaining_amount,
            original_term,
            term_unit,
            payment_date,
            original_due_date,
            self.due_date_policy,
        )
    }

    /// extend a loan under this configuration's term cap
    pub fn loan_extension(
        &self,
        current_amount: Money,
        extension_amount: Money,
        current_term: u32,
        term_unit: TermUnit,
    ) -> Result<ExtensionOutcome> {
        calculate_loan_extension(
            current_amount,
            extension_amount,
            current_term,
            term_unit,
            self.max_extension_terms,
        )
    }
}
