use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::terms::TermUnit;

/// default cap on how many periods a loan may be extended by
pub const DEFAULT_MAX_EXTENSION_TERMS: u32 = 3;

/// combined principal and revised term after adding funds to a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanExtension {
    pub new_amount: Money,
    pub new_term: u32,
    pub extension_terms: u32,
    pub term_unit: TermUnit,
    pub new_daily_payment: Money,
}

/// extension result, tagged so callers can see when the term cap truncated
/// the periods the extension actually needed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExtensionOutcome {
    /// the extension amortizes fully within the granted periods
    Amortized(LoanExtension),
    /// the cap cut the granted periods short; the remaining balance still
    /// amortizes, but at a steeper per-period payment than the original rate
    Capped {
        extension: LoanExtension,
        shortfall_terms: u32,
    },
}

impl ExtensionOutcome {
    /// the extension figures regardless of capping
    pub fn extension(&self) -> &LoanExtension {
        match self {
            ExtensionOutcome::Amortized(e) => e,
            ExtensionOutcome::Capped { extension, .. } => extension,
        }
    }

    pub fn is_capped(&self) -> bool {
        matches!(self, ExtensionOutcome::Capped { .. })
    }
}

/// compute the combined principal and revised term when extra funds are
/// added to an existing loan
///
/// the extension is granted `ceil(extension / original per-period rate)`
/// additional periods, bounded by `max_extension_terms`; a binding cap is
/// surfaced in the outcome rather than silently truncated
pub fn calculate_loan_extension(
    current_amount: Money,
    extension_amount: Money,
    current_term: u32,
    term_unit: TermUnit,
    max_extension_terms: u32,
) -> Result<ExtensionOutcome> {
    if current_term == 0 {
        return Err(EngineError::InvalidTermCount { count: current_term });
    }
    if !current_amount.is_positive() {
        return Err(EngineError::NonPositiveAmount { amount: current_amount });
    }
    if !extension_amount.is_positive() {
        return Err(EngineError::NonPositiveAmount { amount: extension_amount });
    }

    let per_period = current_amount.as_decimal() / Decimal::from(current_term);
    let required = (extension_amount.as_decimal() / per_period).ceil();
    let required_terms = required.to_u32().ok_or_else(|| EngineError::CalculationError {
        message: format!("extension of {required} periods does not fit a period count"),
    })?;

    let extension_terms = required_terms.min(max_extension_terms);
    let new_amount = current_amount + extension_amount;
    let new_term = current_term + extension_terms;
    let total_days = Decimal::from(new_term * term_unit.days_per_term());

    let extension = LoanExtension {
        new_amount,
        new_term,
        extension_terms,
        term_unit,
        new_daily_payment: Money::from_decimal(new_amount.as_decimal() / total_days),
    };

    if required_terms > extension_terms {
        Ok(ExtensionOutcome::Capped {
            extension,
            shortfall_terms: required_terms - extension_terms,
        })
    } else {
        Ok(ExtensionOutcome::Amortized(extension))
    }
}
