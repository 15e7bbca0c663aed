use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// repayment term unit
///
/// day factors are a deliberate flat calendar approximation (WEEK=7, MONTH=30),
/// not actual month-length arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TermUnit {
    Day,
    Week,
    Month,
}

impl TermUnit {
    /// fixed days-per-period factor
    pub fn days_per_term(&self) -> u32 {
        match self {
            TermUnit::Day => 1,
            TermUnit::Week => 7,
            TermUnit::Month => 30,
        }
    }

    /// maximum allowed term count for this unit
    pub fn max_periods(&self) -> u32 {
        match self {
            TermUnit::Day => 365,
            TermUnit::Week => 52,
            TermUnit::Month => 12,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TermUnit::Day => "day",
            TermUnit::Week => "week",
            TermUnit::Month => "month",
        }
    }
}

impl fmt::Display for TermUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TermUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAY" | "DAILY" => Ok(TermUnit::Day),
            "WEEK" | "WEEKLY" => Ok(TermUnit::Week),
            "MONTH" | "MONTHLY" => Ok(TermUnit::Month),
            other => Err(format!("unknown term unit: {other}")),
        }
    }
}

/// convert a quantity of periods from one term unit to another via the
/// fixed days-per-term table
pub fn convert_term_units(value: Decimal, from: TermUnit, to: TermUnit) -> Decimal {
    value * Decimal::from(from.days_per_term()) / Decimal::from(to.days_per_term())
}

/// result of validating a min/max term range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl TermValidation {
    fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// convert into a fail-fast error for callers that do not inspect the
    /// individual messages
    pub fn into_result(self) -> crate::errors::Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(crate::errors::EngineError::InvalidTermRange { errors: self.errors })
        }
    }
}

/// validate a loan term range against the per-unit ceilings
/// (365 days, 52 weeks, 12 months)
pub fn validate_loan_terms(unit: TermUnit, min_term: u32, max_term: u32) -> TermValidation {
    let mut errors = Vec::new();

    if min_term < 1 {
        errors.push("minimum term must be at least 1 period".to_string());
    }

    if max_term < min_term {
        errors.push(format!(
            "maximum term {max_term} is less than minimum term {min_term}"
        ));
    }

    let ceiling = unit.max_periods();
    if max_term > ceiling {
        errors.push(format!(
            "maximum term {max_term} exceeds the {ceiling} {unit} ceiling"
        ));
    }

    if errors.is_empty() {
        TermValidation::valid()
    } else {
        TermValidation { is_valid: false, errors }
    }
}
