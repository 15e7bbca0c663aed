use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid term count: {count} (term must be at least 1 period)")]
    InvalidTermCount {
        count: u32,
    },

    #[error("non-positive amount: {amount}")]
    NonPositiveAmount {
        amount: Money,
    },

    #[error("negative remaining balance: {amount}")]
    NegativeRemainingBalance {
        amount: Money,
    },

    #[error("payment window closed: payment dated {payment_date} is on or after due date {due_date}")]
    PaymentWindowClosed {
        payment_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    },

    #[error("invalid loan terms: {}", .errors.join("; "))]
    InvalidTermRange {
        errors: Vec<String>,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
