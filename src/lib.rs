pub mod adjustment;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod extension;
pub mod schedule;
pub mod terms;

// re-export key types
pub use adjustment::{
    amount_due_today, calculate_adjusted_loan_terms, calculate_flexible_repayment, DueDatePolicy,
    FlexibleRepaymentResult, LoanTermAdjustment,
};
pub use config::EngineConfig;
pub use decimal::Money;
pub use errors::{EngineError, Result};
pub use extension::{
    calculate_loan_extension, ExtensionOutcome, LoanExtension, DEFAULT_MAX_EXTENSION_TERMS,
};
pub use schedule::{
    calculate_dynamic_repayment_schedule, calculate_initial_loan_payments, LoanCalculation,
    LoanId, RepaymentSchedule, ScheduleEntry,
};
pub use terms::{convert_term_units, validate_loan_terms, TermUnit, TermValidation};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
