/// loan extension - add funds to an existing loan, watching for the term cap
use repayment_engine_rs::{calculate_loan_extension, ExtensionOutcome, Money, TermUnit};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100,000 over 30 days, customer requests another 50,000
    let outcome = calculate_loan_extension(
        Money::from_major(100_000),
        Money::from_major(50_000),
        30,
        TermUnit::Day,
        3,
    )?;

    let ext = outcome.extension();
    println!("new principal:     {}", ext.new_amount);
    println!("new term:          {} {}s", ext.new_term, ext.term_unit);
    println!("granted terms:     {}", ext.extension_terms);
    println!("new daily payment: {}", ext.new_daily_payment);

    match outcome {
        ExtensionOutcome::Amortized(_) => {
            println!("extension amortizes at the original per-period rate");
        }
        ExtensionOutcome::Capped { shortfall_terms, .. } => {
            println!("term cap binding: {shortfall_terms} more periods were needed at the original rate");
        }
    }

    Ok(())
}
