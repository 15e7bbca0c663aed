/// quick start - schedule a loan and print the installment table
use repayment_engine_rs::{
    calculate_initial_loan_payments, Money, RepaymentSchedule, TermUnit, Uuid,
};
use repayment_engine_rs::chrono::{Duration, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 30,000 loan repaid daily over 30 days
    let amount = Money::from_major(30_000);
    let start = Utc::now();

    let calc = calculate_initial_loan_payments(amount, 30, TermUnit::Day)?;
    println!("daily payment:   {}", calc.daily_payment);
    println!("weekly payment:  {}", calc.weekly_payment);
    println!("monthly payment: {}", calc.monthly_payment);

    let schedule = RepaymentSchedule::generate(Uuid::new_v4(), amount, TermUnit::Day, 30, start)?;
    for entry in &schedule.entries {
        println!(
            "#{:<3} due {}  pay {}  remaining {}",
            entry.payment_number,
            entry.due_date.format("%Y-%m-%d"),
            entry.amount,
            entry.remaining_amount,
        );
    }

    println!(
        "final due date: {}",
        schedule.final_due_date().unwrap_or(start + Duration::days(30)).format("%Y-%m-%d")
    );

    Ok(())
}
