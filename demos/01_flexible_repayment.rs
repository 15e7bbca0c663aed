/// flexible repayment - re-amortize after a partial payment
use repayment_engine_rs::{amount_due_today, EngineConfig, Money, TermUnit};
use repayment_engine_rs::chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::default();

    // 30,000 over 30 days, starting january 1st
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let due_date = start + Duration::days(30);

    // customer pays 5,000 on day 2 instead of the scheduled 2,000
    let payment_date = start + Duration::days(2);
    let result = config.flexible_repayment(
        Money::from_major(30_000),
        Money::from_major(5_000),
        Money::from_major(25_000),
        30,
        TermUnit::Day,
        payment_date,
        due_date,
    )?;

    println!("{}", result.to_json()?);
    println!();
    println!("remaining days:    {}", result.remaining_days);
    println!("new daily payment: {}", result.new_daily_payment);
    println!("new due date:      {}", result.new_due_date.format("%Y-%m-%d"));
    println!("reason:            {}", result.adjustment.adjustment_reason);

    // what the payment modal would suggest the next day
    let due_today = amount_due_today(result.remaining_amount, result.remaining_days)?;
    println!("due today:         {due_today}");

    Ok(())
}
