/// quick start - one bullet repayment with interest settled at maturity
use b2wall_repayment::{compute_schedule, Decimal, Money, ScheduleRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1,000,000 at 3% a month, repaid in full on day 30
    let request = ScheduleRequest::new(Money::from_major(1_000_000), Decimal::from(3))
        .repay(30, Money::from_major(1_000_000))
        .pay_interest_on(30);

    let schedule = compute_schedule(&request)?;

    for record in schedule.payment_days() {
        println!(
            "day {:>3}: principal {} + interest {} = {} ({})",
            record.day,
            record.principal_payment,
            record.interest_payment,
            record.total_payment,
            record.description
        );
    }
    println!("\n{}", serde_json::to_string_pretty(&schedule.summary)?);

    Ok(())
}
