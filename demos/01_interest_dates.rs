/// interest dates - staged repayments with monthly interest settlement
use b2wall_repayment::chrono::NaiveDate;
use b2wall_repayment::locale::format_amount;
use b2wall_repayment::{compute_schedule, Money, ScheduleRequest};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = ScheduleRequest::new(Money::from_major(500_000_000), dec!(4.5))
        .repay(45, Money::from_major(150_000_000))
        .repay(90, Money::from_major(150_000_000))
        .repay(120, Money::from_major(200_000_000))
        .pay_interest_on(30)
        .pay_interest_on(60)
        .pay_interest_on(90)
        .pay_interest_on(120);

    let schedule = compute_schedule(&request)?;
    let disbursed_on = NaiveDate::from_ymd_opt(2024, 3, 20).ok_or("bad date")?;

    println!("{:<12} {:>5} {:>18} {:>18} {:>18}", "date", "day", "before", "principal", "interest");
    for (date, record) in schedule.dated(disbursed_on) {
        if record.total_payment.is_zero() {
            continue;
        }
        println!(
            "{:<12} {:>5} {:>18} {:>18} {:>18}",
            date,
            record.day,
            format_amount(record.remaining_principal_before, 0),
            format_amount(record.principal_payment, 0),
            format_amount(record.interest_payment, 0),
        );
    }

    println!();
    println!("total interest: {}", format_amount(schedule.summary.total_interest_paid, 0));
    println!("total paid:     {}", format_amount(schedule.summary.total_payments, 0));

    Ok(())
}
