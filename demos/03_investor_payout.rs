/// investor payout - simple-interest return on a funded project
use b2wall_repayment::locale::{format_amount, parse_amount, to_persian_digits};
use b2wall_repayment::{estimate_payout, Money};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // amount as typed into the Persian form
    let amount = Money::from_decimal(parse_amount("۲۵۰٬۰۰۰٬۰۰۰")?);

    let estimate = estimate_payout(amount, dec!(28), 18)?;

    println!("invested:       {}", to_persian_digits(&format_amount(estimate.invested, 0)));
    println!("monthly profit: {}", to_persian_digits(&format_amount(estimate.monthly_profit, 0)));
    println!("total profit:   {}", to_persian_digits(&format_amount(estimate.total_profit, 0)));
    println!("total return:   {}", to_persian_digits(&format_amount(estimate.total_return, 0)));

    Ok(())
}
