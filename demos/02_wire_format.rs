/// wire format - the calculator webhook contract, success and failure
use b2wall_repayment::{handle_request, CalculatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CalculatorConfig::default();

    let ok = r#"{
        "LoanAmount": 2000000,
        "MonthlyInterestRate": 3,
        "PrincipalRepayments": [
            { "days": 2, "amount": 1000000 },
            { "days": 4, "amount": 1000000 }
        ],
        "InterestPaymentDates": [4]
    }"#;

    println!("=== success ===\n");
    println!("{}\n", handle_request(ok, &config).to_json_pretty()?);

    let duplicate = r#"{
        "LoanAmount": 2000000,
        "MonthlyInterestRate": 3,
        "PrincipalRepayments": [
            { "days": 4, "amount": 1000000 },
            { "days": 4, "amount": 1000000 }
        ],
        "InterestPaymentDates": [4]
    }"#;

    println!("=== failure ===\n");
    println!("{}", handle_request(duplicate, &config).to_json_pretty()?);

    Ok(())
}
