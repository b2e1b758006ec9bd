/// json request - evaluate a calculator request read from JSON
use emi_prepayment_rs::LoanRequest;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"{
        "principal": "800000",
        "annual_rate_percent": "10.75",
        "tenure": { "months": 84 },
        "start_date": "2026-01-10",
        "prepayment": {
            "mode": "custom",
            "amounts": [
                { "period": 6, "amount": "50000" },
                { "period": 18, "amount": "75000" }
            ]
        }
    }"#;

    let request = LoanRequest::from_json(json)?;
    let comparison = request.evaluate()?;

    for record in comparison.with_prepayment.records.iter().take(8) {
        println!(
            "{:>3} {:?} interest {} principal {} prepaid {} balance {}",
            record.period,
            record.due_date,
            record.interest_component.round_dp(2),
            record.principal_component.round_dp(2),
            record.prepayment.round_dp(2),
            record.closing_balance.round_dp(2),
        );
    }

    println!("\n{}", comparison.impact.json());

    Ok(())
}
