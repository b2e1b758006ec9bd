/// prepayment modes - compare monthly, annual and custom prepayments
use emi_prepayment_rs::{compare_with_baseline, LoanTerms, Money, PrepaymentPolicy};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::from_years(Money::from_major(2_500_000), dec!(8.5), 25)?;

    let policies = [
        ("monthly 5,000", PrepaymentPolicy::monthly(Money::from_major(5_000))),
        ("annual 60,000", PrepaymentPolicy::annual(Money::from_major(60_000))),
        (
            "bonus in months 12 and 36",
            PrepaymentPolicy::custom([
                (12, Money::from_major(200_000)),
                (36, Money::from_major(300_000)),
            ]),
        ),
    ];

    for (label, policy) in policies {
        let impact = compare_with_baseline(&terms, &policy)?;
        println!("=== {} ===", label);
        println!("months saved:   {}", impact.periods_saved);
        println!("interest saved: {}", impact.interest_saved.round_dp(2));
        println!("total prepaid:  {}\n", impact.total_prepaid.round_dp(2));
    }

    Ok(())
}
