/// quick start - installment and schedule for a home loan
use emi_prepayment_rs::{compute_installment, simulate, LoanTerms, Money, PrepaymentPolicy};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let terms = LoanTerms::from_years(Money::from_major(1_000_000), dec!(9), 20)?;

    let emi = compute_installment(&terms)?;
    println!("monthly installment: {}", emi.round_dp(2));

    let schedule = simulate(&terms, &PrepaymentPolicy::None)?;
    println!("total interest: {}", schedule.total_interest_paid.round_dp(2));
    println!("total paid: {}", schedule.total_amount_paid().round_dp(2));

    println!("\nyear  interest      principal     closing");
    for year in schedule.yearly_summary() {
        println!(
            "{:>4}  {:>12}  {:>12}  {:>12}",
            year.year,
            year.interest_paid.round_dp(2),
            year.principal_paid.round_dp(2),
            year.closing_balance.round_dp(2),
        );
    }

    Ok(())
}
