use tracing::debug;

use crate::errors::Result;
use crate::types::{AmortizationResult, LoanTerms, PrepaymentComparison, PrepaymentImpact};

use super::amortization::simulate;
use super::prepayment::PrepaymentPolicy;

impl PrepaymentImpact {
    /// savings of `with_prepayment` over `baseline`
    ///
    /// Prepaying only ever lowers the balance a period opens with, so the
    /// prepaid run never charges more interest or runs longer than the baseline.
    pub fn between(baseline: &AmortizationResult, with_prepayment: &AmortizationResult) -> Self {
        Self {
            periods_saved: baseline
                .actual_periods
                .saturating_sub(with_prepayment.actual_periods),
            interest_saved: baseline.total_interest_paid - with_prepayment.total_interest_paid,
            total_prepaid: with_prepayment.total_prepaid,
        }
    }
}

/// simulate with and without `policy` and keep both schedules
pub fn compare_schedules(
    terms: &LoanTerms,
    policy: &PrepaymentPolicy,
) -> Result<PrepaymentComparison> {
    let baseline = simulate(terms, &PrepaymentPolicy::None)?;
    let with_prepayment = simulate(terms, policy)?;
    let impact = PrepaymentImpact::between(&baseline, &with_prepayment);

    debug!(
        periods_saved = impact.periods_saved,
        interest_saved = %impact.interest_saved,
        total_prepaid = %impact.total_prepaid,
        "prepayment comparison complete"
    );

    Ok(PrepaymentComparison {
        baseline,
        with_prepayment,
        impact,
    })
}

/// periods and interest saved by `policy` against the same loan without prepayment
pub fn compare_with_baseline(
    terms: &LoanTerms,
    policy: &PrepaymentPolicy,
) -> Result<PrepaymentImpact> {
    compare_schedules(terms, policy).map(|comparison| comparison.impact)
}
