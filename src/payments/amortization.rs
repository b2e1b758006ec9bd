use tracing::{debug, trace};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{AmortizationResult, LoanTerms, PeriodRecord};

use super::installment::compute_installment;
use super::prepayment::PrepaymentPolicy;

/// upper bound on records reserved up front; early payoff may emit far fewer
const MAX_PREALLOCATED_PERIODS: u32 = 1_200;

/// run the loan month by month under `policy`
///
/// Each period charges interest on the opening balance, takes the rest of the
/// installment as scheduled principal (never more than is owed), then applies
/// whatever prepayment the policy asks for, capped at what is left. The loop
/// ends after the period that clears the balance or after the nominal tenure.
pub fn simulate(terms: &LoanTerms, policy: &PrepaymentPolicy) -> Result<AmortizationResult> {
    let installment = compute_installment(terms)?;
    policy.validate()?;

    let rate = terms.periodic_rate().as_decimal();

    debug!(
        principal = %terms.principal,
        tenure = terms.tenure_periods,
        installment = %installment,
        "simulating amortization schedule"
    );

    let mut records =
        Vec::with_capacity(terms.tenure_periods.min(MAX_PREALLOCATED_PERIODS) as usize);
    let mut balance = terms.principal;
    let mut actual_periods = None;
    let mut total_interest_paid = Money::ZERO;
    let mut total_prepaid = Money::ZERO;

    for period in 1..=terms.tenure_periods {
        if !balance.is_positive() {
            break;
        }

        let interest = balance * rate;
        let scheduled_principal = (installment - interest).max(Money::ZERO).min(balance);
        let after_scheduled = balance - scheduled_principal;

        let requested = policy.requested_for(period);
        let prepayment = policy.prepayment_for(period, after_scheduled);
        if prepayment < requested {
            debug!(
                period,
                requested = %requested,
                applied = %prepayment,
                "prepayment truncated to outstanding balance"
            );
        }

        let closing_balance = (after_scheduled - prepayment).max(Money::ZERO);

        trace!(
            period,
            interest = %interest,
            principal = %scheduled_principal,
            prepayment = %prepayment,
            closing = %closing_balance,
            "period settled"
        );

        records.push(PeriodRecord {
            period,
            due_date: terms.due_date(period),
            opening_balance: balance,
            installment,
            interest_component: interest,
            principal_component: scheduled_principal,
            prepayment,
            closing_balance,
        });

        total_interest_paid += interest;
        total_prepaid += prepayment;

        if closing_balance.is_zero() && actual_periods.is_none() {
            actual_periods = Some(period);
        }

        balance = closing_balance;
    }

    let actual_periods = actual_periods.unwrap_or(terms.tenure_periods);

    debug!(
        actual_periods,
        total_interest = %total_interest_paid,
        total_prepaid = %total_prepaid,
        "amortization schedule complete"
    );

    Ok(AmortizationResult {
        principal: terms.principal,
        installment,
        tenure_periods: terms.tenure_periods,
        records,
        actual_periods,
        total_interest_paid,
        total_prepaid,
    })
}
