use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanTerms;

/// fixed monthly installment (EMI) that retires the principal over the tenure
///
/// With a zero rate the loan amortizes linearly as `principal / n`, otherwise
/// `P * r / (1 - (1 + r)^-n)` with `r` the monthly rate. The discount factor
/// only shrinks, so long tenures converge to `P * r` instead of overflowing.
pub fn compute_installment(terms: &LoanTerms) -> Result<Money> {
    terms.validate()?;

    let r = terms.periodic_rate().as_decimal();
    let n = terms.tenure_periods;

    if r.is_zero() {
        return Ok(terms.principal / Decimal::from(n));
    }

    let denominator = Decimal::ONE - discount_factor(r, n);
    if denominator <= Decimal::ZERO {
        // rate too small to register at 28 places
        return Ok(terms.principal / Decimal::from(n));
    }

    Ok(terms.principal * (r / denominator))
}

/// (1 + r)^-n by repeated squaring, underflowing to zero for long tenures
fn discount_factor(r: Decimal, n: u32) -> Decimal {
    let mut base = Decimal::ONE / (Decimal::ONE + r);
    let mut factor = Decimal::ONE;
    let mut exp = n;

    while exp > 0 {
        if exp & 1 == 1 {
            factor *= base;
        }
        exp >>= 1;
        if exp > 0 {
            base *= base;
        }
        if factor.is_zero() {
            break;
        }
    }

    factor
}
