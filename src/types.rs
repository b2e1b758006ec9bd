use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// immutable loan terms, validated on construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    /// number of monthly periods
    pub tenure_periods: u32,
    /// date of the first installment, used only to label records
    pub start_date: Option<NaiveDate>,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate_percent: Decimal,
        tenure_periods: u32,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate: Rate::from_percent(annual_rate_percent),
            tenure_periods,
            start_date: None,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// tenure given in years, as the loan calculators collect it
    pub fn from_years(principal: Money, annual_rate_percent: Decimal, years: u32) -> Result<Self> {
        let periods = years.checked_mul(12).ok_or_else(|| {
            EngineError::terms(format!("tenure of {} years is out of range", years))
        })?;
        Self::new(principal, annual_rate_percent, periods)
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// fields are public, so every engine entry point re-checks them
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(EngineError::terms(format!(
                "principal must be greater than zero, got {}",
                self.principal
            )));
        }
        if self.tenure_periods < 1 {
            return Err(EngineError::terms("tenure must be at least one period"));
        }
        if self.annual_rate.is_negative() {
            return Err(EngineError::terms(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate
            )));
        }
        Ok(())
    }

    /// annual percent / 12 / 100
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// due date of a 1-based period when a start date is set
    pub fn due_date(&self, period: u32) -> Option<NaiveDate> {
        self.start_date
            .and_then(|start| start.checked_add_months(Months::new(period.saturating_sub(1))))
    }
}

/// one simulated period of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: u32,
    pub due_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest_component: Money,
    pub principal_component: Money,
    pub prepayment: Money,
    pub closing_balance: Money,
}

impl PeriodRecord {
    /// amount actually paid this period
    pub fn total_payment(&self) -> Money {
        self.interest_component + self.principal_component + self.prepayment
    }
}

/// output of a single schedule simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: Money,
    pub installment: Money,
    pub tenure_periods: u32,
    pub records: Vec<PeriodRecord>,
    /// period in which the balance first reached zero, else the tenure
    pub actual_periods: u32,
    pub total_interest_paid: Money,
    pub total_prepaid: Money,
}

impl AmortizationResult {
    /// sum of the scheduled principal components, excluding prepayments
    pub fn total_principal_paid(&self) -> Money {
        self.records
            .iter()
            .map(|r| r.principal_component)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    /// interest plus every principal reduction
    pub fn total_amount_paid(&self) -> Money {
        self.records
            .iter()
            .map(PeriodRecord::total_payment)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    pub fn final_balance(&self) -> Money {
        self.records
            .last()
            .map(|r| r.closing_balance)
            .unwrap_or(self.principal)
    }

    pub fn paid_off_early(&self) -> bool {
        self.actual_periods < self.tenure_periods
    }

    pub fn get_record(&self, period: u32) -> Option<&PeriodRecord> {
        period
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx as usize))
    }

    /// records grouped into loan years of twelve periods
    pub fn yearly_summary(&self) -> Vec<YearSummary> {
        self.records
            .chunks(12)
            .enumerate()
            .filter_map(|(idx, chunk)| {
                let first = chunk.first()?;
                let last = chunk.last()?;
                let mut year = YearSummary {
                    year: idx as u32 + 1,
                    opening_balance: first.opening_balance,
                    interest_paid: Money::ZERO,
                    principal_paid: Money::ZERO,
                    prepaid: Money::ZERO,
                    closing_balance: last.closing_balance,
                };
                for record in chunk {
                    year.interest_paid += record.interest_component;
                    year.principal_paid += record.principal_component;
                    year.prepaid += record.prepayment;
                }
                Some(year)
            })
            .collect()
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// aggregate of one loan year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub opening_balance: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub prepaid: Money,
    pub closing_balance: Money,
}

/// savings from a prepayment policy versus no prepayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentImpact {
    pub periods_saved: u32,
    pub interest_saved: Money,
    pub total_prepaid: Money,
}

impl PrepaymentImpact {
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// both simulated schedules alongside their derived impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentComparison {
    pub baseline: AmortizationResult,
    pub with_prepayment: AmortizationResult,
    pub impact: PrepaymentImpact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_terms_validation() {
        assert!(LoanTerms::new(Money::from_major(100_000), dec!(9), 12).is_ok());
        assert!(LoanTerms::new(Money::from_major(100_000), dec!(0), 12).is_ok());

        let zero_principal = LoanTerms::new(Money::ZERO, dec!(9), 12);
        assert!(matches!(zero_principal, Err(EngineError::InvalidTerms { .. })));

        let negative_principal = LoanTerms::new(Money::from_major(-5), dec!(9), 12);
        assert!(matches!(negative_principal, Err(EngineError::InvalidTerms { .. })));

        let zero_tenure = LoanTerms::new(Money::from_major(100_000), dec!(9), 0);
        assert!(matches!(zero_tenure, Err(EngineError::InvalidTerms { .. })));

        let negative_rate = LoanTerms::new(Money::from_major(100_000), dec!(-0.5), 12);
        assert!(matches!(negative_rate, Err(EngineError::InvalidTerms { .. })));
    }

    #[test]
    fn test_from_years() {
        let terms = LoanTerms::from_years(Money::from_major(2_500_000), dec!(8.5), 20).unwrap();
        assert_eq!(terms.tenure_periods, 240);
        assert_eq!(terms.periodic_rate().as_decimal(), dec!(0.085) / dec!(12));

        assert!(LoanTerms::from_years(Money::from_major(1), dec!(8.5), u32::MAX).is_err());
    }

    #[test]
    fn test_due_dates_clamp_to_month_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let terms = LoanTerms::new(Money::from_major(10_000), dec!(10), 3)
            .unwrap()
            .with_start_date(start);

        assert_eq!(terms.due_date(1), Some(start));
        assert_eq!(terms.due_date(2), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(terms.due_date(3), NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn test_no_due_date_without_start() {
        let terms = LoanTerms::new(Money::from_major(10_000), dec!(10), 3).unwrap();
        assert_eq!(terms.due_date(1), None);
    }
}
