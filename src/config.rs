use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::payments::{compare_schedules, PrepaymentPolicy};
use crate::types::{LoanTerms, PrepaymentComparison};

/// a calculator request as collected from a form or a JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub tenure: Tenure,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub prepayment: PrepaymentMode,
}

/// loan tenure, entered in months or in years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    Months(u32),
    Years(u32),
}

impl Tenure {
    pub fn months(&self) -> Result<u32> {
        match *self {
            Tenure::Months(m) => Ok(m),
            Tenure::Years(y) => y.checked_mul(12).ok_or_else(|| {
                EngineError::terms(format!("tenure of {} years is out of range", y))
            }),
        }
    }
}

/// prepayment mode selected by the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PrepaymentMode {
    #[default]
    None,
    Monthly {
        amount: Money,
    },
    Annual {
        amount: Money,
    },
    Periodic {
        amount: Money,
        every_n_periods: u32,
    },
    /// per-month grid, one row per period
    Custom {
        amounts: Vec<PeriodAmount>,
    },
}

/// one row of the custom prepayment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmount {
    pub period: u32,
    pub amount: Money,
}

impl PrepaymentMode {
    pub fn to_policy(&self) -> PrepaymentPolicy {
        match self {
            PrepaymentMode::None => PrepaymentPolicy::None,
            PrepaymentMode::Monthly { amount } => PrepaymentPolicy::monthly(*amount),
            PrepaymentMode::Annual { amount } => PrepaymentPolicy::annual(*amount),
            PrepaymentMode::Periodic {
                amount,
                every_n_periods,
            } => PrepaymentPolicy::periodic(*amount, *every_n_periods),
            PrepaymentMode::Custom { amounts } => {
                PrepaymentPolicy::custom(amounts.iter().map(|row| (row.period, row.amount)))
            }
        }
    }
}

impl LoanRequest {
    /// home loan preset, tenure in years
    pub fn home_loan(principal: Money, annual_rate_percent: Decimal, years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure: Tenure::Years(years),
            start_date: None,
            prepayment: PrepaymentMode::None,
        }
    }

    /// personal loan preset, tenure in months
    pub fn personal_loan(principal: Money, annual_rate_percent: Decimal, months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure: Tenure::Months(months),
            start_date: None,
            prepayment: PrepaymentMode::None,
        }
    }

    pub fn with_prepayment(mut self, prepayment: PrepaymentMode) -> Self {
        self.prepayment = prepayment;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn terms(&self) -> Result<LoanTerms> {
        let terms = LoanTerms::new(
            self.principal,
            self.annual_rate_percent,
            self.tenure.months()?,
        )?;
        Ok(match self.start_date {
            Some(date) => terms.with_start_date(date),
            None => terms,
        })
    }

    pub fn policy(&self) -> PrepaymentPolicy {
        self.prepayment.to_policy()
    }

    pub fn into_parts(self) -> Result<(LoanTerms, PrepaymentPolicy)> {
        let terms = self.terms()?;
        Ok((terms, self.policy()))
    }

    /// run both schedules for this request
    pub fn evaluate(&self) -> Result<PrepaymentComparison> {
        let terms = self.terms()?;
        compare_schedules(&terms, &self.policy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_annual_request() {
        let json = r#"{
            "principal": "2500000",
            "annual_rate_percent": "8.5",
            "tenure": { "years": 20 },
            "start_date": "2025-04-05",
            "prepayment": { "mode": "annual", "amount": "50000" }
        }"#;

        let request = LoanRequest::from_json(json).unwrap();
        assert_eq!(request.tenure, Tenure::Years(20));
        assert_eq!(
            request.prepayment,
            PrepaymentMode::Annual { amount: Money::from_major(50_000) }
        );

        let (terms, policy) = request.into_parts().unwrap();
        assert_eq!(terms.tenure_periods, 240);
        assert_eq!(terms.start_date, NaiveDate::from_ymd_opt(2025, 4, 5));
        assert_eq!(policy, PrepaymentPolicy::annual(Money::from_major(50_000)));
    }

    #[test]
    fn test_parse_custom_grid_drops_blank_cells() {
        let json = r#"{
            "principal": "500000",
            "annual_rate_percent": "11",
            "tenure": { "months": 60 },
            "prepayment": {
                "mode": "custom",
                "amounts": [
                    { "period": 6, "amount": "20000" },
                    { "period": 9, "amount": "0" },
                    { "period": 18, "amount": "35000" }
                ]
            }
        }"#;

        let request = LoanRequest::from_json(json).unwrap();
        let policy = request.policy();

        assert_eq!(
            policy,
            PrepaymentPolicy::custom([
                (6, Money::from_major(20_000)),
                (18, Money::from_major(35_000)),
            ])
        );
    }

    #[test]
    fn test_prepayment_defaults_to_none() {
        let json = r#"{
            "principal": "100000",
            "annual_rate_percent": "0",
            "tenure": { "months": 10 }
        }"#;

        let request = LoanRequest::from_json(json).unwrap();
        assert_eq!(request.prepayment, PrepaymentMode::None);
        assert!(request.policy().is_none());
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let err = LoanRequest::from_json(r#"{ "principal": "100" }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_terms_surface_from_request() {
        let request = LoanRequest::personal_loan(Money::ZERO, dec!(14), 36);
        assert!(matches!(request.terms(), Err(EngineError::InvalidTerms { .. })));
    }

    #[test]
    fn test_evaluate_personal_loan() {
        let request = LoanRequest::personal_loan(Money::from_major(300_000), dec!(14), 36)
            .with_prepayment(PrepaymentMode::Monthly { amount: Money::from_major(2_000) });

        let comparison = request.evaluate().unwrap();
        assert_eq!(comparison.baseline.actual_periods, 36);
        assert!(comparison.impact.periods_saved > 0);
        assert!(comparison.impact.interest_saved.is_positive());
    }

    #[test]
    fn test_home_loan_preset() {
        let request = LoanRequest::home_loan(Money::from_major(1_000_000), dec!(9), 20);
        let terms = request.terms().unwrap();

        assert_eq!(terms.tenure_periods, 240);
        assert_eq!(terms.annual_rate.as_percentage(), dec!(9));
    }
}
