use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};

/// extra principal paid on top of the installment
///
/// Monthly and annual prepayments are both `Periodic`, with `every_n_periods`
/// of 1 and 12 respectively. A per-month grid becomes a `Custom` map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrepaymentPolicy {
    #[default]
    None,
    Periodic {
        amount: Money,
        every_n_periods: u32,
    },
    Custom {
        amounts: BTreeMap<u32, Money>,
    },
}

impl PrepaymentPolicy {
    /// same extra amount with every installment
    pub fn monthly(amount: Money) -> Self {
        Self::periodic(amount, 1)
    }

    /// lump sum with every twelfth installment
    pub fn annual(amount: Money) -> Self {
        Self::periodic(amount, 12)
    }

    pub fn periodic(amount: Money, every_n_periods: u32) -> Self {
        PrepaymentPolicy::Periodic {
            amount,
            every_n_periods,
        }
    }

    /// build from (period, amount) pairs; a later pair for the same period
    /// replaces an earlier one, then periods left without a positive amount
    /// are dropped
    pub fn custom<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, Money)>,
    {
        let mut amounts: BTreeMap<u32, Money> = entries.into_iter().collect();
        amounts.retain(|_, amount| amount.is_positive());
        PrepaymentPolicy::Custom { amounts }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PrepaymentPolicy::None)
    }

    /// variants are public, so anything not built through the constructors
    /// is checked here before a simulation uses it
    pub fn validate(&self) -> Result<()> {
        match self {
            PrepaymentPolicy::None => Ok(()),
            PrepaymentPolicy::Periodic {
                amount,
                every_n_periods,
            } => {
                if *every_n_periods < 1 {
                    return Err(EngineError::policy(
                        "prepayment interval must be at least one period",
                    ));
                }
                if amount.is_negative() {
                    return Err(EngineError::policy(format!(
                        "prepayment amount must not be negative, got {}",
                        amount
                    )));
                }
                Ok(())
            }
            PrepaymentPolicy::Custom { amounts } => {
                if amounts.contains_key(&0) {
                    return Err(EngineError::policy("prepayment periods are numbered from 1"));
                }
                if let Some((period, amount)) = amounts.iter().find(|(_, a)| a.is_negative()) {
                    return Err(EngineError::policy(format!(
                        "prepayment for period {} must not be negative, got {}",
                        period, amount
                    )));
                }
                Ok(())
            }
        }
    }

    /// amount requested for `period` before any capping
    pub fn requested_for(&self, period: u32) -> Money {
        match self {
            PrepaymentPolicy::None => Money::ZERO,
            PrepaymentPolicy::Periodic {
                amount,
                every_n_periods,
            } => {
                if *every_n_periods > 0 && period % every_n_periods == 0 {
                    *amount
                } else {
                    Money::ZERO
                }
            }
            PrepaymentPolicy::Custom { amounts } => {
                amounts.get(&period).copied().unwrap_or(Money::ZERO)
            }
        }
    }

    /// prepayment to apply in `period`, capped at the balance left after the
    /// scheduled principal so it never drives the balance negative
    pub fn prepayment_for(&self, period: u32, remaining_after_scheduled: Money) -> Money {
        self.requested_for(period)
            .min(remaining_after_scheduled)
            .max(Money::ZERO)
    }
}
