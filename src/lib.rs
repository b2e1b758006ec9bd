pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod types;

// re-export key types
pub use config::{LoanRequest, PeriodAmount, PrepaymentMode, Tenure};
pub use decimal::{Money, Rate, ROUNDING_TOLERANCE};
pub use errors::{EngineError, Result};
pub use payments::{
    compare_schedules, compare_with_baseline, compute_installment, simulate, PrepaymentPolicy,
};
pub use types::{
    AmortizationResult, LoanTerms, PeriodRecord, PrepaymentComparison, PrepaymentImpact,
    YearSummary,
};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
