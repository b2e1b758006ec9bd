pub mod amortization;
pub mod comparison;
pub mod installment;
pub mod prepayment;

pub use amortization::simulate;
pub use comparison::{compare_schedules, compare_with_baseline};
pub use installment::compute_installment;
pub use prepayment::PrepaymentPolicy;
