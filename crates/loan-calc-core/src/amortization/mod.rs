//! The amortization engine.
//!
//! `standard` and `extra_payment` are the two pure calculations every other
//! surface is built on; `projection` and `schedule` replay the same monthly
//! update rule for charting and tabular output, and `calculator` is the
//! validating entry point used by callers holding raw user input.

pub mod calculator;
pub mod extra_payment;
pub mod projection;
pub mod schedule;
pub mod standard;

pub use calculator::{calculate_loan, LoanInputs, LoanResult};
pub use extra_payment::{compute_with_extra_payments, ExtraPaymentOutcome};
pub use projection::{project_remaining_principal, BalanceProjection};
pub use schedule::{amortization_schedule, AmortizationSchedule, ScheduleRow};
pub use standard::{compute_standard, principal_for_emi, StandardAmortization};
