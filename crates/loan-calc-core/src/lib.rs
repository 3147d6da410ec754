pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "modes")]
pub mod modes;

#[cfg(feature = "comparison")]
pub mod comparison;

#[cfg(feature = "charts")]
pub mod charts;

#[cfg(feature = "session")]
pub mod session;

pub use amortization::calculator::{calculate_loan, LoanInputs, LoanResult};
pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
