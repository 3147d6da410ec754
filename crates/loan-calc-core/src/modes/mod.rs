//! Calculator modes: the EMI calculator plus the two closed-form variants
//! built on the inverse of the EMI formula.

pub mod eligibility;
pub mod loan_amount;

use serde::{Deserialize, Serialize};

use crate::amortization::calculator::{calculate_loan, LoanInputs, LoanResult};
use crate::types::ComputationOutput;
use crate::LoanCalcResult;

pub use eligibility::{calculate_eligibility, EligibilityInput, EligibilityResult};
pub use loan_amount::{calculate_loan_amount, LoanAmountInput, LoanAmountResult};

/// Mode selector, carrying the inputs each mode needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CalculatorMode {
    /// EMI, interest and payoff under extra payments.
    Emi(LoanInputs),
    /// Largest loan affordable from income and existing obligations.
    Eligibility(EligibilityInput),
    /// Loan amount serviceable by a target EMI.
    LoanAmount(LoanAmountInput),
}

/// Result of whichever mode ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModeResult {
    Emi(LoanResult),
    Eligibility(EligibilityResult),
    LoanAmount(LoanAmountResult),
}

impl CalculatorMode {
    pub fn name(&self) -> &'static str {
        match self {
            CalculatorMode::Emi(_) => "emi",
            CalculatorMode::Eligibility(_) => "eligibility",
            CalculatorMode::LoanAmount(_) => "loan_amount",
        }
    }
}

/// Run the selected mode.
pub fn run_mode(mode: &CalculatorMode) -> LoanCalcResult<ComputationOutput<ModeResult>> {
    match mode {
        CalculatorMode::Emi(input) => Ok(calculate_loan(input)?.map(ModeResult::Emi)),
        CalculatorMode::Eligibility(input) => {
            Ok(calculate_eligibility(input)?.map(ModeResult::Eligibility))
        }
        CalculatorMode::LoanAmount(input) => {
            Ok(calculate_loan_amount(input)?.map(ModeResult::LoanAmount))
        }
    }
}
