use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{validate_amount, validate_terms};
use crate::amortization::standard::principal_for_emi;
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Solve for the loan amount given a monthly installment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAmountInput {
    pub target_emi: Money,
    /// Annual interest rate in percent.
    pub annual_rate_percent: Rate,
    pub tenure_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAmountResult {
    pub loan_amount: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

pub fn calculate_loan_amount(
    input: &LoanAmountInput,
) -> LoanCalcResult<ComputationOutput<LoanAmountResult>> {
    let start = Instant::now();

    if input.target_emi <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "target_emi",
            "Target EMI must be positive",
        ));
    }
    validate_amount("target_emi", input.target_emi)?;
    validate_terms(input.annual_rate_percent, input.tenure_years)?;

    let loan_amount = principal_for_emi(
        input.target_emi,
        input.annual_rate_percent,
        input.tenure_years,
    );
    let total_payment = input.target_emi * number_of_payments(input.tenure_years);

    let output = LoanAmountResult {
        loan_amount,
        total_payment,
        total_interest: total_payment - loan_amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Present value of an EMI annuity",
        &serde_json::json!({
            "target_emi": input.target_emi.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "tenure_years": input.tenure_years.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}
