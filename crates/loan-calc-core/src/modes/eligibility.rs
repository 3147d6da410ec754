use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{validate_amount, validate_terms};
use crate::amortization::standard::principal_for_emi;
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Share of monthly income lenders allow for all loan installments.
pub const DEFAULT_OBLIGATION_RATIO: Rate = dec!(0.5);

fn default_ratio() -> Rate {
    DEFAULT_OBLIGATION_RATIO
}

/// Loan eligibility from income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub monthly_income: Money,
    /// Installments already being paid each month.
    #[serde(default)]
    pub existing_obligations: Money,
    /// Fixed-obligation-to-income ratio as a decimal (0.5 = 50%).
    #[serde(default = "default_ratio")]
    pub max_obligation_ratio: Rate,
    /// Annual interest rate in percent.
    pub annual_rate_percent: Rate,
    pub tenure_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Largest EMI the income supports after existing obligations.
    pub max_emi: Money,
    pub eligible_loan_amount: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

pub fn calculate_eligibility(
    input: &EligibilityInput,
) -> LoanCalcResult<ComputationOutput<EligibilityResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_income <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if input.existing_obligations < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "existing_obligations",
            "Existing obligations cannot be negative",
        ));
    }
    validate_amount("monthly_income", input.monthly_income)?;
    validate_amount("existing_obligations", input.existing_obligations)?;
    if input.max_obligation_ratio <= Decimal::ZERO || input.max_obligation_ratio > Decimal::ONE {
        return Err(LoanCalcError::invalid(
            "max_obligation_ratio",
            "Ratio must be in (0, 1]",
        ));
    }
    validate_terms(input.annual_rate_percent, input.tenure_years)?;

    let headroom = input.monthly_income * input.max_obligation_ratio - input.existing_obligations;

    let output = if headroom <= Decimal::ZERO {
        warnings.push(format!(
            "Existing obligations {} use up the allowed {}% of income; no further loan is serviceable",
            input.existing_obligations,
            (input.max_obligation_ratio * dec!(100)).normalize()
        ));
        EligibilityResult {
            max_emi: Decimal::ZERO,
            eligible_loan_amount: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        }
    } else {
        let eligible_loan_amount =
            principal_for_emi(headroom, input.annual_rate_percent, input.tenure_years);
        let total_payment = headroom * number_of_payments(input.tenure_years);
        EligibilityResult {
            max_emi: headroom,
            eligible_loan_amount,
            total_payment,
            total_interest: total_payment - eligible_loan_amount,
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Income-based eligibility (obligation ratio, inverse annuity)",
        &serde_json::json!({
            "monthly_income": input.monthly_income.to_string(),
            "existing_obligations": input.existing_obligations.to_string(),
            "max_obligation_ratio": input.max_obligation_ratio.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "tenure_years": input.tenure_years.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
