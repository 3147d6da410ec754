use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

use super::extra_payment::{compute_with_extra_payments, whole_months};
use super::standard::compute_standard;
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Highest accepted annual rate, in percent.
pub const MAX_RATE_PERCENT: Decimal = dec!(100);

/// Longest accepted tenure, in years.
pub const MAX_TENURE_YEARS: Decimal = dec!(50);

/// Largest accepted money amount (principal, extra payment, income, EMI).
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Extra payment frequency used when none is given (once a year).
pub const DEFAULT_FREQUENCY_MONTHS: u32 = 12;

fn default_frequency() -> u32 {
    DEFAULT_FREQUENCY_MONTHS
}

/// Inputs for a single loan calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_percent: Rate,
    /// Loan tenure in years; may be fractional.
    pub tenure_years: Years,
    /// Extra principal paid every `payment_frequency_months`. Zero disables it.
    #[serde(default)]
    pub extra_payment: Money,
    /// Interval between extra payments, in months.
    #[serde(default = "default_frequency")]
    pub payment_frequency_months: u32,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            principal: dec!(1_000_000),
            annual_rate_percent: dec!(8.5),
            tenure_years: dec!(20),
            extra_payment: Decimal::ZERO,
            payment_frequency_months: DEFAULT_FREQUENCY_MONTHS,
        }
    }
}

impl LoanInputs {
    /// Reject inputs the engine's preconditions do not cover.
    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "principal",
                "Please enter a valid principal amount.",
            ));
        }
        validate_amount("principal", self.principal)?;
        validate_terms(self.annual_rate_percent, self.tenure_years)?;
        if self.extra_payment < Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "extra_payment",
                "Extra payment cannot be negative",
            ));
        }
        validate_amount("extra_payment", self.extra_payment)?;
        if self.payment_frequency_months == 0 {
            return Err(LoanCalcError::invalid(
                "payment_frequency_months",
                "Frequency must be at least one month",
            ));
        }
        Ok(())
    }

    /// Full standard term in whole months.
    pub fn number_of_payments(&self) -> u32 {
        whole_months(self.tenure_years)
    }
}

/// Upper bound on a money input.
pub(crate) fn validate_amount(field: &str, amount: Money) -> LoanCalcResult<()> {
    if amount > MAX_AMOUNT {
        return Err(LoanCalcError::invalid(
            field,
            format!("Amount cannot exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

/// Rate and tenure checks shared by every calculator mode.
pub(crate) fn validate_terms(annual_rate_percent: Rate, tenure_years: Years) -> LoanCalcResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    if annual_rate_percent > MAX_RATE_PERCENT {
        return Err(LoanCalcError::invalid(
            "annual_rate_percent",
            format!("Interest rate cannot exceed {MAX_RATE_PERCENT}%"),
        ));
    }
    if tenure_years <= Decimal::ZERO {
        return Err(LoanCalcError::invalid("tenure_years", "Tenure must be positive"));
    }
    if tenure_years > MAX_TENURE_YEARS {
        return Err(LoanCalcError::invalid(
            "tenure_years",
            format!("Tenure cannot exceed {MAX_TENURE_YEARS} years"),
        ));
    }
    Ok(())
}

/// Parse a raw user-entered amount, naming the field on failure.
pub fn parse_decimal(field: &str, raw: &str) -> LoanCalcResult<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LoanCalcError::invalid(field, format!("'{raw}' is not a number")))
}

/// Parse a raw frequency in months.
pub fn parse_frequency(field: &str, raw: &str) -> LoanCalcResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| LoanCalcError::invalid(field, format!("'{raw}' is not a whole number of months")))
}

/// Result of a loan calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    pub emi: Money,
    /// Interest over the full term without extra payments.
    pub estimated_interest: Money,
    /// Interest actually paid with extra payments.
    pub actual_interest: Money,
    pub adjusted_tenure_months: u32,
    /// `adjusted_tenure_months / 12`, one decimal place.
    pub adjusted_tenure_years: Decimal,
    pub interest_saved: Money,
    pub months_saved: u32,
    /// Principal plus actual interest.
    pub total_payment: Money,
}

impl LoanResult {
    /// Monetary fields rounded to two decimals for display.
    pub fn rounded(&self) -> Self {
        Self {
            emi: self.emi.round_dp(2),
            estimated_interest: self.estimated_interest.round_dp(2),
            actual_interest: self.actual_interest.round_dp(2),
            interest_saved: self.interest_saved.round_dp(2),
            total_payment: self.total_payment.round_dp(2),
            ..self.clone()
        }
    }
}

/// Validate inputs, derive the EMI, and run the extra-payment simulation.
pub fn calculate_loan(input: &LoanInputs) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let standard = compute_standard(
        input.principal,
        input.annual_rate_percent,
        input.tenure_years,
    );
    let outcome = compute_with_extra_payments(
        input.principal,
        input.annual_rate_percent,
        input.tenure_years,
        input.extra_payment,
        input.payment_frequency_months,
        standard.emi,
    );

    let full_term = input.number_of_payments();
    if input.extra_payment > input.principal {
        warnings.push(format!(
            "Extra payment {} exceeds the principal; the loan is cleared in the first month",
            input.extra_payment
        ));
    }
    if input.extra_payment > Decimal::ZERO && outcome.adjusted_tenure_months >= full_term {
        warnings.push(
            "Extra payments do not clear the loan before the original term".into(),
        );
    }

    let result = LoanResult {
        emi: standard.emi,
        estimated_interest: standard.estimated_interest,
        actual_interest: outcome.actual_interest,
        adjusted_tenure_months: outcome.adjusted_tenure_months,
        adjusted_tenure_years: (Decimal::from(outcome.adjusted_tenure_months) / MONTHS_PER_YEAR)
            .round_dp(1),
        interest_saved: standard.estimated_interest - outcome.actual_interest,
        months_saved: full_term.saturating_sub(outcome.adjusted_tenure_months),
        total_payment: input.principal + outcome.actual_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity EMI with monthly extra-payment payoff simulation",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "tenure_years": input.tenure_years.to_string(),
            "extra_payment": input.extra_payment.to_string(),
            "payment_frequency_months": input.payment_frequency_months,
            "extra_payment_timing": "start of month, before interest accrual",
        }),
        warnings,
        elapsed,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> LoanInputs {
        LoanInputs::default()
    }

    #[test]
    fn test_reference_loan_without_extra() {
        let out = calculate_loan(&reference_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.adjusted_tenure_months, 240);
        assert_eq!(r.actual_interest, r.estimated_interest);
        assert_eq!(r.months_saved, 0);
        assert_eq!(r.interest_saved, Decimal::ZERO);
        assert_eq!(r.adjusted_tenure_years, dec!(20));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_reference_loan_with_yearly_extra() {
        let mut input = reference_input();
        input.extra_payment = dec!(5000);
        let r = calculate_loan(&input).unwrap().result;
        assert_eq!(r.adjusted_tenure_months, 213);
        assert_eq!(r.months_saved, 27);
        assert_eq!(r.adjusted_tenure_years, dec!(17.8));
        assert!(r.interest_saved > Decimal::ZERO);
    }

    #[test]
    fn test_rounded_display() {
        let r = calculate_loan(&reference_input()).unwrap().result.rounded();
        assert_eq!(r.emi, dec!(8678.23));
        assert!(r.estimated_interest.scale() <= 2);
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let mut input = reference_input();
        input.principal = Decimal::ZERO;
        match calculate_loan(&input) {
            Err(LoanCalcError::InvalidInput { field, .. }) => assert_eq!(field, "principal"),
            other => panic!("expected invalid principal, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let mut input = reference_input();
        input.payment_frequency_months = 0;
        assert!(calculate_loan(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_tenure_and_negative_rate() {
        let mut input = reference_input();
        input.tenure_years = Decimal::ZERO;
        assert!(calculate_loan(&input).is_err());

        let mut input = reference_input();
        input.annual_rate_percent = dec!(-1);
        assert!(calculate_loan(&input).is_err());
    }

    #[test]
    fn test_rejects_terms_above_caps() {
        let mut input = reference_input();
        input.annual_rate_percent = dec!(100.01);
        match calculate_loan(&input) {
            Err(LoanCalcError::InvalidInput { field, .. }) => {
                assert_eq!(field, "annual_rate_percent")
            }
            other => panic!("expected rate cap rejection, got {other:?}"),
        }

        let mut input = reference_input();
        input.tenure_years = dec!(50.1);
        match calculate_loan(&input) {
            Err(LoanCalcError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
            other => panic!("expected tenure cap rejection, got {other:?}"),
        }

        let mut input = reference_input();
        input.principal = MAX_AMOUNT + Decimal::ONE;
        assert!(calculate_loan(&input).is_err());

        let mut input = reference_input();
        input.extra_payment = MAX_AMOUNT + Decimal::ONE;
        assert!(calculate_loan(&input).is_err());
    }

    #[test]
    fn test_large_loan_at_rate_and_tenure_caps() {
        let input = LoanInputs {
            principal: dec!(10_000_000_000),
            annual_rate_percent: MAX_RATE_PERCENT,
            tenure_years: MAX_TENURE_YEARS,
            extra_payment: Decimal::ZERO,
            payment_frequency_months: 12,
        };
        assert!(input.validate().is_ok());
        let out = calculate_loan(&input).unwrap();
        let r = &out.result;
        assert!((r.emi - dec!(833_333_333.33)).abs() < dec!(0.01), "emi = {}", r.emi);
        assert_eq!(r.adjusted_tenure_months, 600);
        assert_eq!(r.actual_interest, r.estimated_interest);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_largest_amounts_at_caps() {
        let input = LoanInputs {
            principal: MAX_AMOUNT,
            annual_rate_percent: MAX_RATE_PERCENT,
            tenure_years: MAX_TENURE_YEARS,
            extra_payment: MAX_AMOUNT,
            payment_frequency_months: 1,
        };
        let r = calculate_loan(&input).unwrap().result;
        assert_eq!(r.adjusted_tenure_months, 1);
        assert!(r.estimated_interest > Decimal::ZERO);
    }

    #[test]
    fn test_warns_when_extra_exceeds_principal() {
        let input = LoanInputs {
            principal: dec!(10_000),
            annual_rate_percent: dec!(10),
            tenure_years: dec!(1),
            extra_payment: dec!(15_000),
            payment_frequency_months: 1,
        };
        let out = calculate_loan(&input).unwrap();
        assert_eq!(out.result.adjusted_tenure_months, 1);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_parse_decimal_rejects_text() {
        assert_eq!(parse_decimal("principal", " 2500.50 ").unwrap(), dec!(2500.50));
        assert!(parse_decimal("principal", "abc").is_err());
        assert!(parse_decimal("principal", "").is_err());
        assert_eq!(parse_frequency("frequency", "3").unwrap(), 3);
        assert!(parse_frequency("frequency", "-1").is_err());
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let input: LoanInputs = serde_json::from_str(
            r#"{"principal":"200000","annual_rate_percent":"7","tenure_years":"10"}"#,
        )
        .unwrap();
        assert_eq!(input.extra_payment, Decimal::ZERO);
        assert_eq!(input.payment_frequency_months, 12);
    }
}
