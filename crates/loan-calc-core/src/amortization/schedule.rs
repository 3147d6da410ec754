use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::LoanInputs;
use super::extra_payment::SimulationSteps;
use super::standard::compute_standard;
use crate::types::*;
use crate::LoanCalcResult;

/// A single month in the amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: Money,
    pub extra_payment: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    /// Clamped at zero; an overpaying final month shows as fully repaid.
    pub closing_balance: Money,
}

/// Month-by-month amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub emi: Money,
    pub rows: Vec<ScheduleRow>,
    pub total_interest: Money,
    pub total_extra_payments: Money,
    pub total_emi_paid: Money,
    /// Balance left after the last row (zero when paid off).
    pub final_balance: Money,
}

/// Build a month-by-month schedule using the same update rule as the
/// extra-payment simulation, so the row count equals the adjusted tenure and
/// the interest total equals the actual interest.
pub fn amortization_schedule(
    input: &LoanInputs,
) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.validate()?;

    let standard = compute_standard(
        input.principal,
        input.annual_rate_percent,
        input.tenure_years,
    );

    let steps = SimulationSteps::new(
        input.principal,
        input.annual_rate_percent,
        input.tenure_years,
        input.extra_payment,
        input.payment_frequency_months,
        standard.emi,
    );

    let mut rows = Vec::with_capacity(input.number_of_payments() as usize);
    let mut total_interest = Decimal::ZERO;
    let mut total_extra_payments = Decimal::ZERO;
    let mut last_closing = input.principal;

    for step in steps {
        total_interest += step.interest;
        total_extra_payments += step.extra_payment;
        last_closing = step.closing_balance;
        rows.push(ScheduleRow {
            month: step.month,
            opening_balance: step.opening_balance,
            extra_payment: step.extra_payment,
            interest: step.interest,
            principal_repaid: step.principal_repaid,
            closing_balance: step.closing_balance.max(Decimal::ZERO),
        });
    }

    if last_closing < Decimal::ZERO {
        warnings.push(format!(
            "Final month overpays the balance by {}",
            (-last_closing).round_dp(2)
        ));
    }

    let output = AmortizationSchedule {
        emi: standard.emi,
        total_emi_paid: standard.emi * Decimal::from(rows.len() as u64),
        rows,
        total_interest,
        total_extra_payments,
        final_balance: last_closing.max(Decimal::ZERO),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "tenure_years": input.tenure_years.to_string(),
            "extra_payment": input.extra_payment.to_string(),
            "payment_frequency_months": input.payment_frequency_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::calculator::calculate_loan;
    use rust_decimal_macros::dec;

    fn quarterly_extra() -> LoanInputs {
        LoanInputs {
            principal: dec!(500_000),
            annual_rate_percent: dec!(9),
            tenure_years: dec!(10),
            extra_payment: dec!(10_000),
            payment_frequency_months: 3,
        }
    }

    #[test]
    fn test_schedule_agrees_with_calculator() {
        let input = quarterly_extra();
        let schedule = amortization_schedule(&input).unwrap().result;
        let loan = calculate_loan(&input).unwrap().result;

        assert_eq!(schedule.rows.len() as u32, loan.adjusted_tenure_months);
        assert_eq!(schedule.total_interest, loan.actual_interest);
        assert_eq!(schedule.final_balance, Decimal::ZERO);
    }

    #[test]
    fn test_extra_payments_every_quarter() {
        let schedule = amortization_schedule(&quarterly_extra()).unwrap().result;
        for row in &schedule.rows {
            let expected = if (row.month - 1) % 3 == 0 {
                dec!(10_000)
            } else {
                Decimal::ZERO
            };
            assert_eq!(row.extra_payment, expected, "month {}", row.month);
        }
    }

    #[test]
    fn test_rows_chain_balances() {
        let schedule = amortization_schedule(&quarterly_extra()).unwrap().result;
        for pair in schedule.rows.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        }
        assert_eq!(schedule.rows[0].opening_balance, dec!(500_000));
    }

    #[test]
    fn test_standard_schedule_runs_full_term() {
        let mut input = quarterly_extra();
        input.extra_payment = Decimal::ZERO;
        let schedule = amortization_schedule(&input).unwrap().result;
        assert_eq!(schedule.rows.len(), 120);
        assert_eq!(schedule.total_extra_payments, Decimal::ZERO);
    }
}
