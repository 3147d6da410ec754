//! Remaining-principal series for charting.
//!
//! Replays [`SimulationSteps`] so the series can never disagree with the
//! headline totals from [`compute_with_extra_payments`](super::compute_with_extra_payments).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::LoanInputs;
use super::extra_payment::SimulationSteps;
use super::standard::compute_standard;
use crate::types::{Money, Rate, Years};

/// A finite, restartable projection of the post-payment balance.
///
/// Iterating yields one value per month, starting at month 1, clamped at
/// zero. The series ends at the month the loan is cleared or at the
/// original term. Every call to [`BalanceProjection::iter`] starts over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceProjection {
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_years: Years,
    pub extra_payment: Money,
    pub frequency_months: u32,
    pub emi: Money,
}

impl BalanceProjection {
    /// Projection for already-validated inputs; derives the EMI itself.
    pub fn from_inputs(inputs: &LoanInputs) -> Self {
        let emi = compute_standard(
            inputs.principal,
            inputs.annual_rate_percent,
            inputs.tenure_years,
        )
        .emi;
        project_remaining_principal(
            inputs.principal,
            inputs.annual_rate_percent,
            inputs.tenure_years,
            inputs.extra_payment,
            inputs.payment_frequency_months,
            emi,
        )
    }

    pub fn iter(&self) -> ProjectionIter {
        ProjectionIter {
            steps: SimulationSteps::new(
                self.principal,
                self.annual_rate_percent,
                self.tenure_years,
                self.extra_payment,
                self.frequency_months,
                self.emi,
            ),
        }
    }
}

impl<'a> IntoIterator for &'a BalanceProjection {
    type Item = Money;
    type IntoIter = ProjectionIter;

    fn into_iter(self) -> ProjectionIter {
        self.iter()
    }
}

/// Lazily simulated balances, clamped at zero.
#[derive(Debug, Clone)]
pub struct ProjectionIter {
    steps: SimulationSteps,
}

impl Iterator for ProjectionIter {
    type Item = Money;

    fn next(&mut self) -> Option<Money> {
        self.steps
            .next()
            .map(|step| step.closing_balance.max(Decimal::ZERO))
    }
}

/// Build the projection series for a loan. `emi` must match the standard
/// EMI for the same principal, rate and tenure.
pub fn project_remaining_principal(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_years: Years,
    extra_payment: Money,
    frequency_months: u32,
    emi: Money,
) -> BalanceProjection {
    BalanceProjection {
        principal,
        annual_rate_percent,
        tenure_years,
        extra_payment,
        frequency_months,
        emi,
    }
}
