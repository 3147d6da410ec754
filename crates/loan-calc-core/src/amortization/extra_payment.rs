//! Month-by-month payoff simulation under periodic extra principal payments.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::standard::compute_standard;
use crate::types::{monthly_rate, number_of_payments, Money, Rate, Years};

/// Interest actually paid and the month the loan was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPaymentOutcome {
    pub actual_interest: Money,
    pub adjusted_tenure_months: u32,
}

/// One simulated month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStep {
    /// 1-based month number.
    pub month: u32,
    pub opening_balance: Money,
    pub extra_payment: Money,
    pub interest: Money,
    pub principal_repaid: Money,
    /// Balance after the EMI. Negative on an overpaying final month.
    pub closing_balance: Money,
}

/// Iterator over simulated months.
///
/// Each month: the extra payment comes off first when the zero-based month
/// counter is a multiple of the frequency (so always in month 0), interest
/// accrues on what is left, then the principal part of the EMI is repaid.
/// Stops once the balance is at or below zero or the original payment count
/// is reached, whichever comes first.
#[derive(Debug, Clone)]
pub struct SimulationSteps {
    remaining: Money,
    elapsed: u32,
    bound: Decimal,
    monthly_rate: Rate,
    emi: Money,
    extra_payment: Money,
    frequency_months: u32,
}

impl SimulationSteps {
    pub fn new(
        principal: Money,
        annual_rate_percent: Rate,
        tenure_years: Years,
        extra_payment: Money,
        frequency_months: u32,
        emi: Money,
    ) -> Self {
        debug_assert!(frequency_months >= 1, "frequency must be at least one month");
        Self {
            remaining: principal,
            elapsed: 0,
            bound: number_of_payments(tenure_years),
            monthly_rate: monthly_rate(annual_rate_percent),
            emi,
            extra_payment: extra_payment.max(Decimal::ZERO),
            frequency_months,
        }
    }

    /// Months simulated so far.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Unclamped balance after the last simulated month.
    pub fn remaining(&self) -> Money {
        self.remaining
    }

    fn extra_due(&self) -> bool {
        // `checked_rem` keeps a zero frequency from panicking; it then never pays.
        !self.extra_payment.is_zero() && self.elapsed.checked_rem(self.frequency_months) == Some(0)
    }
}

impl Iterator for SimulationSteps {
    type Item = MonthStep;

    fn next(&mut self) -> Option<MonthStep> {
        if self.remaining <= Decimal::ZERO || Decimal::from(self.elapsed) >= self.bound {
            return None;
        }

        let opening_balance = self.remaining;
        let extra_payment = if self.extra_due() {
            self.extra_payment
        } else {
            Decimal::ZERO
        };
        self.remaining -= extra_payment;

        let interest = self.remaining * self.monthly_rate;
        let principal_repaid = self.emi - interest;
        self.remaining -= principal_repaid;
        self.elapsed += 1;

        Some(MonthStep {
            month: self.elapsed,
            opening_balance,
            extra_payment,
            interest,
            principal_repaid,
            closing_balance: self.remaining,
        })
    }
}

/// Payment count rounded up to whole months: the simulation's iteration bound.
pub(crate) fn whole_months(tenure_years: Years) -> u32 {
    number_of_payments(tenure_years)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Actual interest and payoff month with periodic extra payments.
///
/// `emi` must come from [`compute_standard`] for the same principal, rate and
/// tenure; it is never recomputed here. Without an extra payment the standard
/// totals are returned, with the full term as the tenure.
///
/// Preconditions (validated by callers): as for [`compute_standard`], plus
/// `frequency_months >= 1`.
pub fn compute_with_extra_payments(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_years: Years,
    extra_payment: Money,
    frequency_months: u32,
    emi: Money,
) -> ExtraPaymentOutcome {
    if extra_payment <= Decimal::ZERO {
        let standard = compute_standard(principal, annual_rate_percent, tenure_years);
        return ExtraPaymentOutcome {
            actual_interest: standard.estimated_interest,
            adjusted_tenure_months: whole_months(tenure_years),
        };
    }

    let mut steps = SimulationSteps::new(
        principal,
        annual_rate_percent,
        tenure_years,
        extra_payment,
        frequency_months,
        emi,
    );
    let actual_interest = steps
        .by_ref()
        .fold(Decimal::ZERO, |acc, step| acc + step.interest);

    log::debug!(
        "extra-payment simulation ended after {} months, closing balance {}",
        steps.elapsed(),
        steps.remaining()
    );

    ExtraPaymentOutcome {
        actual_interest,
        adjusted_tenure_months: steps.elapsed(),
    }
}
