//! Closed-form EMI and total interest for a fixed-installment loan.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::types::{monthly_rate, number_of_payments, Money, Rate, Years};

/// EMI and total interest under the standard schedule (no extra payments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardAmortization {
    pub emi: Money,
    pub estimated_interest: Money,
}

/// `(1+r)^n` for the monthly rate and payment count.
fn compound_factor(r: Rate, n: Decimal) -> Decimal {
    (Decimal::ONE + r).powd(n)
}

/// Equated Monthly Installment and total interest over the full term.
///
/// `emi = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and
/// `n = tenure_years * 12`. At a zero rate the annuity factor vanishes, so
/// the EMI is the straight split `P / n` and no interest accrues.
///
/// Preconditions (validated by callers): `principal > 0`,
/// `annual_rate_percent >= 0`, `tenure_years > 0`.
pub fn compute_standard(
    principal: Money,
    annual_rate_percent: Rate,
    tenure_years: Years,
) -> StandardAmortization {
    let r = monthly_rate(annual_rate_percent);
    let n = number_of_payments(tenure_years);
    debug_assert!(n > Decimal::ZERO, "tenure must be positive");

    if r.is_zero() {
        return StandardAmortization {
            emi: principal / n,
            estimated_interest: Decimal::ZERO,
        };
    }

    let factor = compound_factor(r, n);
    let annuity = factor - Decimal::ONE;
    if annuity.is_zero() {
        // Rate too small to register in 28 significant digits.
        return StandardAmortization {
            emi: principal / n,
            estimated_interest: Decimal::ZERO,
        };
    }

    // Ratio first: it stays near `r` for any `(1+r)^n`.
    let emi = principal * (r * factor / annuity);
    StandardAmortization {
        emi,
        estimated_interest: emi * n - principal,
    }
}

/// Loan amount serviceable by a given EMI: the inverse of [`compute_standard`].
///
/// `P = emi * ((1+r)^n - 1) / (r * (1+r)^n)`, and `emi * n` at a zero rate.
pub fn principal_for_emi(emi: Money, annual_rate_percent: Rate, tenure_years: Years) -> Money {
    let r = monthly_rate(annual_rate_percent);
    let n = number_of_payments(tenure_years);

    if r.is_zero() {
        return emi * n;
    }

    let factor = compound_factor(r, n);
    let denominator = r * factor;
    if denominator.is_zero() {
        return emi * n;
    }
    // Ratio is at most `n`.
    emi * ((factor - Decimal::ONE) / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_reference_loan() {
        // 1,000,000 at 8.5% over 20 years
        let s = compute_standard(dec!(1_000_000), dec!(8.5), dec!(20));
        assert!((s.emi - dec!(8678.23)).abs() < dec!(0.01), "emi = {}", s.emi);
        assert_eq!(s.estimated_interest, s.emi * dec!(240) - dec!(1_000_000));
    }

    #[test]
    fn test_emi_twelve_percent_one_year() {
        // 100,000 at 12% for 12 months => 8884.88
        let s = compute_standard(dec!(100_000), dec!(12), dec!(1));
        assert!((s.emi - dec!(8884.88)).abs() < dec!(0.01));
        assert!((s.estimated_interest - dec!(6618.55)).abs() < dec!(0.05));
    }

    #[test]
    fn test_zero_rate_is_straight_split() {
        let s = compute_standard(dec!(1200), Decimal::ZERO, dec!(1));
        assert_eq!(s.emi, dec!(100));
        assert_eq!(s.estimated_interest, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_tenure() {
        // 18 months at zero rate
        let s = compute_standard(dec!(1800), Decimal::ZERO, dec!(1.5));
        assert_eq!(s.emi, dec!(100));
    }

    #[test]
    fn test_principal_for_emi_inverts_emi() {
        let s = compute_standard(dec!(500_000), dec!(9), dec!(15));
        let p = principal_for_emi(s.emi, dec!(9), dec!(15));
        assert!((p - dec!(500_000)).abs() < dec!(0.0001), "p = {p}");
    }

    #[test]
    fn test_large_principal_at_rate_and_tenure_caps() {
        // (1+r)^600 is about 7e20 at 100% a year; P * r * factor alone would overflow
        let s = compute_standard(dec!(10_000_000_000), dec!(100), dec!(50));
        assert!((s.emi - dec!(833_333_333.33)).abs() < dec!(0.01), "emi = {}", s.emi);
        assert!((s.estimated_interest - dec!(490_000_000_000)).abs() < dec!(1));

        let p = principal_for_emi(s.emi, dec!(100), dec!(50));
        assert!((p - dec!(10_000_000_000)).abs() < dec!(0.01), "p = {p}");
    }

    #[test]
    fn test_principal_for_emi_zero_rate() {
        assert_eq!(principal_for_emi(dec!(100), Decimal::ZERO, dec!(2)), dec!(2400));
    }
}
