use loan_calc_core::amortization::{
    amortization_schedule, compute_standard, compute_with_extra_payments,
    project_remaining_principal,
};
use loan_calc_core::{calculate_loan, LoanCalcError, LoanInputs, Money};
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn reference_loan(extra: Decimal, frequency: u32) -> LoanInputs {
    LoanInputs {
        principal: dec!(1_000_000),
        annual_rate_percent: dec!(8.5),
        tenure_years: dec!(20),
        extra_payment: extra,
        payment_frequency_months: frequency,
    }
}

// ===========================================================================
// Standard EMI — known answers
// ===========================================================================

#[test]
fn test_reference_emi_and_interest() {
    let s = compute_standard(dec!(1_000_000), dec!(8.5), dec!(20));
    // r = 0.085 / 12 = 0.0070833.., n = 240
    assert!(
        (s.emi - dec!(8678.2323)).abs() < dec!(0.001),
        "Expected EMI ~8678.23, got {}",
        s.emi
    );
    assert_eq!(s.estimated_interest, s.emi * dec!(240) - dec!(1_000_000));
    assert!((s.estimated_interest - dec!(1_082_775.76)).abs() < dec!(0.05));
}

#[test]
fn test_zero_rate_independent_of_extra_payment() {
    let without = calculate_loan(&LoanInputs {
        annual_rate_percent: Decimal::ZERO,
        ..reference_loan(Decimal::ZERO, 12)
    })
    .unwrap();
    let with = calculate_loan(&LoanInputs {
        annual_rate_percent: Decimal::ZERO,
        ..reference_loan(dec!(50_000), 12)
    })
    .unwrap();

    assert_eq!(without.result.emi, dec!(1_000_000) / dec!(240));
    assert_eq!(without.result.emi, with.result.emi);
    assert_eq!(with.result.actual_interest, Decimal::ZERO);
    assert!(with.result.adjusted_tenure_months < 240);
}

// ===========================================================================
// Extra payments
// ===========================================================================

#[test]
fn test_yearly_extra_reduces_interest_and_tenure() {
    let r = calculate_loan(&reference_loan(dec!(5000), 12)).unwrap().result;
    assert!(r.adjusted_tenure_months < 240);
    assert!(r.actual_interest < r.estimated_interest);
    assert_eq!(r.adjusted_tenure_months, 213);
}

#[test]
fn test_monthly_extra_pays_off_far_earlier() {
    let r = calculate_loan(&reference_loan(dec!(2500), 1)).unwrap().result;
    assert_eq!(r.adjusted_tenure_months, 142);
    assert!((r.actual_interest - dec!(586_054.00)).abs() < dec!(0.05));
}

#[test]
fn test_extra_covering_whole_principal_clears_in_first_month() {
    let r = calculate_loan(&reference_loan(dec!(1_000_000), 1)).unwrap().result;
    assert_eq!(r.adjusted_tenure_months, 1);
    // Interest accrues on the post-extra balance, which is zero
    assert_eq!(r.actual_interest, Decimal::ZERO);
}

#[test]
fn test_tenure_monotone_in_extra_payment() {
    for frequency in [1u32, 3, 6, 12] {
        let mut previous = u32::MAX;
        for step in 0..=80u32 {
            let extra = Decimal::from(step * 2500);
            let r = calculate_loan(&reference_loan(extra, frequency)).unwrap().result;
            assert!(
                r.adjusted_tenure_months <= previous,
                "tenure rose at extra {extra} every {frequency} months"
            );
            previous = r.adjusted_tenure_months;
        }
    }
}

#[test]
fn test_interest_monotone_in_extra_payment() {
    for frequency in [6u32, 12] {
        let mut previous = Decimal::MAX;
        for step in 0..=40u32 {
            let extra = Decimal::from(step * 2500);
            let r = calculate_loan(&reference_loan(extra, frequency)).unwrap().result;
            assert!(
                r.actual_interest <= previous,
                "interest rose at extra {extra} every {frequency} months"
            );
            previous = r.actual_interest;
        }
    }
}

#[test]
fn test_invalid_principal_rejected_before_engine() {
    let input = LoanInputs {
        principal: dec!(-1),
        ..reference_loan(Decimal::ZERO, 12)
    };
    assert!(matches!(
        calculate_loan(&input),
        Err(LoanCalcError::InvalidInput { .. })
    ));
}

// ===========================================================================
// Projection and schedule consistency
// ===========================================================================

#[test]
fn test_projection_schedule_and_totals_agree() {
    let input = reference_loan(dec!(10_000), 6);
    let loan = calculate_loan(&input).unwrap().result;
    let schedule = amortization_schedule(&input).unwrap().result;
    let projection =
        project_remaining_principal(dec!(1_000_000), dec!(8.5), dec!(20), dec!(10_000), 6, loan.emi);
    let series: Vec<Money> = projection.iter().collect();

    assert_eq!(series.len() as u32, loan.adjusted_tenure_months);
    assert_eq!(schedule.rows.len() as u32, loan.adjusted_tenure_months);
    assert_eq!(schedule.total_interest, loan.actual_interest);
    for (row, balance) in schedule.rows.iter().zip(&series) {
        assert_eq!(row.closing_balance, *balance);
    }
    assert_eq!(*series.last().unwrap(), Decimal::ZERO);
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_emi_positive_interest_non_negative(
        principal in 1_000u32..10_000_000,
        rate_bp in 0u32..3000,
        tenure in 1u32..41,
    ) {
        let s = compute_standard(
            Decimal::from(principal),
            Decimal::new(rate_bp as i64, 2),
            Decimal::from(tenure),
        );
        prop_assert!(s.emi > Decimal::ZERO);
        prop_assert!(s.estimated_interest >= Decimal::ZERO);
    }

    #[test]
    fn prop_zero_rate_exact(principal in 1u32..10_000_000, tenure in 1u32..41) {
        let p = Decimal::from(principal);
        let t = Decimal::from(tenure);
        let s = compute_standard(p, Decimal::ZERO, t);
        prop_assert_eq!(s.emi, p / (t * dec!(12)));
        prop_assert_eq!(s.estimated_interest, Decimal::ZERO);
    }

    #[test]
    fn prop_zero_extra_equals_standard(
        principal in 1_000u32..10_000_000,
        rate_bp in 0u32..3000,
        tenure in 1u32..41,
        frequency in 1u32..25,
    ) {
        let p = Decimal::from(principal);
        let rate = Decimal::new(rate_bp as i64, 2);
        let t = Decimal::from(tenure);
        let s = compute_standard(p, rate, t);
        let out = compute_with_extra_payments(p, rate, t, Decimal::ZERO, frequency, s.emi);
        prop_assert_eq!(out.actual_interest, s.estimated_interest);
        prop_assert_eq!(out.adjusted_tenure_months, tenure * 12);
    }

    #[test]
    fn prop_simulation_bounded_and_consistent_with_projection(
        principal in 1_000u32..5_000_000,
        rate_bp in 0u32..3000,
        tenure in 1u32..31,
        extra_pct in 1u32..100,
        frequency in 1u32..25,
    ) {
        let p = Decimal::from(principal);
        let rate = Decimal::new(rate_bp as i64, 2);
        let t = Decimal::from(tenure);
        let extra = p * Decimal::new(extra_pct as i64, 2);
        let n = tenure * 12;

        let s = compute_standard(p, rate, t);
        let out = compute_with_extra_payments(p, rate, t, extra, frequency, s.emi);
        prop_assert!(out.adjusted_tenure_months <= n);
        prop_assert!(out.adjusted_tenure_months >= 1);

        let series: Vec<Money> =
            project_remaining_principal(p, rate, t, extra, frequency, s.emi).iter().collect();
        prop_assert_eq!(series.len() as u32, out.adjusted_tenure_months);
        let last = *series.last().unwrap();
        if out.adjusted_tenure_months < n {
            prop_assert_eq!(last, Decimal::ZERO);
        }
        if last > Decimal::ZERO {
            prop_assert_eq!(out.adjusted_tenure_months, n);
        }
    }
}
