//! Chart-ready data: principal/interest split and the remaining-balance line.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{calculate_loan, LoanInputs};
use crate::amortization::projection::BalanceProjection;
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub amount: Money,
    /// Share of the total, in percent, two decimals.
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSeries {
    pub dataset_label: String,
    /// `Month 1`, `Month 2`, ...
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub pie: Vec<PieSlice>,
    pub line: LineSeries,
}

fn share(part: Money, total: Money) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        (part / total * dec!(100)).round_dp(2)
    }
}

/// Principal vs actual interest.
pub fn pie_slices(principal: Money, actual_interest: Money) -> Vec<PieSlice> {
    let total = principal + actual_interest;
    vec![
        PieSlice {
            label: "Principal".into(),
            amount: principal,
            share_percent: share(principal, total),
        },
        PieSlice {
            label: "Interest".into(),
            amount: actual_interest,
            share_percent: share(actual_interest, total),
        },
    ]
}

/// Remaining principal per month, from the balance projection.
pub fn line_series(projection: &BalanceProjection) -> LineSeries {
    let values: Vec<Money> = projection.iter().collect();
    let labels = (1..=values.len()).map(|m| format!("Month {m}")).collect();
    LineSeries {
        dataset_label: "Remaining Principal".into(),
        labels,
        values,
    }
}

fn build(input: &LoanInputs) -> LoanCalcResult<ChartData> {
    let loan = calculate_loan(input)?.result;
    Ok(ChartData {
        pie: pie_slices(input.principal, loan.actual_interest),
        line: line_series(&BalanceProjection::from_inputs(input)),
    })
}

/// Chart data for one calculation.
pub fn chart_data(input: &LoanInputs) -> LoanCalcResult<ComputationOutput<ChartData>> {
    let start = Instant::now();
    let data = build(input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Principal/interest split and remaining-balance projection",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "months_projected": data.line.values.len(),
        }),
        Vec::new(),
        elapsed,
        data,
    ))
}

/// Chart state owned by the display layer, refreshed in place on every
/// input change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartState {
    current: Option<ChartData>,
    revision: u64,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from `input`. On invalid input the previous charts stay.
    pub fn update(&mut self, input: &LoanInputs) -> LoanCalcResult<&ChartData> {
        let data = build(input)?;
        self.revision += 1;
        Ok(self.current.insert(data))
    }

    pub fn current(&self) -> Option<&ChartData> {
        self.current.as_ref()
    }

    /// Number of successful updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
