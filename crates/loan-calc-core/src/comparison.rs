//! Side-by-side comparison of saved loan scenarios.
//!
//! The table is plain state owned by whoever renders it; adding a scenario
//! runs the calculation and stores the display-ready row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{calculate_loan, LoanInputs};
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Scenarios kept by the full comparison view.
pub const DEFAULT_MAX_SCENARIOS: usize = 10;

/// Scenarios kept by the compact comparison view.
pub const COMPACT_MAX_SCENARIOS: usize = 3;

/// Human label for an extra payment frequency.
pub fn frequency_label(months: u32) -> String {
    match months {
        1 => "Monthly".into(),
        3 => "Quarterly".into(),
        6 => "Half-yearly".into(),
        12 => "Yearly".into(),
        n => format!("Every {n} months"),
    }
}

/// One saved scenario, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// 1-based position in the table.
    pub scenario: usize,
    pub principal: Money,
    pub annual_rate_percent: Rate,
    pub tenure_years: Years,
    pub extra_payment: Money,
    pub frequency_label: String,
    pub emi: Money,
    pub estimated_interest: Money,
    pub actual_interest: Money,
    pub adjusted_tenure_years: Decimal,
}

/// Bounded list of saved scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonTable {
    capacity: usize,
    rows: Vec<ComparisonRow>,
}

impl Default for ComparisonTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SCENARIOS)
    }
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    /// Calculate the scenario and append it.
    ///
    /// Fails with [`LoanCalcError::CapacityExceeded`] once the table is full,
    /// leaving the existing rows untouched.
    pub fn add(&mut self, input: &LoanInputs) -> LoanCalcResult<&ComparisonRow> {
        if self.is_full() {
            log::debug!("comparison table full at {} scenarios", self.capacity);
            return Err(LoanCalcError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let result = calculate_loan(input)?.result.rounded();
        self.rows.push(ComparisonRow {
            scenario: self.rows.len() + 1,
            principal: input.principal,
            annual_rate_percent: input.annual_rate_percent,
            tenure_years: input.tenure_years,
            extra_payment: input.extra_payment,
            frequency_label: frequency_label(input.payment_frequency_months),
            emi: result.emi,
            estimated_interest: result.estimated_interest,
            actual_interest: result.actual_interest,
            adjusted_tenure_years: result.adjusted_tenure_years,
        });
        Ok(&self.rows[self.rows.len() - 1])
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Build a comparison table from a batch of scenarios.
///
/// Scenarios past the capacity are skipped with a warning, as are scenarios
/// that fail validation.
pub fn compare_scenarios(
    scenarios: &[LoanInputs],
    capacity: usize,
) -> LoanCalcResult<ComputationOutput<ComparisonTable>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if scenarios.is_empty() {
        return Err(LoanCalcError::invalid(
            "scenarios",
            "At least one scenario is required",
        ));
    }

    let mut table = ComparisonTable::with_capacity(capacity);
    for (idx, scenario) in scenarios.iter().enumerate() {
        match table.add(scenario) {
            Ok(_) => {}
            Err(e @ LoanCalcError::CapacityExceeded { .. }) => {
                warnings.push(format!(
                    "{e} Skipped {} remaining scenario(s).",
                    scenarios.len() - idx
                ));
                break;
            }
            Err(e) => warnings.push(format!("Scenario {} skipped: {e}", idx + 1)),
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Scenario comparison",
        &serde_json::json!({
            "scenarios_submitted": scenarios.len(),
            "capacity": capacity,
        }),
        warnings,
        elapsed,
        table,
    ))
}
