use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use loan_calc_core::amortization::{amortization_schedule, BalanceProjection};
use loan_calc_core::charts::chart_data;
use loan_calc_core::types::with_metadata;
use loan_calc_core::{calculate_loan, LoanInputs};

use crate::input;

/// Arguments shared by every single-loan command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long, alias = "roi")]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Extra principal payment
    #[arg(long, default_value = "0")]
    pub extra_payment: Decimal,

    /// Extra payment frequency: monthly, quarterly, half-yearly, yearly, or months
    #[arg(long, default_value = "yearly")]
    pub frequency: String,
}

/// Months between extra payments from a frequency name or a month count.
pub fn frequency_months(frequency: &str) -> Result<u32, Box<dyn std::error::Error>> {
    match frequency.to_lowercase().as_str() {
        "monthly" => Ok(1),
        "quarterly" => Ok(3),
        "half-yearly" | "halfyearly" | "semiannual" => Ok(6),
        "yearly" | "annual" | "annually" => Ok(12),
        other => other.parse::<u32>().map_err(|_| -> Box<dyn std::error::Error> {
            format!(
                "Unknown frequency '{}'. Use: monthly, quarterly, half-yearly, yearly, or a number of months",
                frequency
            )
            .into()
        }),
    }
}

impl LoanArgs {
    /// Resolve inputs from file, stdin, or flags, in that order.
    pub fn resolve(&self) -> Result<LoanInputs, Box<dyn std::error::Error>> {
        if let Some(inputs) = input::load::<LoanInputs>(self.input.as_deref())? {
            return Ok(inputs);
        }

        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let tenure = self
            .tenure
            .ok_or("--tenure is required (or provide --input)")?;

        Ok(LoanInputs {
            principal,
            annual_rate_percent: rate,
            tenure_years: tenure,
            extra_payment: self.extra_payment,
            payment_frequency_months: frequency_months(&self.frequency)?,
        })
    }
}

pub fn run_emi(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.resolve()?;
    let result = calculate_loan(&inputs)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.resolve()?;
    let result = amortization_schedule(&inputs)?;
    Ok(serde_json::to_value(result)?)
}

#[derive(Serialize)]
struct ProjectionRow {
    month: usize,
    remaining_principal: Decimal,
}

#[derive(Serialize)]
struct ProjectionOutput {
    emi: Decimal,
    months: usize,
    rows: Vec<ProjectionRow>,
}

pub fn run_projection(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let inputs = args.resolve()?;
    inputs.validate()?;
    let projection = BalanceProjection::from_inputs(&inputs);
    let rows: Vec<ProjectionRow> = projection
        .iter()
        .enumerate()
        .map(|(i, balance)| ProjectionRow {
            month: i + 1,
            remaining_principal: balance.round_dp(2),
        })
        .collect();
    let output = ProjectionOutput {
        emi: projection.emi.round_dp(2),
        months: rows.len(),
        rows,
    };
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Remaining principal after each monthly payment",
        &inputs,
        Vec::new(),
        elapsed,
        output,
    ))?)
}

pub fn run_chart(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = args.resolve()?;
    let result = chart_data(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
