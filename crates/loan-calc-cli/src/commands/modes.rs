use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::modes::eligibility::{self, EligibilityInput, DEFAULT_OBLIGATION_RATIO};
use loan_calc_core::modes::loan_amount::{self, LoanAmountInput};
use loan_calc_core::modes::{self, CalculatorMode};

use crate::input;

/// Arguments for income-based eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Installments already paid each month
    #[arg(long, default_value = "0")]
    pub obligations: Decimal,

    /// Maximum share of income for all installments (0.5 = 50%)
    #[arg(long)]
    pub ratio: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "roi")]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let elig_input: EligibilityInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EligibilityInput {
            monthly_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            existing_obligations: args.obligations,
            max_obligation_ratio: args.ratio.unwrap_or(DEFAULT_OBLIGATION_RATIO),
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
        },
    };

    let result = eligibility::calculate_eligibility(&elig_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for solving the loan amount from a target EMI
#[derive(Args)]
pub struct LoanAmountArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly installment to afford
    #[arg(long)]
    pub emi: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "roi")]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Option<Decimal>,
}

pub fn run_loan_amount(args: LoanAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount_input: LoanAmountInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => LoanAmountInput {
            target_emi: args.emi.ok_or("--emi is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
        },
    };

    let result = loan_amount::calculate_loan_amount(&amount_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for running a tagged mode document
#[derive(Args)]
pub struct ModeArgs {
    /// Path to JSON/YAML file, e.g. {"Emi": {...}} or {"Eligibility": {...}}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mode(args: ModeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mode: CalculatorMode = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for mode")?;
    log::debug!("running calculator mode {}", mode.name());
    let result = modes::run_mode(&mode)?;
    Ok(serde_json::to_value(result)?)
}
