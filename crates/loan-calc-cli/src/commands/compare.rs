use clap::Args;
use serde_json::Value;

use loan_calc_core::comparison::{compare_scenarios, DEFAULT_MAX_SCENARIOS};
use loan_calc_core::LoanInputs;

use crate::input;

/// Arguments for scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML file holding an array of loan inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Maximum number of scenarios kept (3 for the compact view)
    #[arg(long, default_value_t = DEFAULT_MAX_SCENARIOS)]
    pub max_scenarios: usize,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenarios: Vec<LoanInputs> = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for compare")?;
    let result = compare_scenarios(&scenarios, args.max_scenarios)?;
    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}
