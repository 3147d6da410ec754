use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_calc_core::amortization::BalanceProjection;
use loan_calc_core::LoanInputs;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_inputs(input_json: &str) -> NapiResult<LoanInputs> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    let output = loan_calc_core::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    let output =
        loan_calc_core::amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Remaining principal per month, as a JSON array of decimal strings.
#[napi]
pub fn project_balance(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    input.validate().map_err(to_napi_error)?;
    let balances: Vec<rust_decimal::Decimal> = BalanceProjection::from_inputs(&input).iter().collect();
    serde_json::to_string(&balances).map_err(to_napi_error)
}

#[napi]
pub fn run_mode(input_json: String) -> NapiResult<String> {
    let mode: loan_calc_core::modes::CalculatorMode =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::modes::run_mode(&mode).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[napi]
pub fn chart_data(input_json: String) -> NapiResult<String> {
    let input = parse_inputs(&input_json)?;
    let output = loan_calc_core::charts::chart_data(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct CompareRequest {
    scenarios: Vec<LoanInputs>,
    #[serde(default = "default_capacity")]
    max_scenarios: usize,
}

fn default_capacity() -> usize {
    loan_calc_core::comparison::DEFAULT_MAX_SCENARIOS
}

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let request: CompareRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_calc_core::comparison::compare_scenarios(&request.scenarios, request.max_scenarios)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
