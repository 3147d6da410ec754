use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates. Annual loan rates are entered as percentages (8.5 = 8.5%);
/// monthly rates used inside the engine are plain decimals (0.0070833).
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Months in a year; tenure in years is converted with this.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly rate as a decimal from an annual percentage rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Number of monthly payments for a tenure in years. May be fractional.
pub fn number_of_payments(tenure_years: Years) -> Decimal {
    tenure_years * MONTHS_PER_YEAR
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Re-wrap the result, keeping methodology, warnings and metadata.
    pub fn map<U: Serialize>(self, f: impl FnOnce(T) -> U) -> ComputationOutput<U> {
        ComputationOutput {
            result: f(self.result),
            methodology: self.methodology,
            assumptions: self.assumptions,
            warnings: self.warnings,
            metadata: self.metadata,
        }
    }
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
