//! Persisted calculator session.
//!
//! Raw input strings are kept in an injected [`KeyValueStore`] exactly as
//! entered; they are parsed only when a calculation runs. The engine itself
//! never sees the store.

pub mod store;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::amortization::calculator::{
    calculate_loan, parse_decimal, parse_frequency, LoanInputs, LoanResult,
};
use crate::error::LoanCalcError;
use crate::types::ComputationOutput;
use crate::LoanCalcResult;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

/// A persisted input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    Principal,
    Rate,
    Tenure,
    AdditionalPayments,
    Frequency,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::Principal,
        InputField::Rate,
        InputField::Tenure,
        InputField::AdditionalPayments,
        InputField::Frequency,
    ];

    /// Storage key.
    pub fn key(self) -> &'static str {
        match self {
            InputField::Principal => "principal",
            InputField::Rate => "roi",
            InputField::Tenure => "tenure",
            InputField::AdditionalPayments => "additional_payments",
            InputField::Frequency => "frequency",
        }
    }

    /// Name of the matching `LoanInputs` field, used in error messages.
    fn input_name(self) -> &'static str {
        match self {
            InputField::Principal => "principal",
            InputField::Rate => "annual_rate_percent",
            InputField::Tenure => "tenure_years",
            InputField::AdditionalPayments => "extra_payment",
            InputField::Frequency => "payment_frequency_months",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for InputField {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .into_iter()
            .find(|field| field.key() == s || field.input_name() == s)
            .ok_or_else(|| LoanCalcError::invalid("field", format!("unknown input field '{s}'")))
    }
}

/// Calculator session over a key-value store.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Raw stored value for a field, if any.
    pub fn raw(&self, field: InputField) -> Option<String> {
        self.store.get(field.key())
    }

    /// Inputs from the stored raw values, falling back to
    /// [`LoanInputs::default`] for fields never entered. A stored value that
    /// does not parse is an error naming the field.
    pub fn restore(&self) -> LoanCalcResult<LoanInputs> {
        let mut inputs = LoanInputs::default();
        for field in InputField::ALL {
            let Some(raw) = self.raw(field) else {
                continue;
            };
            apply(&mut inputs, field, &raw)?;
        }
        Ok(inputs)
    }

    /// Persist a raw value as entered, then recalculate.
    ///
    /// The value is stored even when it does not parse, so the user sees
    /// what they typed next time; the recalculation reports the error.
    pub fn update_field(
        &mut self,
        field: InputField,
        raw: &str,
    ) -> LoanCalcResult<ComputationOutput<LoanResult>> {
        self.store.set(field.key(), raw)?;
        self.recalculate()
    }

    /// Persist every field of `inputs`.
    pub fn save(&mut self, inputs: &LoanInputs) -> LoanCalcResult<()> {
        self.store.set(InputField::Principal.key(), &inputs.principal.to_string())?;
        self.store
            .set(InputField::Rate.key(), &inputs.annual_rate_percent.to_string())?;
        self.store
            .set(InputField::Tenure.key(), &inputs.tenure_years.to_string())?;
        self.store.set(
            InputField::AdditionalPayments.key(),
            &inputs.extra_payment.to_string(),
        )?;
        self.store.set(
            InputField::Frequency.key(),
            &inputs.payment_frequency_months.to_string(),
        )
    }

    /// Restore the inputs and run the calculation.
    pub fn recalculate(&self) -> LoanCalcResult<ComputationOutput<LoanResult>> {
        let inputs = self.restore()?;
        calculate_loan(&inputs)
    }
}

fn apply(inputs: &mut LoanInputs, field: InputField, raw: &str) -> LoanCalcResult<()> {
    let name = field.input_name();
    match field {
        InputField::Principal => inputs.principal = parse_decimal(name, raw)?,
        InputField::Rate => inputs.annual_rate_percent = parse_decimal(name, raw)?,
        InputField::Tenure => inputs.tenure_years = parse_decimal(name, raw)?,
        InputField::AdditionalPayments => {
            // An emptied extra-payment box means no extra payment.
            if raw.trim().is_empty() {
                log::warn!("empty {} in session store; treating as zero", field);
                inputs.extra_payment = rust_decimal::Decimal::ZERO;
            } else {
                inputs.extra_payment = parse_decimal(name, raw)?;
            }
        }
        InputField::Frequency => inputs.payment_frequency_months = parse_frequency(name, raw)?,
    }
    Ok(())
}
