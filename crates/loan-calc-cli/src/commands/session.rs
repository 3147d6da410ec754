use clap::{Args, Subcommand};
use serde_json::{json, Value};

use loan_calc_core::session::{InputField, JsonFileStore, Session};

/// Arguments for the persisted session
#[derive(Args)]
pub struct SessionArgs {
    /// Session store file
    #[arg(
        long,
        env = "LOANCALC_STORE",
        default_value = ".loancalc-session.json",
        global = true
    )]
    pub store: String,

    #[command(subcommand)]
    pub action: SessionAction,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Restore the saved inputs and recalculate
    Show,
    /// Save one raw input value and recalculate
    Set {
        /// principal, roi, tenure, additional_payments or frequency
        field: String,
        /// Value as entered
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

pub fn run_session(args: SessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&args.store)?;
    log::debug!("session store at {}", store.path().display());
    let mut session = Session::new(store);

    let output = match args.action {
        SessionAction::Show => session.recalculate()?,
        SessionAction::Set { field, value } => {
            let field: InputField = field.parse()?;
            session.update_field(field, &value)?
        }
    };

    let inputs = session.restore()?;
    let mut value = serde_json::to_value(output)?;
    if let Value::Object(map) = &mut value {
        map.insert("inputs".into(), json!(inputs));
    }
    Ok(value)
}
