mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compare::CompareArgs;
use commands::loan::LoanArgs;
use commands::modes::{EligibilityArgs, LoanAmountArgs, ModeArgs};
use commands::session::SessionArgs;

/// Loan EMI and prepayment calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan EMI and prepayment calculator",
    long_about = "Computes the equated monthly installment for a loan, simulates \
                  periodic extra payments to find the interest actually paid and the \
                  shortened tenure, and compares saved scenarios side by side. \
                  All arithmetic uses 128-bit decimals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// EMI, estimated vs actual interest and adjusted tenure
    Emi(LoanArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Remaining principal per month
    Projection(LoanArgs),
    /// Pie and line chart data
    Chart(LoanArgs),
    /// Largest loan serviceable from income
    Eligibility(EligibilityArgs),
    /// Loan amount for a target EMI
    LoanAmount(LoanAmountArgs),
    /// Run any calculator mode from a JSON/YAML mode document
    Mode(ModeArgs),
    /// Compare up to 10 saved scenarios
    Compare(CompareArgs),
    /// Show or edit the persisted calculator inputs
    Session(SessionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Projection(args) => commands::loan::run_projection(args),
        Commands::Chart(args) => commands::loan::run_chart(args),
        Commands::Eligibility(args) => commands::modes::run_eligibility(args),
        Commands::LoanAmount(args) => commands::modes::run_loan_amount(args),
        Commands::Mode(args) => commands::modes::run_mode(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Session(args) => commands::session::run_session(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
