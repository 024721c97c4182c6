mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{AnalyzeArgs, LoanArgs};

/// Fixed-payment loan calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Fixed-payment loan calculator",
    long_about = "Computes the level monthly payment, total paid and total interest for a \
                  loan, and renders its amortization table with decimal precision. \
                  Incomplete input yields zeros unless --strict is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency prefix for amounts in table output
    #[arg(long, default_value = "RD$", global = true)]
    currency: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total paid and total interest
    Summary(LoanArgs),
    /// Month-by-month amortization table
    Schedule(LoanArgs),
    /// Summary with an optional amortization table
    Analyze(AnalyzeArgs),
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
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &cli.currency, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
