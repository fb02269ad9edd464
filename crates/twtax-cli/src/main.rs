mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assess::AssessArgs;
use commands::filing::FilingArgs;
use commands::rates::RateArgs;

/// Taiwan corporate income tax calculations
#[derive(Parser)]
#[command(
    name = "twtax",
    version,
    about = "Taiwan corporate income tax calculations",
    long_about = "Computes corporate income tax and undistributed-earnings tax for a \
                  single fiscal entity with decimal precision. Supports the audited-style \
                  direct assessment and the three filing regimes (book-review, \
                  income-standard, audited), plus industry rate table lookups."
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
    /// Direct assessment from income-statement figures
    Assess(AssessArgs),
    /// Compute tax under a filing method (book, standard, audit)
    Filing(FilingArgs),
    /// List industries with their book-review and income-standard rates
    Industries,
    /// Look up the rates for one industry
    Rate(RateArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Filing(args) => commands::filing::run_filing(args),
        Commands::Industries => commands::rates::run_industries(),
        Commands::Rate(args) => commands::rates::run_rate(args),
        Commands::Version => {
            println!("twtax {}", env!("CARGO_PKG_VERSION"));
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
