use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use twtax_core::income_tax::filing::{FilingInput, FilingMethod};
use twtax_core::income_tax::rates::Industry;
use twtax_core::TaxCalculator;

use crate::input;

/// Arguments for filing-method dispatch
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FilingArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Filing method: book, standard or audit
    #[arg(long)]
    pub method: Option<String>,

    /// Operating revenue (book/standard)
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Industry label, e.g. 零售業 (book/standard)
    #[arg(long)]
    pub industry: Option<String>,

    /// Net-profit rate overriding the industry table (book/standard)
    #[arg(long)]
    pub custom_rate: Option<Decimal>,

    /// Accounting profit before adjustments (audit)
    #[arg(long)]
    pub accounting_profit: Option<Decimal>,

    /// Non-deductible expenses added back (audit)
    #[arg(long)]
    pub non_deductible: Option<Decimal>,

    /// Additional deductions (audit)
    #[arg(long)]
    pub additional_deduction: Option<Decimal>,

    /// Prior-period losses deducted (audit)
    #[arg(long)]
    pub prior_losses: Option<Decimal>,
}

pub fn run_filing(args: FilingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let filing_input: FilingInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FilingInput {
            method: FilingMethod::parse(args.method.as_deref())?,
            revenue: args.revenue.unwrap_or_default(),
            industry: args.industry.as_deref().map(Industry::from_label),
            custom_rate: args.custom_rate,
            accounting_profit: args.accounting_profit.unwrap_or_default(),
            non_deductible: args.non_deductible.unwrap_or_default(),
            additional_deduction: args.additional_deduction.unwrap_or_default(),
            prior_losses: args.prior_losses.unwrap_or_default(),
        }
    };

    let calculator = TaxCalculator::default();
    let output = calculator.file(&filing_input)?;
    Ok(serde_json::to_value(output)?)
}
