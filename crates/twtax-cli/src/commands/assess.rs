use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use twtax_core::income_tax::assessment::AssessmentInput;
use twtax_core::TaxCalculator;

use crate::input;

/// Arguments for the direct assessment pipeline. Omitted amounts are zero.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AssessArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Operating revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Cost of goods sold
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Operating expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Non-operating income
    #[arg(long)]
    pub other_income: Option<Decimal>,

    /// Non-operating expense
    #[arg(long)]
    pub other_expense: Option<Decimal>,

    /// Prior-period loss carryforward
    #[arg(long)]
    pub prior_loss: Option<Decimal>,

    /// Dividends distributed out of current earnings
    #[arg(long, alias = "dividends")]
    pub dividends_distributed: Option<Decimal>,

    /// Legal reserve set aside
    #[arg(long)]
    pub legal_reserve: Option<Decimal>,
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment_input: AssessmentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AssessmentInput {
            revenue: args.revenue.unwrap_or_default(),
            cost: args.cost.unwrap_or_default(),
            expenses: args.expenses.unwrap_or_default(),
            other_income: args.other_income.unwrap_or_default(),
            other_expense: args.other_expense.unwrap_or_default(),
            prior_loss: args.prior_loss.unwrap_or_default(),
            dividends_distributed: args.dividends_distributed.unwrap_or_default(),
            legal_reserve: args.legal_reserve.unwrap_or_default(),
        }
    };

    let calculator = TaxCalculator::default();
    let output = calculator.assess(&assessment_input)?;
    Ok(serde_json::to_value(output)?)
}
