use clap::Args;
use serde_json::{json, Value};

use twtax_core::income_tax::rates::{self, Industry, INDUSTRIES};

/// Arguments for a single-industry rate lookup
#[derive(Args)]
pub struct RateArgs {
    /// Industry label, e.g. 零售業. Unknown labels take the default rates.
    pub industry: String,
}

pub fn run_industries() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = INDUSTRIES
        .iter()
        .map(|industry| {
            json!({
                "industry": industry.label(),
                "book_review_rate": rates::book_review_rate(industry).to_string(),
                "income_standard_rate": rates::income_standard_rate(industry).to_string(),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let industry = Industry::from_label(&args.industry);
    Ok(json!({
        "industry": industry.label(),
        "known": !matches!(industry, Industry::Other(_)),
        "book_review_rate": rates::book_review_rate(&industry).to_string(),
        "income_standard_rate": rates::income_standard_rate(&industry).to_string(),
    }))
}
