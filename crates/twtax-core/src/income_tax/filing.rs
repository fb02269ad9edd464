use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::TaxError;
use crate::format::format_fixed;
use crate::income_tax::rates::{
    self, CORPORATE_TAX_RATE, DEFAULT_BOOK_REVIEW_RATE, DEFAULT_INCOME_STANDARD_RATE,
    UNDISTRIBUTED_EARNINGS_TAX_RATE,
};
use crate::types::*;
use crate::TaxResult;

// ---------------------------------------------------------------------------
// Filing method
// ---------------------------------------------------------------------------

/// The three filing regimes. The discriminator is required; anything else is
/// rejected before any computation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingMethod {
    /// 擴大書審: fixed industry percentage of revenue, no loss deduction.
    #[serde(rename = "book")]
    BookReview,
    /// 所得額標準: alternate, higher fixed percentage of revenue.
    #[serde(rename = "standard")]
    IncomeStandard,
    /// 查帳申報: full accounting basis with add-backs and loss carryforward.
    #[serde(rename = "audit")]
    Audit,
}

impl FilingMethod {
    /// Parse the filing-method discriminator. A missing or unrecognized
    /// value fails with `UnspecifiedFilingMethod`; no computation happens.
    pub fn parse(value: Option<&str>) -> TaxResult<Self> {
        match value {
            Some(s) => s.parse(),
            None => Err(TaxError::UnspecifiedFilingMethod(
                "(not provided)".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingMethod::BookReview => "book",
            FilingMethod::IncomeStandard => "standard",
            FilingMethod::Audit => "audit",
        }
    }
}

impl FromStr for FilingMethod {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(FilingMethod::BookReview),
            "standard" => Ok(FilingMethod::IncomeStandard),
            "audit" => Ok(FilingMethod::Audit),
            other => Err(TaxError::UnspecifiedFilingMethod(other.to_string())),
        }
    }
}

impl fmt::Display for FilingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs for the filing-method dispatcher. `revenue`, `industry` and
/// `custom_rate` drive the two simplified regimes; the accounting fields
/// only matter under `audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingInput {
    pub method: FilingMethod,
    #[serde(default)]
    pub revenue: Money,
    #[serde(default)]
    pub industry: Option<rates::Industry>,
    #[serde(default)]
    pub custom_rate: Option<Rate>,
    #[serde(default)]
    pub accounting_profit: Money,
    #[serde(default)]
    pub non_deductible: Money,
    #[serde(default)]
    pub additional_deduction: Money,
    #[serde(default)]
    pub prior_losses: Money,
}

/// Result of one filing-method computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingAssessment {
    pub method: FilingMethod,
    /// The net-profit rate applied to revenue; None under `audit`.
    pub applied_rate: Option<Rate>,
    pub taxable_income: Money,
    pub basic_tax: Money,
    pub undistributed_earnings_tax: Money,
    pub total_tax: Money,
    /// Total tax over revenue, in percent with a trailing "%".
    /// "0.00%" when revenue is zero.
    pub effective_rate: String,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn ensure_non_negative(field: &str, value: Money) -> TaxResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TaxError::InvalidInput {
            field: field.to_string(),
            reason: "amount must not be negative".to_string(),
        });
    }
    Ok(())
}

fn validate(input: &FilingInput) -> TaxResult<()> {
    ensure_non_negative("revenue", input.revenue)?;
    ensure_non_negative("accounting_profit", input.accounting_profit)?;
    ensure_non_negative("non_deductible", input.non_deductible)?;
    ensure_non_negative("additional_deduction", input.additional_deduction)?;
    ensure_non_negative("prior_losses", input.prior_losses)?;

    if let Some(rate) = input.custom_rate {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(TaxError::InvalidInput {
                field: "custom_rate".to_string(),
                reason: format!("rate {} must be within [0, 1]", rate),
            });
        }
    }
    Ok(())
}

/// Net-profit rate for the simplified regimes: an explicit custom rate wins,
/// then the industry table, then the regime default.
fn revenue_rate(input: &FilingInput, table: fn(&rates::Industry) -> Rate, default: Rate) -> Rate {
    input
        .custom_rate
        .unwrap_or_else(|| input.industry.as_ref().map(table).unwrap_or(default))
}

pub(crate) fn file_with(
    config: &CalculatorConfig,
    input: &FilingInput,
) -> TaxResult<ComputationOutput<FilingAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let (rate, taxable_income) = match input.method {
        FilingMethod::BookReview | FilingMethod::IncomeStandard => {
            let rate = match input.method {
                FilingMethod::BookReview => {
                    revenue_rate(input, rates::book_review_rate, DEFAULT_BOOK_REVIEW_RATE)
                }
                _ => revenue_rate(
                    input,
                    rates::income_standard_rate,
                    DEFAULT_INCOME_STANDARD_RATE,
                ),
            };
            if input.custom_rate.is_some() && input.industry.is_some() {
                warnings.push("Custom rate overrides the industry table rate".to_string());
            }
            (Some(rate), input.revenue * rate)
        }
        FilingMethod::Audit => {
            let taxable = (input.accounting_profit + input.non_deductible
                - input.additional_deduction
                - input.prior_losses)
                .max(Decimal::ZERO);
            (None, taxable)
        }
    };

    let basic_tax = taxable_income * CORPORATE_TAX_RATE;
    // Simplifying assumption of this regime: the surtax applies to the whole
    // taxable income, with no distribution or reserve deduction.
    let undistributed_earnings_tax = taxable_income * UNDISTRIBUTED_EARNINGS_TAX_RATE;
    let total_tax = basic_tax + undistributed_earnings_tax;

    let effective_rate = if input.revenue > Decimal::ZERO {
        format_fixed(
            total_tax / input.revenue * dec!(100),
            config.rate_scale,
            config.rounding,
        )
    } else {
        if !total_tax.is_zero() {
            warnings.push("Revenue is zero; effective rate reported as 0.00%".to_string());
        }
        format_fixed(Decimal::ZERO, config.rate_scale, config.rounding)
    };
    let effective_rate = format!("{}%", effective_rate);

    let result = FilingAssessment {
        method: input.method,
        applied_rate: rate,
        taxable_income,
        basic_tax,
        undistributed_earnings_tax,
        total_tax,
        effective_rate,
    };

    let assumptions = serde_json::json!({
        "method": input.method.as_str(),
        "revenue": input.revenue.to_string(),
        "industry": input.industry.as_ref().map(|i| i.label().to_string()),
        "custom_rate": input.custom_rate.map(|r| r.to_string()),
        "corporate_tax_rate": CORPORATE_TAX_RATE.to_string(),
        "undistributed_earnings_tax_rate": UNDISTRIBUTED_EARNINGS_TAX_RATE.to_string(),
    });

    let methodology = match input.method {
        FilingMethod::BookReview => {
            "Book-review filing: industry net-profit rate applied to revenue, flat 20% \
             basic tax plus 5% surtax on the full taxable income"
        }
        FilingMethod::IncomeStandard => {
            "Income-standard filing: standard industry rate applied to revenue, flat 20% \
             basic tax plus 5% surtax on the full taxable income"
        }
        FilingMethod::Audit => {
            "Audited filing: accounting profit with non-deductible add-backs, additional \
             deductions and prior losses, flat 20% basic tax plus 5% surtax"
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
