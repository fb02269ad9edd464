use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::TaxError;
use crate::format::format_fixed;
use crate::income_tax::rates::{CORPORATE_TAX_RATE, UNDISTRIBUTED_EARNINGS_TAX_RATE};
use crate::types::*;
use crate::TaxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Direct-computation inputs for an audited-style assessment. Absent fields
/// are zero; all amounts must be non-negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    pub revenue: Money,
    pub cost: Money,
    pub expenses: Money,
    pub other_income: Money,
    pub other_expense: Money,
    pub prior_loss: Money,
    pub dividends_distributed: Money,
    pub legal_reserve: Money,
}

/// Intermediate income-statement figures down to taxable income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub gross_profit: Money,
    pub operating_income: Money,
    pub net_income_before_tax: Money,
    pub used_prior_loss: Money,
    pub taxable_income: Money,
}

/// Undistributed-earnings surtax figures, net of the deductible items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retention {
    pub deductible: Money,
    pub undistributed_earnings: Money,
    pub tax: Money,
}

/// Complete breakdown from revenue to total tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullAssessment {
    pub gross_profit: Money,
    pub operating_income: Money,
    pub net_income_before_tax: Money,
    pub used_prior_loss: Money,
    pub taxable_income: Money,
    pub corporate_tax: Money,
    pub net_income_after_tax: Money,
    pub deductible: Money,
    pub undistributed_earnings: Money,
    pub undistributed_earnings_tax: Money,
    pub total_tax: Money,
    /// Total tax over pre-tax income, in percent to 2 decimal places.
    /// "0.00" whenever pre-tax income is zero or negative.
    pub effective_tax_rate: String,
}

// ---------------------------------------------------------------------------
// Component calculations
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

fn validate(input: &AssessmentInput) -> TaxResult<()> {
    ensure_non_negative("revenue", input.revenue)?;
    ensure_non_negative("cost", input.cost)?;
    ensure_non_negative("expenses", input.expenses)?;
    ensure_non_negative("other_income", input.other_income)?;
    ensure_non_negative("other_expense", input.other_expense)?;
    ensure_non_negative("prior_loss", input.prior_loss)?;
    ensure_non_negative("dividends_distributed", input.dividends_distributed)?;
    ensure_non_negative("legal_reserve", input.legal_reserve)?;
    Ok(())
}

/// Income statement from revenue down to taxable income.
///
/// Taxable income is clamped at zero, and the loss carryforward can neither
/// offset more income than exists nor create a negative base.
pub fn income_statement(input: &AssessmentInput) -> TaxResult<IncomeStatement> {
    validate(input)?;

    let gross_profit = input.revenue - input.cost;
    let operating_income = gross_profit - input.expenses;
    let net_income_before_tax = operating_income + input.other_income - input.other_expense;

    let used_prior_loss = input
        .prior_loss
        .min(net_income_before_tax.max(Decimal::ZERO));
    let taxable_income = (net_income_before_tax - input.prior_loss).max(Decimal::ZERO);

    Ok(IncomeStatement {
        gross_profit,
        operating_income,
        net_income_before_tax,
        used_prior_loss,
        taxable_income,
    })
}

/// Flat 20% corporate income tax on taxable income.
pub fn corporate_income_tax(taxable_income: Money) -> Money {
    taxable_income * CORPORATE_TAX_RATE
}

/// 5% surtax on after-tax income retained beyond distributions and the legal
/// reserve. Note the filing-method dispatcher applies the 5% differently
/// (to the whole taxable income, with no deductions).
pub fn undistributed_earnings(
    net_income_after_tax: Money,
    dividends_distributed: Money,
    legal_reserve: Money,
) -> Retention {
    let deductible = dividends_distributed + legal_reserve;
    let undistributed = (net_income_after_tax - deductible).max(Decimal::ZERO);
    Retention {
        deductible,
        undistributed_earnings: undistributed,
        tax: undistributed * UNDISTRIBUTED_EARNINGS_TAX_RATE,
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

pub(crate) fn assess_with(
    config: &CalculatorConfig,
    input: &AssessmentInput,
) -> TaxResult<ComputationOutput<FullAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let statement = income_statement(input)?;

    if input.prior_loss > statement.net_income_before_tax && !input.prior_loss.is_zero() {
        warnings.push(format!(
            "Prior loss {} exceeds current pre-tax income {}; carryforward limited to {}",
            input.prior_loss, statement.net_income_before_tax, statement.used_prior_loss,
        ));
    }

    let corporate_tax = corporate_income_tax(statement.taxable_income);
    let net_income_after_tax = statement.net_income_before_tax - corporate_tax;
    let retention = undistributed_earnings(
        net_income_after_tax,
        input.dividends_distributed,
        input.legal_reserve,
    );

    let total_tax = corporate_tax + retention.tax;
    let effective_tax_rate = if statement.net_income_before_tax > Decimal::ZERO {
        format_fixed(
            total_tax / statement.net_income_before_tax * dec!(100),
            config.rate_scale,
            config.rounding,
        )
    } else {
        format_fixed(Decimal::ZERO, config.rate_scale, config.rounding)
    };

    let result = FullAssessment {
        gross_profit: statement.gross_profit,
        operating_income: statement.operating_income,
        net_income_before_tax: statement.net_income_before_tax,
        used_prior_loss: statement.used_prior_loss,
        taxable_income: statement.taxable_income,
        corporate_tax,
        net_income_after_tax,
        deductible: retention.deductible,
        undistributed_earnings: retention.undistributed_earnings,
        undistributed_earnings_tax: retention.tax,
        total_tax,
        effective_tax_rate,
    };

    let assumptions = serde_json::json!({
        "corporate_tax_rate": CORPORATE_TAX_RATE.to_string(),
        "undistributed_earnings_tax_rate": UNDISTRIBUTED_EARNINGS_TAX_RATE.to_string(),
        "revenue": input.revenue.to_string(),
        "prior_loss": input.prior_loss.to_string(),
        "dividends_distributed": input.dividends_distributed.to_string(),
        "legal_reserve": input.legal_reserve.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Direct assessment: income statement, flat 20% corporate tax, 5% surtax on \
         retained earnings net of distributions and legal reserve",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income_tax::TaxCalculator;
    use pretty_assertions::assert_eq;

    fn base_input() -> AssessmentInput {
        AssessmentInput {
            revenue: dec!(1_000_000),
            cost: dec!(600_000),
            expenses: dec!(200_000),
            ..AssessmentInput::default()
        }
    }

    #[test]
    fn test_income_statement_scenario() {
        let statement = income_statement(&base_input()).unwrap();

        assert_eq!(statement.gross_profit, dec!(400_000));
        assert_eq!(statement.operating_income, dec!(200_000));
        assert_eq!(statement.net_income_before_tax, dec!(200_000));
        assert_eq!(statement.taxable_income, dec!(200_000));
        assert_eq!(corporate_income_tax(statement.taxable_income), dec!(40_000));
    }

    #[test]
    fn test_prior_loss_capped_at_current_income() {
        let input = AssessmentInput {
            prior_loss: dec!(250_000),
            ..base_input()
        };
        let statement = income_statement(&input).unwrap();

        assert_eq!(statement.net_income_before_tax, dec!(200_000));
        assert_eq!(statement.used_prior_loss, dec!(200_000));
        assert_eq!(statement.taxable_income, dec!(0));
        assert_eq!(corporate_income_tax(statement.taxable_income), dec!(0));
    }

    #[test]
    fn test_taxable_income_never_negative() {
        let input = AssessmentInput {
            revenue: dec!(100),
            cost: dec!(500),
            expenses: dec!(300),
            other_expense: dec!(50),
            prior_loss: dec!(1_000),
            ..AssessmentInput::default()
        };
        let statement = income_statement(&input).unwrap();

        assert!(statement.net_income_before_tax < Decimal::ZERO);
        assert_eq!(statement.taxable_income, dec!(0));
        assert_eq!(statement.used_prior_loss, dec!(0));
    }

    #[test]
    fn test_used_prior_loss_bounds() {
        let input = AssessmentInput {
            prior_loss: dec!(120_000),
            ..base_input()
        };
        let statement = income_statement(&input).unwrap();

        assert!(statement.used_prior_loss <= input.prior_loss);
        assert!(statement.used_prior_loss <= statement.net_income_before_tax);
        assert_eq!(statement.used_prior_loss, dec!(120_000));
        assert_eq!(statement.taxable_income, dec!(80_000));
    }

    #[test]
    fn test_negative_input_rejected() {
        let input = AssessmentInput {
            cost: dec!(-1),
            ..base_input()
        };
        match income_statement(&input).unwrap_err() {
            TaxError::InvalidInput { field, .. } => assert_eq!(field, "cost"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_undistributed_earnings_deductions() {
        let retention = undistributed_earnings(dec!(160_000), dec!(100_000), dec!(20_000));

        assert_eq!(retention.deductible, dec!(120_000));
        assert_eq!(retention.undistributed_earnings, dec!(40_000));
        assert_eq!(retention.tax, dec!(2_000));
    }

    #[test]
    fn test_undistributed_earnings_clamped_at_zero() {
        let retention = undistributed_earnings(dec!(50_000), dec!(60_000), dec!(0));

        assert_eq!(retention.undistributed_earnings, dec!(0));
        assert_eq!(retention.tax, dec!(0));
    }

    #[test]
    fn test_full_pipeline() {
        let calc = TaxCalculator::default();
        let output = calc.assess(&base_input()).unwrap();
        let r = &output.result;

        assert_eq!(r.corporate_tax, dec!(40_000));
        assert_eq!(r.net_income_after_tax, dec!(160_000));
        // Nothing distributed, nothing reserved: the whole 160k is retained.
        assert_eq!(r.undistributed_earnings, dec!(160_000));
        assert_eq!(r.undistributed_earnings_tax, dec!(8_000));
        assert_eq!(r.total_tax, dec!(48_000));
        // 48,000 / 200,000 = 24%
        assert_eq!(r.effective_tax_rate, "24.00");
    }

    #[test]
    fn test_full_pipeline_with_distributions() {
        let input = AssessmentInput {
            dividends_distributed: dec!(100_000),
            legal_reserve: dec!(20_000),
            ..base_input()
        };
        let output = TaxCalculator::default().assess(&input).unwrap();
        let r = &output.result;

        assert_eq!(r.deductible, dec!(120_000));
        assert_eq!(r.undistributed_earnings, dec!(40_000));
        assert_eq!(r.undistributed_earnings_tax, dec!(2_000));
        assert_eq!(r.total_tax, dec!(42_000));
        assert_eq!(r.effective_tax_rate, "21.00");
    }

    #[test]
    fn test_effective_rate_zero_when_no_income() {
        let input = AssessmentInput {
            revenue: dec!(100_000),
            cost: dec!(150_000),
            ..AssessmentInput::default()
        };
        let output = TaxCalculator::default().assess(&input).unwrap();
        let r = &output.result;

        assert!(r.net_income_before_tax < Decimal::ZERO);
        assert_eq!(r.effective_tax_rate, "0.00");
    }

    #[test]
    fn test_capped_carryforward_warning() {
        let input = AssessmentInput {
            prior_loss: dec!(250_000),
            ..base_input()
        };
        let output = TaxCalculator::default().assess(&input).unwrap();

        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("carryforward limited")));
    }

    #[test]
    fn test_metadata_populated() {
        let output = TaxCalculator::default().assess(&base_input()).unwrap();

        assert!(!output.methodology.is_empty());
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
        assert!(!output.metadata.version.is_empty());
    }

    #[test]
    fn test_defaults_deserialize_to_zero() {
        let input: AssessmentInput = serde_json::from_str(r#"{"revenue": "500000"}"#).unwrap();

        assert_eq!(input.revenue, dec!(500_000));
        assert_eq!(input.cost, dec!(0));
        assert_eq!(input.prior_loss, dec!(0));
    }
}
