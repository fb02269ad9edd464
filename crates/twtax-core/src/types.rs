use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::TaxError;
use crate::TaxResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    TWD,
    USD,
    JPY,
    CNY,
    EUR,
    Other(String),
}

/// Per-instance calculator configuration. Replaces the process-wide decimal
/// settings the original regime used: each `TaxCalculator` carries its own
/// rounding strategy and display scale for rate strings.
#[derive(Debug, Clone, Copy)]
pub struct CalculatorConfig {
    /// Rounding applied when rendering rate strings.
    pub rounding: RoundingStrategy,
    /// Decimal places for effective-rate strings.
    pub rate_scale: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        // Half-up to 2 decimal places, the convention used on tax returns.
        CalculatorConfig {
            rounding: RoundingStrategy::MidpointAwayFromZero,
            rate_scale: 2,
        }
    }
}

impl CalculatorConfig {
    pub(crate) fn validate(&self) -> TaxResult<()> {
        if self.rate_scale > 28 {
            return Err(TaxError::InvalidConfiguration {
                reason: format!(
                    "rate_scale {} exceeds the 28 decimal places Decimal supports",
                    self.rate_scale
                ),
            });
        }
        Ok(())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CalculatorConfig::default().validate().is_ok());
        assert_eq!(CalculatorConfig::default().rate_scale, 2);
    }

    #[test]
    fn test_oversized_rate_scale_rejected() {
        let config = CalculatorConfig {
            rate_scale: 40,
            ..CalculatorConfig::default()
        };
        match config.validate().unwrap_err() {
            TaxError::InvalidConfiguration { reason } => {
                assert!(reason.contains("40"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }
}
