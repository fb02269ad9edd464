//! Corporate income tax under the three Taiwanese filing regimes.
//!
//! `assessment` covers the audited-style direct computation from a full
//! income statement; `filing` dispatches on the simplified filing methods;
//! `rates` holds the static industry rate tables and flat tax rates.

pub mod assessment;
pub mod filing;
pub mod rates;

use crate::types::{CalculatorConfig, ComputationOutput};
use crate::TaxResult;

use assessment::{AssessmentInput, FullAssessment};
use filing::{FilingAssessment, FilingInput};

/// Entry point for all tax computations. Immutable after construction; safe
/// to share across threads.
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    config: CalculatorConfig,
}

impl TaxCalculator {
    /// Build a calculator with an explicit configuration. Fails with
    /// `InvalidConfiguration` rather than producing misrounded output later.
    pub fn new(config: CalculatorConfig) -> TaxResult<Self> {
        config.validate()?;
        Ok(TaxCalculator { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Full direct pipeline: income statement, 20% corporate tax, 5%
    /// undistributed-earnings tax net of distributions and legal reserve.
    pub fn assess(&self, input: &AssessmentInput) -> TaxResult<ComputationOutput<FullAssessment>> {
        assessment::assess_with(&self.config, input)
    }

    /// Filing-method dispatch: book-review, income-standard or audited.
    pub fn file(&self, input: &FilingInput) -> TaxResult<ComputationOutput<FilingAssessment>> {
        filing::file_with(&self.config, input)
    }
}
