use napi::Result as NapiResult;
use napi_derive::napi;

use twtax_core::income_tax::rates::{self, Industry};
use twtax_core::TaxCalculator;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[napi]
pub fn assess(input_json: String) -> NapiResult<String> {
    let input: twtax_core::income_tax::assessment::AssessmentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = TaxCalculator::default()
        .assess(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn file_by_method(input_json: String) -> NapiResult<String> {
    let input: twtax_core::income_tax::filing::FilingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = TaxCalculator::default()
        .file(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rate tables
// ---------------------------------------------------------------------------

#[napi]
pub fn list_industries() -> NapiResult<String> {
    serde_json::to_string(&rates::list_industries()).map_err(to_napi_error)
}

#[napi]
pub fn book_review_rate(industry: String) -> String {
    rates::book_review_rate(&Industry::from_label(&industry)).to_string()
}

#[napi]
pub fn income_standard_rate(industry: String) -> String {
    rates::income_standard_rate(&Industry::from_label(&industry)).to_string()
}
