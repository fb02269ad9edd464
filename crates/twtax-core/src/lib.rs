pub mod error;
pub mod format;
pub mod income_tax;
pub mod types;

pub use error::TaxError;
pub use income_tax::TaxCalculator;
pub use types::*;

/// Standard result type for all tax operations
pub type TaxResult<T> = Result<T, TaxError>;
