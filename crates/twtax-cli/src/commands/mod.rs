pub mod assess;
pub mod filing;
pub mod rates;
