use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

// ---------------------------------------------------------------------------
// Flat tax rates
// ---------------------------------------------------------------------------

/// Corporate income tax, flat rate on taxable income.
pub const CORPORATE_TAX_RATE: Rate = dec!(0.20);

/// Surtax on earnings retained instead of distributed.
pub const UNDISTRIBUTED_EARNINGS_TAX_RATE: Rate = dec!(0.05);

/// Fallback book-review net-profit rate for industries not in the table.
pub const DEFAULT_BOOK_REVIEW_RATE: Rate = dec!(0.06);

/// Fallback income-standard rate for industries not in the table.
pub const DEFAULT_INCOME_STANDARD_RATE: Rate = dec!(0.25);

// ---------------------------------------------------------------------------
// Industries
// ---------------------------------------------------------------------------

/// Industry classification used by the simplified filing regimes. Callers
/// supplying a label outside the known set get `Other`, which takes the
/// default rates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Industry {
    Wholesale,
    Retail,
    Manufacturing,
    Construction,
    FoodAndBeverage,
    TransportAndLogistics,
    InformationServices,
    ProfessionalServices,
    RealEstate,
    FinanceAndInsurance,
    Other(String),
}

/// Listing order for the rate tables.
pub const INDUSTRIES: &[Industry] = &[
    Industry::Wholesale,
    Industry::Retail,
    Industry::Manufacturing,
    Industry::Construction,
    Industry::FoodAndBeverage,
    Industry::TransportAndLogistics,
    Industry::InformationServices,
    Industry::ProfessionalServices,
    Industry::RealEstate,
    Industry::FinanceAndInsurance,
];

impl Industry {
    /// The label used on filing forms.
    pub fn label(&self) -> &str {
        use Industry::*;
        match self {
            Wholesale => "批發業",
            Retail => "零售業",
            Manufacturing => "製造業",
            Construction => "營造業",
            FoodAndBeverage => "餐飲業",
            TransportAndLogistics => "運輸倉儲業",
            InformationServices => "資訊服務業",
            ProfessionalServices => "專業服務業",
            RealEstate => "不動產業",
            FinanceAndInsurance => "金融保險業",
            Other(label) => label,
        }
    }

    /// Parse a filing-form label. Unknown labels map to `Other` and take the
    /// default rates; that is policy, not an error.
    pub fn from_label(label: &str) -> Self {
        use Industry::*;
        match label {
            "批發業" => Wholesale,
            "零售業" => Retail,
            "製造業" => Manufacturing,
            "營造業" => Construction,
            "餐飲業" => FoodAndBeverage,
            "運輸倉儲業" => TransportAndLogistics,
            "資訊服務業" => InformationServices,
            "專業服務業" => ProfessionalServices,
            "不動產業" => RealEstate,
            "金融保險業" => FinanceAndInsurance,
            other => Other(other.to_string()),
        }
    }
}

impl From<String> for Industry {
    fn from(label: String) -> Self {
        Industry::from_label(&label)
    }
}

impl From<Industry> for String {
    fn from(industry: Industry) -> Self {
        industry.label().to_string()
    }
}

/// Industry labels in table order.
pub fn list_industries() -> Vec<&'static str> {
    INDUSTRIES.iter().map(|i| i.label()).collect()
}

// ---------------------------------------------------------------------------
// Rate tables
// ---------------------------------------------------------------------------

/// Book-review (擴大書審) net-profit rate for an industry.
pub fn book_review_rate(industry: &Industry) -> Rate {
    use Industry::*;
    match industry {
        Wholesale => dec!(0.04),
        Retail => dec!(0.03),
        Manufacturing => dec!(0.06),
        Construction => dec!(0.07),
        FoodAndBeverage => dec!(0.06),
        TransportAndLogistics => dec!(0.05),
        InformationServices => dec!(0.07),
        ProfessionalServices => dec!(0.08),
        RealEstate => dec!(0.10),
        FinanceAndInsurance => dec!(0.10),
        Other(_) => DEFAULT_BOOK_REVIEW_RATE,
    }
}

/// Income-standard (所得額標準) rate for an industry. Higher than the
/// book-review rate for every listed industry.
pub fn income_standard_rate(industry: &Industry) -> Rate {
    use Industry::*;
    match industry {
        Wholesale => dec!(0.07),
        Retail => dec!(0.06),
        Manufacturing => dec!(0.09),
        Construction => dec!(0.11),
        FoodAndBeverage => dec!(0.10),
        TransportAndLogistics => dec!(0.08),
        InformationServices => dec!(0.12),
        ProfessionalServices => dec!(0.14),
        RealEstate => dec!(0.15),
        FinanceAndInsurance => dec!(0.18),
        Other(_) => DEFAULT_INCOME_STANDARD_RATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_retail_book_review_rate() {
        assert_eq!(book_review_rate(&Industry::Retail), dec!(0.03));
    }

    #[test]
    fn test_unknown_industry_falls_back_to_defaults() {
        let unknown = Industry::from_label("太空採礦業");
        assert_eq!(book_review_rate(&unknown), dec!(0.06));
        assert_eq!(income_standard_rate(&unknown), dec!(0.25));
    }

    #[test]
    fn test_listing_order_is_table_order() {
        let labels = list_industries();
        assert_eq!(labels.first(), Some(&"批發業"));
        assert_eq!(labels.last(), Some(&"金融保險業"));
        assert_eq!(labels.len(), INDUSTRIES.len());
    }

    #[test]
    fn test_income_standard_exceeds_book_review_for_all_listed() {
        for industry in INDUSTRIES {
            assert!(
                income_standard_rate(industry) > book_review_rate(industry),
                "expected income-standard > book-review for {:?}",
                industry
            );
        }
    }

    #[test]
    fn test_label_round_trip() {
        for industry in INDUSTRIES {
            assert_eq!(&Industry::from_label(industry.label()), industry);
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Industry::Retail).unwrap();
        assert_eq!(json, "\"零售業\"");
        let back: Industry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Industry::Retail);
    }
}
