//! Customs-import row data model

use serde::{Deserialize, Serialize};

/// One validated line of a customs-import ledger.
///
/// `product_sku` and `cn_code` are required; on validation failure they are
/// emitted as empty strings so the row itself is never dropped. All other
/// fields are absent when the source cell was empty or failed its check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomsImportRow {
    /// Opaque external reference
    pub import_ref: Option<String>,
    /// Import date as a literal `YYYY-MM-DD` string
    pub import_date: Option<String>,
    /// Supplier name, free text
    pub supplier_name: Option<String>,
    /// Supplier country, ISO-3166 alpha-2
    pub supplier_country: Option<String>,
    /// Product identifier (required)
    pub product_sku: String,
    /// Product description, free text
    pub product_description: Option<String>,
    /// EU Combined Nomenclature code, 6-8 digits (required)
    pub cn_code: String,
    /// Declared quantity
    pub quantity: Option<f64>,
    /// Net mass in kilograms
    pub net_mass_kg: Option<f64>,
    /// Customs value in euros
    pub customs_value_eur: Option<f64>,
    /// Country of origin, ISO-3166 alpha-2
    pub country_of_origin: Option<String>,
    /// Customs procedure code, free text
    pub procedure_code: Option<String>,
}

impl CustomsImportRow {
    /// Whether both required fields survived validation
    pub fn has_required_fields(&self) -> bool {
        !self.product_sku.is_empty() && !self.cn_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row_is_all_absent() {
        let row = CustomsImportRow::default();
        assert_eq!(row.product_sku, "");
        assert_eq!(row.cn_code, "");
        assert!(row.quantity.is_none());
        assert!(!row.has_required_fields());
    }

    #[test]
    fn test_has_required_fields() {
        let row = CustomsImportRow {
            product_sku: "SKU1".to_string(),
            cn_code: "850110".to_string(),
            ..CustomsImportRow::default()
        };
        assert!(row.has_required_fields());
    }

    #[test]
    fn test_row_json_round_trip() {
        let row = CustomsImportRow {
            product_sku: "SKU1".to_string(),
            cn_code: "72081000".to_string(),
            quantity: Some(1234.5),
            supplier_country: Some("DE".to_string()),
            ..CustomsImportRow::default()
        };

        let json = serde_json::to_string(&row).unwrap();
        let back: CustomsImportRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
