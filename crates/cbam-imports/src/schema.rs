//! Customs-import column schema
//!
//! The recognized column set is fixed. Header cells are matched by name,
//! case-insensitively and whitespace-trimmed, so column order in the input
//! does not matter.

use std::collections::HashMap;

/// Recognized columns, in canonical output order.
pub const COLUMNS: [&str; 12] = [
    "import_ref",
    "import_date",
    "supplier_name",
    "supplier_country",
    "product_sku",
    "product_description",
    "cn_code",
    "quantity",
    "net_mass_kg",
    "customs_value_eur",
    "country_of_origin",
    "procedure_code",
];

/// Columns that must be present in the header for row mapping to proceed.
pub const REQUIRED_COLUMNS: [&str; 2] = ["product_sku", "cn_code"];

/// Resolved mapping from recognized column names to cell positions
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<&'static str, usize>,
}

impl HeaderIndex {
    /// Resolve raw header cells against the recognized column set.
    ///
    /// When a name appears more than once, the first occurrence wins and
    /// later duplicates are ignored. Unrecognized cells are ignored.
    pub fn resolve(header: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (idx, raw) in header.iter().enumerate() {
            let name = raw.trim().to_ascii_lowercase();
            if let Some(known) = COLUMNS.iter().copied().find(|c| *c == name) {
                positions.entry(known).or_insert(idx);
            }
        }
        Self { positions }
    }

    /// Cell position of a recognized column, if it was present in the header
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Required columns absent from the resolved header
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !self.positions.contains_key(c))
            .collect()
    }

    /// Raw cell of `column` in `row`, or the empty string when the column is
    /// unmapped or the row is short
    pub fn cell<'a>(&self, row: &'a [String], column: &str) -> &'a str {
        self.position(column)
            .and_then(|idx| row.get(idx))
            .map_or("", String::as_str)
    }

    /// Number of recognized columns in the header
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no recognized column was found
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
