//! Row mapping and validation engine
//!
//! Takes the tokenizer's raw table, resolves the header against the fixed
//! column schema, and applies the per-field rules to every data row in order.
//! Findings are accumulated, never raised: a row is emitted for every data
//! line even when required fields fail, with the offending field emptied.

use serde::Serialize;
use tracing::debug;

use crate::errors::{CustomsImportParseError, ParseErrorCode};
use crate::record::CustomsImportRow;
use crate::rules::{self, CheckOutcome};
use crate::schema::HeaderIndex;
use crate::tokenizer::{RawTable, ScanDiagnostic};

/// Output of parsing one customs-import document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    /// Validated rows, one per data line, in input order
    pub rows: Vec<CustomsImportRow>,
    /// Findings in detection order
    pub errors: Vec<CustomsImportParseError>,
    /// Raw header cells exactly as received
    pub header: Vec<String>,
}

impl ParseResult {
    /// Whether any finding was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether a file-level finding rejects the document as a whole
    pub fn is_rejected(&self) -> bool {
        self.errors.iter().any(|e| e.code.is_file_level())
    }

    /// Rows whose required fields all survived validation
    pub fn clean_row_count(&self) -> usize {
        let flagged: std::collections::BTreeSet<usize> =
            self.errors.iter().filter_map(|e| e.row_number).collect();
        self.rows.len() - flagged.len()
    }
}

/// Map a tokenized table to validated rows and findings.
///
/// Empty input short-circuits with a single `EMPTY_FILE` finding. A missing
/// required column halts row mapping entirely; per-row mapping would be
/// meaningless without knowing which cell holds which field.
pub fn map_rows(table: &RawTable) -> ParseResult {
    let mut result = ParseResult {
        header: table.header.clone(),
        ..ParseResult::default()
    };

    for diagnostic in &table.diagnostics {
        match diagnostic {
            ScanDiagnostic::EmptyInput => {
                result.errors.push(CustomsImportParseError::empty_file());
                return result;
            }
            ScanDiagnostic::UnclosedQuote => {
                result.errors.push(CustomsImportParseError::unclosed_quote());
            }
        }
    }

    let index = HeaderIndex::resolve(&table.header);
    let missing = index.missing_required();
    if !missing.is_empty() {
        for column in missing {
            result
                .errors
                .push(CustomsImportParseError::missing_column(column));
        }
        return result;
    }

    for (offset, cells) in table.rows.iter().enumerate() {
        let row_number = offset + 1;
        let row = map_row(&index, cells, row_number, &mut result.errors);
        result.rows.push(row);
    }

    debug!(
        rows = result.rows.len(),
        errors = result.errors.len(),
        "mapped customs-import rows"
    );
    result
}

// Field checks run in a fixed order so repeated parses report identically.
fn map_row(
    index: &HeaderIndex,
    cells: &[String],
    row_number: usize,
    errors: &mut Vec<CustomsImportParseError>,
) -> CustomsImportRow {
    let mut row = CustomsImportRow::default();

    match rules::check_text(index.cell(cells, "product_sku")) {
        Some(sku) => row.product_sku = sku,
        None => errors.push(CustomsImportParseError::missing_required(
            row_number,
            "product_sku",
        )),
    }

    let raw_cn = index.cell(cells, "cn_code");
    match rules::check_cn_code(raw_cn) {
        CheckOutcome::Valid(code) => row.cn_code = code,
        CheckOutcome::Absent => {}
        CheckOutcome::Invalid => errors.push(CustomsImportParseError::invalid_value(
            ParseErrorCode::InvalidCnCode,
            row_number,
            "cn_code",
            raw_cn.trim(),
        )),
    }

    row.supplier_country = checked_country(
        index.cell(cells, "supplier_country"),
        row_number,
        "supplier_country",
        errors,
    );
    row.country_of_origin = checked_country(
        index.cell(cells, "country_of_origin"),
        row_number,
        "country_of_origin",
        errors,
    );

    row.quantity = checked_decimal(index.cell(cells, "quantity"), row_number, "quantity", errors);
    row.net_mass_kg = checked_decimal(
        index.cell(cells, "net_mass_kg"),
        row_number,
        "net_mass_kg",
        errors,
    );
    row.customs_value_eur = checked_decimal(
        index.cell(cells, "customs_value_eur"),
        row_number,
        "customs_value_eur",
        errors,
    );

    let raw_date = index.cell(cells, "import_date");
    match rules::check_date(raw_date) {
        CheckOutcome::Valid(date) => row.import_date = Some(date),
        CheckOutcome::Absent => {}
        CheckOutcome::Invalid => errors.push(CustomsImportParseError::invalid_value(
            ParseErrorCode::InvalidDate,
            row_number,
            "import_date",
            raw_date.trim(),
        )),
    }

    row.import_ref = rules::check_text(index.cell(cells, "import_ref"));
    row.supplier_name = rules::check_text(index.cell(cells, "supplier_name"));
    row.product_description = rules::check_text(index.cell(cells, "product_description"));
    row.procedure_code = rules::check_text(index.cell(cells, "procedure_code"));

    row
}

fn checked_country(
    raw: &str,
    row_number: usize,
    column: &str,
    errors: &mut Vec<CustomsImportParseError>,
) -> Option<String> {
    match rules::check_country(raw) {
        CheckOutcome::Valid(code) => Some(code),
        CheckOutcome::Absent => None,
        CheckOutcome::Invalid => {
            errors.push(CustomsImportParseError::invalid_value(
                ParseErrorCode::InvalidIso2,
                row_number,
                column,
                raw.trim(),
            ));
            None
        }
    }
}

fn checked_decimal(
    raw: &str,
    row_number: usize,
    column: &str,
    errors: &mut Vec<CustomsImportParseError>,
) -> Option<f64> {
    match rules::check_decimal(raw) {
        CheckOutcome::Valid(n) => Some(n),
        CheckOutcome::Absent => None,
        CheckOutcome::Invalid => {
            errors.push(CustomsImportParseError::invalid_value(
                ParseErrorCode::InvalidNumber,
                row_number,
                column,
                raw.trim(),
            ));
            None
        }
    }
}
