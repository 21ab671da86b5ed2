//! # cbam-imports
//!
//! Customs-import ledger CSV parsing and validation for CBAM reporting.
//!
//! This crate turns raw CSV text into typed, validated import rows plus a
//! structured list of findings. Parsing is best-effort: malformed input never
//! raises; every failure is collected and returned alongside whatever parsed
//! cleanly, so a caller can accept partial batches, surface findings to a
//! user, or reject the file outright.
//!
//! ## Example Usage
//!
//! ```rust
//! use cbam_imports::parse_customs_imports;
//!
//! let result = parse_customs_imports("product_sku,cn_code\nSKU1,8501100\n");
//! assert_eq!(result.rows.len(), 1);
//! assert_eq!(result.rows[0].product_sku, "SKU1");
//! assert!(result.errors.is_empty());
//! ```

pub mod errors;
pub mod mapper;
pub mod record;
pub mod report;
pub mod rules;
pub mod schema;
pub mod tokenizer;
pub mod writer;

// Re-export main types
pub use errors::{CustomsImportParseError, Error, ParseErrorCode, Result};
pub use mapper::{ParseResult, map_rows};
pub use record::CustomsImportRow;
pub use report::ParseSummary;
pub use schema::{COLUMNS, HeaderIndex, REQUIRED_COLUMNS};
pub use tokenizer::{RawTable, ScanDiagnostic, scan};
pub use writer::ImportWriter;

/// Parse a complete customs-import CSV document.
///
/// Pure and deterministic: identical text yields identical rows, findings,
/// and finding order on every call.
pub fn parse_customs_imports(text: &str) -> ParseResult {
    mapper::map_rows(&tokenizer::scan(text))
}
