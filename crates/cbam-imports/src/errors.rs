//! Error types for customs-import parsing
//!
//! Validation findings are plain data, collected and returned alongside
//! best-effort rows. The operational [`Error`] enum covers I/O and CSV-write
//! failures only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of finding codes reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseErrorCode {
    /// Whole document was empty or whitespace-only
    EmptyFile,
    /// Structural tokenization problem (unclosed quote)
    CsvParseError,
    /// A required column is absent from the header
    MissingColumn,
    /// A required field was empty on a specific row
    MissingRequired,
    /// CN code is present but not 6-8 decimal digits
    InvalidCnCode,
    /// Country code is present but not two alphabetic characters
    InvalidIso2,
    /// Numeric field is present but not a finite decimal number
    InvalidNumber,
    /// Date field is present but not in YYYY-MM-DD form
    InvalidDate,
}

impl ParseErrorCode {
    /// Stable wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyFile => "EMPTY_FILE",
            Self::CsvParseError => "CSV_PARSE_ERROR",
            Self::MissingColumn => "MISSING_COLUMN",
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::InvalidCnCode => "INVALID_CN_CODE",
            Self::InvalidIso2 => "INVALID_ISO2",
            Self::InvalidNumber => "INVALID_NUMBER",
            Self::InvalidDate => "INVALID_DATE",
        }
    }

    /// Whether this code concerns the whole file rather than a single row
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            Self::EmptyFile | Self::CsvParseError | Self::MissingColumn
        )
    }
}

impl std::fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural or semantic validation finding.
///
/// Row numbers are 1-based over data rows; the header row is excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomsImportParseError {
    /// Finding code
    pub code: ParseErrorCode,
    /// Human-readable description
    pub message: String,
    /// Data row the finding applies to, if row-scoped
    pub row_number: Option<usize>,
    /// Column the finding applies to, if field-scoped
    pub column: Option<String>,
    /// Raw value that failed validation, if any
    pub value: Option<String>,
}

impl CustomsImportParseError {
    /// Finding for an empty or whitespace-only document
    pub fn empty_file() -> Self {
        Self {
            code: ParseErrorCode::EmptyFile,
            message: "File is empty".to_string(),
            row_number: None,
            column: None,
            value: None,
        }
    }

    /// Finding for input that ended inside a quoted cell
    pub fn unclosed_quote() -> Self {
        Self {
            code: ParseErrorCode::CsvParseError,
            message: "Unclosed quote at end of file; trailing rows may be truncated"
                .to_string(),
            row_number: None,
            column: None,
            value: None,
        }
    }

    /// Finding for a required column missing from the header
    pub fn missing_column(column: &str) -> Self {
        Self {
            code: ParseErrorCode::MissingColumn,
            message: format!("Required column '{column}' is missing from the header"),
            row_number: None,
            column: Some(column.to_string()),
            value: None,
        }
    }

    /// Finding for a required field that is empty on a data row
    pub fn missing_required(row_number: usize, column: &str) -> Self {
        Self {
            code: ParseErrorCode::MissingRequired,
            message: format!("Row {row_number}: required field '{column}' is empty"),
            row_number: Some(row_number),
            column: Some(column.to_string()),
            value: None,
        }
    }

    /// Finding for a field value that failed a semantic check
    pub fn invalid_value(
        code: ParseErrorCode,
        row_number: usize,
        column: &str,
        value: &str,
    ) -> Self {
        let reason = match code {
            ParseErrorCode::InvalidCnCode => "not a valid CN code (6-8 digits)",
            ParseErrorCode::InvalidIso2 => "not a two-letter country code",
            ParseErrorCode::InvalidNumber => "not a valid number",
            ParseErrorCode::InvalidDate => "not a valid date (expected YYYY-MM-DD)",
            _ => "invalid value",
        };
        Self {
            code,
            message: format!("Row {row_number}: '{value}' in '{column}' is {reason}"),
            row_number: Some(row_number),
            column: Some(column.to_string()),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for CustomsImportParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Errors that can occur when writing customs-import data
#[derive(Error, Debug)]
pub enum Error {
    /// CSV write error
    #[error("CSV write error: {0}")]
    Write(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for writer operations
pub type Result<T> = std::result::Result<T, Error>;
