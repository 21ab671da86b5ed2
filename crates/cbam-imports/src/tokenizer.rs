//! RFC4180-ish CSV scanner
//!
//! Single-pass scanner that splits raw CSV text into a header row and data
//! rows. Cells may be wrapped in double quotes; inside a quoted cell a doubled
//! quote stands for one literal quote, and separators lose their meaning.
//! The scanner is best-effort: structural problems are reported as
//! diagnostics and whatever parsed cleanly is still returned.

use tracing::debug;

/// Byte-order mark some spreadsheet exports prepend to UTF-8 text.
const BOM: char = '\u{feff}';

/// Structural problem detected while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDiagnostic {
    /// Input was empty or whitespace-only
    EmptyInput,
    /// Input ended while still inside a quoted cell
    UnclosedQuote,
}

/// Raw tokenized CSV document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// First row of the input, verbatim cells
    pub header: Vec<String>,
    /// Remaining rows in input order
    pub rows: Vec<Vec<String>>,
    /// Structural problems found while scanning
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl RawTable {
    /// Whether any structural diagnostic was recorded
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Tokenize raw CSV text into header and data rows.
///
/// The first row is always treated as the header. A leading byte-order mark
/// is stripped before scanning. `\r\n` counts as a single row break, and the
/// final cell and row are flushed even without a trailing line break. Lines
/// that contain nothing at all are skipped; they are not data rows.
pub fn scan(text: &str) -> RawTable {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return RawTable {
            diagnostics: vec![ScanDiagnostic::EmptyInput],
            ..RawTable::default()
        };
    }

    let mut lines: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted cell is one literal quote
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut cell)),
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    // \r\n is one row break, not a break plus an empty line
                    chars.next();
                }
                record.push(std::mem::take(&mut cell));
                flush_record(&mut lines, &mut record);
            }
            _ => cell.push(ch),
        }
    }

    let mut diagnostics = Vec::new();
    if in_quotes {
        diagnostics.push(ScanDiagnostic::UnclosedQuote);
    }

    // Flush the final cell/row when the text has no trailing line break
    if !cell.is_empty() || !record.is_empty() {
        record.push(cell);
        flush_record(&mut lines, &mut record);
    }

    let mut lines = lines.into_iter();
    let header = lines.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = lines.collect();

    debug!(
        header_cells = header.len(),
        data_rows = rows.len(),
        diagnostics = diagnostics.len(),
        "scanned csv document"
    );

    RawTable {
        header,
        rows,
        diagnostics,
    }
}

fn flush_record(lines: &mut Vec<Vec<String>>, record: &mut Vec<String>) {
    let record = std::mem::take(record);
    // A line with a single empty cell is a blank line, not a data row
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    lines.push(record);
}
