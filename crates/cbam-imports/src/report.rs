//! Parse summary aggregation

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::mapper::ParseResult;

/// Aggregate counts over one parse outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    /// Data rows emitted
    pub rows_total: usize,
    /// Rows with no finding against them
    pub rows_clean: usize,
    /// Rows with at least one finding
    pub rows_with_findings: usize,
    /// Whether a file-level finding rejected the document
    pub file_rejected: bool,
    /// Finding counts keyed by code wire name, in stable order
    pub error_counts: BTreeMap<String, usize>,
}

impl ParseSummary {
    /// Aggregate a parse result into counts
    pub fn from_result(result: &ParseResult) -> Self {
        let mut error_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut flagged_rows: BTreeSet<usize> = BTreeSet::new();
        let mut file_rejected = false;

        for finding in &result.errors {
            *error_counts.entry(finding.code.to_string()).or_insert(0) += 1;
            if let Some(row) = finding.row_number {
                flagged_rows.insert(row);
            }
            if finding.code.is_file_level() {
                file_rejected = true;
            }
        }

        let rows_total = result.rows.len();
        let rows_with_findings = flagged_rows.len();
        Self {
            rows_total,
            rows_clean: rows_total - rows_with_findings,
            rows_with_findings,
            file_rejected,
            error_counts,
        }
    }

    /// Total findings across all codes
    pub fn error_total(&self) -> usize {
        self.error_counts.values().sum()
    }

    /// Whether the parse produced no findings at all
    pub fn is_clean(&self) -> bool {
        self.error_counts.is_empty()
    }
}

impl fmt::Display for ParseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rows: {} ({} clean, {} with findings)",
            self.rows_total, self.rows_clean, self.rows_with_findings
        )?;
        write!(f, "Errors: {}", self.error_total())?;
        for (code, count) in &self.error_counts {
            write!(f, "\n  [{code}] count={count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::scan;
    use crate::mapper::map_rows;

    fn summarize(text: &str) -> ParseSummary {
        ParseSummary::from_result(&map_rows(&scan(text)))
    }

    #[test]
    fn test_clean_parse_summary() {
        let summary = summarize("product_sku,cn_code\nSKU1,850110\nSKU2,72081000\n");
        assert_eq!(summary.rows_total, 2);
        assert_eq!(summary.rows_clean, 2);
        assert_eq!(summary.rows_with_findings, 0);
        assert!(summary.is_clean());
        assert!(!summary.file_rejected);
        assert_eq!(summary.error_total(), 0);
    }

    #[test]
    fn test_summary_counts_by_code() {
        let summary = summarize(
            "product_sku,cn_code,quantity\nSKU1,12AB,abc\nSKU2,34CD,5\n",
        );
        assert_eq!(summary.rows_total, 2);
        assert_eq!(summary.rows_with_findings, 2);
        assert_eq!(summary.rows_clean, 0);
        assert_eq!(summary.error_counts.get("INVALID_CN_CODE"), Some(&2));
        assert_eq!(summary.error_counts.get("INVALID_NUMBER"), Some(&1));
        assert_eq!(summary.error_total(), 3);
    }

    #[test]
    fn test_summary_totals_are_consistent() {
        let summary = summarize("product_sku,cn_code\nSKU1,850110\n,12AB\n");
        assert_eq!(
            summary.rows_total,
            summary.rows_clean + summary.rows_with_findings
        );
    }

    #[test]
    fn test_rejected_file_summary() {
        let summary = summarize("foo,bar\nx,y\n");
        assert!(summary.file_rejected);
        assert_eq!(summary.rows_total, 0);
        assert_eq!(summary.error_counts.get("MISSING_COLUMN"), Some(&2));
    }

    #[test]
    fn test_display_rendering() {
        let summary = summarize("product_sku,cn_code\nSKU1,12AB\n");
        let text = summary.to_string();
        assert!(text.contains("Rows: 1 (0 clean, 1 with findings)"));
        assert!(text.contains("Errors: 1"));
        assert!(text.contains("[INVALID_CN_CODE] count=1"));
    }
}
