//! Normalized CSV output and the import template

use std::io::Write;

use tracing::{debug, trace};

use crate::errors::{Error, Result};
use crate::record::CustomsImportRow;
use crate::schema::COLUMNS;

/// Writer for normalized customs-import CSV files
#[derive(Debug, Clone)]
pub struct ImportWriter {
    delimiter: u8,
}

impl ImportWriter {
    /// Create a new writer with the default comma delimiter
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the delimiter character
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    /// Write validated rows as normalized CSV in canonical column order.
    ///
    /// Absent fields are written as empty cells; quoting follows RFC 4180.
    pub fn write_rows<W: Write>(&self, writer: W, rows: &[CustomsImportRow]) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer
            .write_record(COLUMNS)
            .map_err(|e| Error::Write(e.to_string()))?;

        for row in rows {
            csv_writer
                .write_record(Self::cells(row))
                .map_err(|e| Error::Write(e.to_string()))?;
            trace!(sku = %row.product_sku, "wrote import row");
        }

        csv_writer.flush()?;
        debug!(row_count = rows.len(), "finished writing normalized csv");
        Ok(())
    }

    /// Write the blank import template: canonical header plus one
    /// illustrative row for suppliers to overwrite.
    pub fn write_template<W: Write>(&self, writer: W) -> Result<()> {
        let example = CustomsImportRow {
            import_ref: Some("IMP-2024-001".to_string()),
            import_date: Some("2024-01-15".to_string()),
            supplier_name: Some("Acme Steel GmbH".to_string()),
            supplier_country: Some("DE".to_string()),
            product_sku: "SKU-001".to_string(),
            product_description: Some("Hot-rolled steel coil".to_string()),
            cn_code: "72081000".to_string(),
            quantity: Some(100.0),
            net_mass_kg: Some(25000.0),
            customs_value_eur: Some(18500.0),
            country_of_origin: Some("DE".to_string()),
            procedure_code: Some("4000".to_string()),
        };
        self.write_rows(writer, &[example])
    }

    fn cells(row: &CustomsImportRow) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|&column| match column {
                "import_ref" => text_cell(&row.import_ref),
                "import_date" => text_cell(&row.import_date),
                "supplier_name" => text_cell(&row.supplier_name),
                "supplier_country" => text_cell(&row.supplier_country),
                "product_sku" => row.product_sku.clone(),
                "product_description" => text_cell(&row.product_description),
                "cn_code" => row.cn_code.clone(),
                "quantity" => number_cell(row.quantity),
                "net_mass_kg" => number_cell(row.net_mass_kg),
                "customs_value_eur" => number_cell(row.customs_value_eur),
                "country_of_origin" => text_cell(&row.country_of_origin),
                "procedure_code" => text_cell(&row.procedure_code),
                _ => unreachable!("column set is fixed"),
            })
            .collect()
    }
}

impl Default for ImportWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn text_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
