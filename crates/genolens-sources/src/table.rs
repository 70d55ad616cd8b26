//! Tab-separated result table with schema propagation across pages.
//!
//! Firebrowse paginates TSV output with a header row on the first page
//! only. The header fixes the column schema; every later page is parsed
//! positionally against it. A page whose rows disagree with the schema's
//! column count is rejected rather than silently misaligned.

use genolens_common::{GenolensError, Result};

/// Prefix Firebrowse uses to signal an exhausted result set.
pub const NO_RECORDS_SENTINEL: &str = "No records";

/// True when a page body signals the end of pagination: blank, or the
/// "No records" sentinel.
pub fn end_of_records(body: &str) -> bool {
    let trimmed = body.trim();
    trimmed.is_empty() || trimmed.starts_with(NO_RECORDS_SENTINEL)
}

/// Accumulated tabular dataset. Row order is page order, then in-page
/// order. Every row holds exactly one field per schema column.
#[derive(Debug, Clone, Default)]
pub struct ExpressionTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExpressionTable {
    /// Parse one TSV page and append its rows.
    ///
    /// The first appended page must carry a header row, which becomes the
    /// table schema. Later pages are headerless and take the stored schema
    /// positionally; a column-count disagreement is a `SchemaMismatch`.
    pub fn append_page(&mut self, body: &str, page: u32) -> Result<()> {
        let first = self.columns.is_empty();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(first)
            .flexible(true)
            .from_reader(body.as_bytes());

        if first {
            let headers = reader
                .headers()
                .map_err(|e| GenolensError::Tsv(format!("Malformed header on page {page}: {e}")))?;
            self.columns = headers.iter().map(|c| c.to_string()).collect();
        }

        for record in reader.records() {
            let record = record
                .map_err(|e| GenolensError::Tsv(format!("Malformed row on page {page}: {e}")))?;
            if record.len() != self.columns.len() {
                return Err(GenolensError::SchemaMismatch {
                    expected: self.columns.len(),
                    found: record.len(),
                    page,
                });
            }
            self.rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extract (key, value) pairs from two named columns.
    ///
    /// Rows whose value field does not parse as f64 are skipped; a missing
    /// column on a non-empty table is an error.
    pub fn pair_columns(&self, key: &str, value: &str) -> Result<Vec<(String, f64)>> {
        let key_idx = self
            .column_index(key)
            .ok_or_else(|| GenolensError::InvalidArgument(format!("Column not found: {key}")))?;
        let value_idx = self
            .column_index(value)
            .ok_or_else(|| GenolensError::InvalidArgument(format!("Column not found: {value}")))?;

        Ok(self
            .rows
            .iter()
            .filter_map(|row| {
                let v = row[value_idx].parse::<f64>().ok()?;
                Some((row[key_idx].clone(), v))
            })
            .collect())
    }
}
