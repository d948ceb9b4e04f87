//! CSV text to raw string matrix

use crate::domain::CsvMatrix;
use crate::error::Result;
use crate::utils::read_text_file;
use csv::ReaderBuilder;
use std::path::Path;

/// Parse CSV text into rows of cells. Rows may have unequal lengths.
pub fn parse_csv_matrix(content: &str) -> Result<CsvMatrix> {
    let mut reader =
        ReaderBuilder::new().has_headers(false).flexible(true).from_reader(content.as_bytes());

    let mut matrix = Vec::new();
    for record in reader.records() {
        let record = record?;
        matrix.push(record.iter().map(str::to_string).collect());
    }
    Ok(matrix)
}

/// Read a Buttercup export from disk and parse it.
pub fn read_csv_matrix(path: &Path) -> Result<CsvMatrix> {
    let (content, _encoding) = read_text_file(path)?;
    let matrix = parse_csv_matrix(&content)?;
    tracing::debug!("Parsed {} rows from {}", matrix.len(), path.display());
    Ok(matrix)
}
