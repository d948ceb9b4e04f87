//! Matrix rows to keyed line objects

use crate::domain::{LineObject, RecordKind};
use crate::error::{ConvertError, Result};
use std::collections::HashSet;

/// Strip a single leading marker character from a header name.
pub fn normalize_header(header: &str, marker: char) -> &str {
    header.strip_prefix(marker).unwrap_or(header)
}

/// Zip every data row against the header row.
///
/// Cells past the header length are dropped and missing trailing cells leave
/// their field absent. When a header name repeats, the first column wins.
pub fn extract_line_objects(matrix: &[Vec<String>], marker: char) -> Result<Vec<LineObject>> {
    let (header_row, rows) = matrix.split_first().ok_or(ConvertError::EmptyInput)?;
    let headers: Vec<&str> = header_row.iter().map(|h| normalize_header(h, marker)).collect();

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(*header) {
            tracing::warn!("Duplicate column '{}' in header row; keeping the first one", header);
        }
    }

    let objects = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = idx + 2;
            if row.len() != headers.len() {
                tracing::warn!(
                    "Line {} has {} cells but the header has {} columns",
                    line,
                    row.len(),
                    headers.len()
                );
            }

            let mut object = LineObject::new(line);
            for (header, cell) in headers.iter().zip(row) {
                object.insert(header, cell);
            }
            if let Some(RecordKind::Other(kind)) = &object.kind {
                tracing::warn!("Line {} has unknown record type '{}'; skipping it", line, kind);
            }
            object
        })
        .collect();

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HEADER_MARKER;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect()
    }

    #[test]
    fn test_extract_strips_markers_and_maps_cells() {
        let m = matrix(&[
            &["!header1", "!header2", "header 3"],
            &["content1", "content2", "content3"],
            &["content4", "content5", "content6"],
        ]);

        let objects = extract_line_objects(&m, HEADER_MARKER).expect("extract");
        assert_eq!(objects.len(), 2);
        for (row, object) in m[1..].iter().zip(&objects) {
            assert_eq!(object.get("header1"), Some(row[0].as_str()));
            assert_eq!(object.get("header2"), Some(row[1].as_str()));
            assert_eq!(object.get("header 3"), Some(row[2].as_str()));
        }
        assert_eq!(objects[0].line, 2);
        assert_eq!(objects[1].line, 3);
    }

    #[test]
    fn test_extract_fills_known_fields() {
        let m = matrix(&[
            &["!type", "!group_id", "!group_name", "title", "url"],
            &["entry", "g1", "", "Mail", "https://mail.example"],
        ]);

        let objects = extract_line_objects(&m, HEADER_MARKER).expect("extract");
        let entry = &objects[0];
        assert!(entry.is_entry());
        assert_eq!(entry.group_id.as_deref(), Some("g1"));
        assert_eq!(entry.group_name.as_deref(), Some(""));
        assert_eq!(entry.title.as_deref(), Some("Mail"));
        assert_eq!(entry.extra, vec![("url".to_string(), "https://mail.example".to_string())]);
    }

    #[test]
    fn test_only_one_marker_is_stripped() {
        assert_eq!(normalize_header("!!x", '!'), "!x");
        assert_eq!(normalize_header("x!", '!'), "x!");
    }

    #[test]
    fn test_ragged_rows_drop_or_omit_cells() {
        let m = matrix(&[&["a", "b"], &["1"], &["1", "2", "3"]]);
        let objects = extract_line_objects(&m, HEADER_MARKER).expect("extract");

        assert_eq!(objects[0].get("a"), Some("1"));
        assert_eq!(objects[0].get("b"), None);
        assert_eq!(objects[1].extra.len(), 2);
    }

    #[test]
    fn test_duplicate_header_keeps_first_column() {
        let m = matrix(&[&["note", "note"], &["first", "second"]]);
        let objects = extract_line_objects(&m, HEADER_MARKER).expect("extract");
        assert_eq!(objects[0].get("note"), Some("first"));
    }

    #[test]
    fn test_header_only_matrix_yields_nothing() {
        let m = matrix(&[&["!type"]]);
        assert!(extract_line_objects(&m, HEADER_MARKER).expect("extract").is_empty());
    }

    #[test]
    fn test_empty_matrix_is_an_error() {
        let err = extract_line_objects(&[], HEADER_MARKER).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput));
    }
}
