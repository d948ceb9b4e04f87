//! End-to-end conversion: Buttercup matrix in, KeePassXC CSV text out.

use crate::domain::ConvertOptions;
use crate::error::Result;
use crate::groups::{create_group_index, split_entries_by_deleted_status};
use crate::parse::{extract_line_objects, read_csv_matrix};
use crate::render::{entries_to_keepassxc_content, format_entries, Clock};
use std::path::Path;

/// Entry counts of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub deleted: usize,
    pub active: usize,
}

impl ConversionSummary {
    pub fn total(&self) -> usize {
        self.deleted + self.active
    }

    /// The three console lines reported after a successful run.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Found {} entries", self.total()),
            format!("{} ignored", self.deleted),
            format!("{} exported", self.active),
        ]
    }
}

/// Rendered output plus its counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub content: String,
    pub summary: ConversionSummary,
}

/// Convert a parsed Buttercup table. Any bad record fails the whole run.
pub fn convert(
    matrix: &[Vec<String>],
    options: &ConvertOptions,
    clock: &dyn Clock,
) -> Result<Conversion> {
    let line_objects = extract_line_objects(matrix, options.header_marker)?;
    let index = create_group_index(&line_objects)?;
    let split = split_entries_by_deleted_status(&line_objects, &index, options)?;
    let entries = format_entries(split.active.iter().copied(), &index, options)?;
    let content = entries_to_keepassxc_content(&entries, clock)?;

    let summary = ConversionSummary { deleted: split.deleted.len(), active: split.active.len() };
    tracing::debug!(
        "Converted {} records: {} groups, {} active entries, {} trashed",
        line_objects.len(),
        index.len(),
        summary.active,
        summary.deleted
    );

    Ok(Conversion { content, summary })
}

/// Read `input`, convert it and write `output`.
///
/// The output file is only touched once the whole conversion succeeded, and
/// not at all on a dry run.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    clock: &dyn Clock,
    dry_run: bool,
) -> Result<ConversionSummary> {
    let matrix = read_csv_matrix(input)?;
    let conversion = convert(&matrix, options, clock)?;

    if dry_run {
        tracing::info!("Dry run: not writing {}", output.display());
    } else {
        std::fs::write(output, &conversion.content)?;
        tracing::info!("Wrote {} entries to {}", conversion.summary.active, output.display());
    }

    Ok(conversion.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::parse::parse_csv_matrix;
    use crate::render::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const EXPORT: &str = "\
!type,!group_id,!group_name,!group_parent,!id,title,username,password,notes,url,otp
group,g-general,General,,,,,,,,
group,g-sub,Social,g-general,,,,,,,
group,g-trash,Trash,,,,,,,,
entry,g-general,,,e1,Mail,me@example.com,pw1,,https://mail.example,
entry,g-sub,,,e2,Forum,me,pw2,old account,,otpauth://totp/forum?secret=ABC
entry,g-trash,,,e3,Old bank,me,pw3,,,
";

    fn clock() -> FixedClock {
        FixedClock(Utc.timestamp_opt(0, 0).unwrap())
    }

    #[test]
    fn test_convert_skips_trash_and_keeps_order() {
        let matrix = parse_csv_matrix(EXPORT).unwrap();
        let conversion = convert(&matrix, &ConvertOptions::default(), &clock()).unwrap();

        assert_eq!(conversion.summary, ConversionSummary { deleted: 1, active: 2 });
        let rows: Vec<&str> = conversion.content.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("General,Mail,me@example.com,pw1,,url : https://mail.example,,0,"));
        assert!(rows[2].starts_with(
            "Social,Forum,me,pw2,,notes : old account,otpauth://totp/forum?secret=ABC,0,"
        ));
        assert!(!conversion.content.contains("Old bank"));
    }

    #[test]
    fn test_summary_lines() {
        let summary = ConversionSummary { deleted: 4, active: 6 };
        assert_eq!(summary.lines(), ["Found 10 entries", "4 ignored", "6 exported"]);
    }

    #[test]
    fn test_convert_file_writes_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        let output = tmp.path().join("import.csv");
        std::fs::write(&input, EXPORT).unwrap();

        let summary =
            convert_file(&input, &output, &ConvertOptions::default(), &clock(), false).unwrap();

        assert_eq!(summary.total(), 3);
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Group,Title,Username,Password,URL,Notes,TOTP,Icon"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        let output = tmp.path().join("import.csv");
        std::fs::write(&input, EXPORT).unwrap();

        convert_file(&input, &output, &ConvertOptions::default(), &clock(), true).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_conversion_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        let output = tmp.path().join("import.csv");
        std::fs::write(&input, "!type,!group_id,title\nentry,nowhere,Lost\n").unwrap();

        let err = convert_file(&input, &output, &ConvertOptions::default(), &clock(), false)
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnknownGroup { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let err = convert(&[], &ConvertOptions::default(), &clock()).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput));
    }

    #[test]
    fn test_dangling_group_parent_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("export.csv");
        let output = tmp.path().join("import.csv");
        std::fs::write(
            &input,
            "!type,!group_id,!group_name,!group_parent,title\n\
             group,child,Orphans,gone,\n\
             entry,child,,,Lost\n",
        )
        .unwrap();

        let err = convert_file(&input, &output, &ConvertOptions::default(), &clock(), false)
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnknownGroup { ref group_id } if group_id == "gone"));
        assert!(!output.exists());
    }
}
