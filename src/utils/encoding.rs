//! Encoding detection and file reading with UTF-8 fallback logic.
//!
//! Buttercup writes UTF-8, but exports that went through a spreadsheet
//! often come back with a BOM or in a legacy code page. Reading handles:
//! - BOM detection (UTF-8, UTF-16 LE/BE), with the BOM stripped
//! - UTF-8 fast-path with strict validation
//! - Fallback encoding detection using chardetng

use crate::error::Result;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Decode raw bytes into text.
///
/// Returns the decoded text and a normalized label of the encoding used
/// (e.g. "utf-8", "utf-16le", "windows-1252").
pub fn decode_text(bytes: &[u8]) -> (String, String) {
    // BOM wins over everything else; `decode` strips it.
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, used, _had_errors) = encoding.decode(bytes);
        return (decoded.into_owned(), used.name().to_lowercase());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8".to_string());
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    let encoding = detector.guess(None, true);

    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors && encoding != UTF_8 {
        tracing::warn!("Input decoded as {} with replacement characters", used.name());
    }
    (decoded.into_owned(), used.name().to_lowercase())
}

/// Read a whole text file, detecting its encoding.
pub fn read_text_file(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path)?;
    let (content, encoding) = decode_text(&bytes);
    tracing::debug!("Read {} bytes from {} ({})", bytes.len(), path.display(), encoding);
    Ok((content, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_decode_plain_utf8() {
        let (text, encoding) = decode_text("Rhinocéros 🦏".as_bytes());
        assert_eq!(text, "Rhinocéros 🦏");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"!type,!group_id");
        let (text, encoding) = decode_text(&bytes);
        assert_eq!(text, "!type,!group_id");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_utf16_le_bom() {
        let mut bytes = vec![0xff, 0xfe];
        for unit in "a,b".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let (text, encoding) = decode_text(&bytes);
        assert_eq!(text, "a,b");
        assert_eq!(encoding, "utf-16le");
    }

    #[test]
    fn test_decode_legacy_code_page() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(
            "author,book\nEugène Ionesco,Rhinocéros\nthéâtre de l'absurde,pièce en trois actes\n",
        );
        let (text, _) = decode_text(&bytes);
        assert!(text.contains("Rhinocéros"));
    }

    #[test]
    fn test_read_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("!type,!title\nentry,Mail\n".as_bytes()).unwrap();
        file.flush().unwrap();

        let (content, encoding) = read_text_file(file.path()).unwrap();
        assert_eq!(content, "!type,!title\nentry,Mail\n");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_text_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, crate::error::ConvertError::Io(_)));
    }
}
