//! Extra fields: everything outside the well-known entry schema.
//!
//! KeePassXC only has room for one TOTP secret and one notes blob per entry,
//! so extra Buttercup fields are folded into those two columns.

use crate::domain::{ConvertOptions, ExtraField, LineObject, StructuredFields};
use once_cell::sync::Lazy;
use regex::Regex;

/// An `otpauth://` URI with a non-empty remainder.
pub static TOTP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^otpauth://.").expect("valid regex"));

/// Collect the non-empty fields of `lo` that are not in the ignore list,
/// in [`LineObject::fields`] order.
pub fn extract_extra_fields(lo: &LineObject, options: &ConvertOptions) -> Vec<ExtraField> {
    lo.fields()
        .filter(|(key, _)| !options.is_ignored(key))
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some(ExtraField::new(key, value)),
            _ => None,
        })
        .collect()
}

/// Split extra fields into a TOTP secret and `key : value` note lines.
///
/// Only the first TOTP-looking field is kept; later ones are dropped, not
/// moved into the notes.
pub fn structure_extra_fields(fields: &[ExtraField]) -> StructuredFields {
    let (totp_fields, note_fields): (Vec<&ExtraField>, Vec<&ExtraField>) =
        fields.iter().partition(|f| TOTP_PATTERN.is_match(&f.value));

    if totp_fields.len() > 1 {
        tracing::warn!(
            "Found {} one-time-password fields; keeping '{}' only",
            totp_fields.len(),
            totp_fields[0].key
        );
    }

    let notes = note_fields
        .iter()
        .map(|f| format!("{} : {}", f.key, f.value))
        .collect::<Vec<_>>()
        .join("\n");

    StructuredFields {
        totp: totp_fields.first().map(|f| f.value.clone()),
        notes: if notes.is_empty() { None } else { Some(notes) },
    }
}
