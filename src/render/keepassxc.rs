//! KeePassXC CSV rendering

use super::clock::{iso_timestamp, Clock};
use crate::domain::{EntryParsed, KEEPASSXC_HEADERS};
use crate::error::{ConvertError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// KeePassXC's default key icon.
const DEFAULT_ICON: &str = "0";

/// Render the import file: fixed header, then one row per entry.
///
/// URL is always empty. Both timestamp columns read the clock separately.
pub fn entries_to_keepassxc_content(entries: &[EntryParsed], clock: &dyn Clock) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(KEEPASSXC_HEADERS)?;
    for entry in entries {
        let last_modified = iso_timestamp(clock.now());
        let created = iso_timestamp(clock.now());
        writer.write_record([
            entry.group.as_deref().unwrap_or_default(),
            entry.name.as_deref().unwrap_or_default(),
            entry.username.as_deref().unwrap_or_default(),
            entry.password.as_deref().unwrap_or_default(),
            "",
            entry.notes.as_deref().unwrap_or_default(),
            entry.totp.as_deref().unwrap_or_default(),
            DEFAULT_ICON,
            last_modified.as_str(),
            created.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| ConvertError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ConvertError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
