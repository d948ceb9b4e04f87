//! Active entry records to export-ready entries

use crate::domain::{non_empty, ConvertOptions, EntryParsed, LineObject};
use crate::error::Result;
use crate::fields::{extract_extra_fields, structure_extra_fields};
use crate::groups::GroupIndex;

/// Format one entry. Buttercup's `title` becomes KeePassXC's `name`.
pub fn format_entry(
    lo: &LineObject,
    index: &GroupIndex,
    options: &ConvertOptions,
) -> Result<EntryParsed> {
    let extra_fields = extract_extra_fields(lo, options);
    let structured = structure_extra_fields(&extra_fields);
    let group = index.get(lo.group_id.as_deref().unwrap_or_default())?;

    Ok(EntryParsed {
        id: lo.id.clone(),
        name: non_empty(lo.title.as_deref()),
        username: non_empty(lo.username.as_deref()),
        password: non_empty(lo.password.as_deref()),
        group: non_empty(Some(group.name.as_str())),
        notes: structured.notes,
        totp: structured.totp,
    })
}

/// Format every entry, keeping input order.
pub fn format_entries<'a, I>(
    line_objects: I,
    index: &GroupIndex,
    options: &ConvertOptions,
) -> Result<Vec<EntryParsed>>
where
    I: IntoIterator<Item = &'a LineObject>,
{
    line_objects.into_iter().map(|lo| format_entry(lo, index, options)).collect()
}
