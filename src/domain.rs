//! Core data model shared by every pipeline stage.
//!
//! A Buttercup export mixes two kinds of rows in one table: group rows that
//! describe the folder tree, and entry rows that reference a group by id.
//! Both are read into [`LineObject`]s; the well-known columns get typed slots
//! and every other column is kept, in header order, as an extra field.

use serde::{Deserialize, Serialize};

/// Name of the reserved root group whose subtree counts as deleted.
pub const TRASH_GROUP_NAME: &str = "Trash";

/// Ancestor hops allowed before a group chain is considered cyclic.
pub const MAX_GROUP_DEPTH: usize = 200;

/// Marker Buttercup may prepend to header names (`!type`, `!group_id`, ...).
pub const HEADER_MARKER: char = '!';

/// Columns never copied into the notes blob. `notes` is deliberately absent:
/// Buttercup notes must survive as a `notes : ...` line.
pub const IGNORED_FIELDS: &[&str] =
    &["password", "username", "id", "title", "group_parent", "group_name", "group_id", "type"];

/// Fixed header row of a KeePassXC CSV import.
pub const KEEPASSXC_HEADERS: [&str; 10] = [
    "Group",
    "Title",
    "Username",
    "Password",
    "URL",
    "Notes",
    "TOTP",
    "Icon",
    "Last Modified",
    "Created",
];

/// Raw CSV table: row 0 holds the headers.
pub type CsvMatrix = Vec<Vec<String>>;

/// Value of the `type` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Group,
    Entry,
    Other(String),
}

impl RecordKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "group" => RecordKind::Group,
            "entry" => RecordKind::Entry,
            other => RecordKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordKind::Group => "group",
            RecordKind::Entry => "entry",
            RecordKind::Other(value) => value,
        }
    }
}

/// One data row of the export, keyed by header name.
///
/// `None` means the column was absent from the row; an empty cell is kept as
/// `Some("")` and treated as unset by the later stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineObject {
    /// 1-based line of the source table (the header is line 1).
    pub line: usize,
    pub kind: Option<RecordKind>,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub group_parent: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub id: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    /// Non-standard columns in header order.
    pub extra: Vec<(String, String)>,
}

impl LineObject {
    pub fn new(line: usize) -> Self {
        Self { line, ..Self::default() }
    }

    /// Builder-style [`LineObject::insert`].
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Store `value` under `key` unless the key is already present.
    ///
    /// Returns `false` when an earlier column already claimed the key.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "type" => {
                if self.kind.is_some() {
                    return false;
                }
                self.kind = Some(RecordKind::parse(value));
                return true;
            }
            "group_id" => &mut self.group_id,
            "group_name" => &mut self.group_name,
            "group_parent" => &mut self.group_parent,
            "title" => &mut self.title,
            "notes" => &mut self.notes,
            "id" => &mut self.id,
            "password" => &mut self.password,
            "username" => &mut self.username,
            _ => {
                if self.extra.iter().any(|(k, _)| k == key) {
                    return false;
                }
                self.extra.push((key.to_string(), value.to_string()));
                return true;
            }
        };

        if slot.is_some() {
            return false;
        }
        *slot = Some(value.to_string());
        true
    }

    /// Look up any field by its header name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields().find(|(k, _)| *k == key).and_then(|(_, v)| v)
    }

    /// All fields in enumeration order: well-known fields first, then the
    /// extra columns in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        let known = [
            ("type", self.kind.as_ref().map(RecordKind::as_str)),
            ("group_id", self.group_id.as_deref()),
            ("group_name", self.group_name.as_deref()),
            ("group_parent", self.group_parent.as_deref()),
            ("title", self.title.as_deref()),
            ("notes", self.notes.as_deref()),
            ("id", self.id.as_deref()),
            ("password", self.password.as_deref()),
            ("username", self.username.as_deref()),
        ];
        known
            .into_iter()
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))))
    }

    pub fn is_group(&self) -> bool {
        self.kind == Some(RecordKind::Group)
    }

    pub fn is_entry(&self) -> bool {
        self.kind == Some(RecordKind::Entry)
    }
}

/// A folder of the Buttercup vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub id: String,
    pub name: String,
    pub parent_group_id: Option<String>,
}

/// A non-standard field pulled off an entry; `value` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    pub key: String,
    pub value: String,
}

impl ExtraField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Extra fields split into a one-time-password secret and a notes blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredFields {
    pub totp: Option<String>,
    pub notes: Option<String>,
}

/// An export-ready entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryParsed {
    pub id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub totp: Option<String>,
}

/// Entry rows partitioned by trash membership, in source order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitResult<'a> {
    pub active: Vec<&'a LineObject>,
    pub deleted: Vec<&'a LineObject>,
}

/// Tunables of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub trash_group_name: String,
    pub max_group_depth: usize,
    pub ignored_fields: Vec<String>,
    pub header_marker: char,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            trash_group_name: TRASH_GROUP_NAME.to_string(),
            max_group_depth: MAX_GROUP_DEPTH,
            ignored_fields: IGNORED_FIELDS.iter().map(|s| s.to_string()).collect(),
            header_marker: HEADER_MARKER,
        }
    }
}

impl ConvertOptions {
    pub fn is_ignored(&self, field: &str) -> bool {
        self.ignored_fields.iter().any(|f| f == field)
    }
}

/// Treat empty strings the way the export treats them: as unset.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
