//! Group hierarchy index

use crate::domain::{non_empty, GroupInfo, LineObject};
use crate::error::{ConvertError, Result};
use std::collections::HashMap;

/// Group id to group, built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: HashMap<String, GroupInfo>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group unless its id is already indexed. Returns whether it was added.
    pub fn insert(&mut self, group: GroupInfo) -> bool {
        if self.groups.contains_key(&group.id) {
            return false;
        }
        self.groups.insert(group.id.clone(), group);
        true
    }

    /// Resolve a group id, failing on dangling references.
    pub fn get(&self, group_id: &str) -> Result<&GroupInfo> {
        self.groups
            .get(group_id)
            .ok_or_else(|| ConvertError::UnknownGroup { group_id: group_id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<GroupInfo> for GroupIndex {
    fn from_iter<I: IntoIterator<Item = GroupInfo>>(iter: I) -> Self {
        let mut index = GroupIndex::new();
        for group in iter {
            index.insert(group);
        }
        index
    }
}

/// Build the index from every `type == "group"` record.
///
/// An empty `group_parent` marks a root group. A group record without a
/// `group_id` is a data error; a repeated id keeps its first definition.
pub fn create_group_index(line_objects: &[LineObject]) -> Result<GroupIndex> {
    let mut index = GroupIndex::new();

    for lo in line_objects.iter().filter(|lo| lo.is_group()) {
        let id = non_empty(lo.group_id.as_deref())
            .ok_or(ConvertError::MissingGroupId { line: lo.line })?;

        let group = GroupInfo {
            id,
            name: lo.group_name.clone().unwrap_or_default(),
            parent_group_id: non_empty(lo.group_parent.as_deref()),
        };

        let id = group.id.clone();
        if !index.insert(group) {
            tracing::warn!("Group '{}' defined again on line {}; ignoring", id, lo.line);
        }
    }

    tracing::debug!("Indexed {} groups", index.len());
    Ok(index)
}
