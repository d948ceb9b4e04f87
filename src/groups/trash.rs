//! Trash membership of groups and entries

use super::index::GroupIndex;
use crate::domain::{ConvertOptions, LineObject, SplitResult};
use crate::error::{ConvertError, Result};
use std::collections::HashMap;

/// Whether `group_id` is, or descends from, the root group named like the
/// trash (`options.trash_group_name` with no parent).
///
/// Walks the ancestor chain iteratively. At most `max_group_depth` parent
/// hops are taken; going further means the chain is cyclic or absurdly deep.
pub fn is_group_in_trash(
    index: &GroupIndex,
    group_id: &str,
    options: &ConvertOptions,
) -> Result<bool> {
    let mut current = group_id;

    for _ in 0..=options.max_group_depth {
        let group = index.get(current)?;
        if group.name == options.trash_group_name && group.parent_group_id.is_none() {
            return Ok(true);
        }
        match group.parent_group_id.as_deref() {
            Some(parent) => current = parent,
            None => return Ok(false),
        }
    }

    Err(ConvertError::RecursionLimit {
        group_id: group_id.to_string(),
        limit: options.max_group_depth,
    })
}

/// [`is_group_in_trash`] with a per-run cache; every entry of a group asks
/// the same question.
pub struct TrashClassifier<'a> {
    index: &'a GroupIndex,
    options: &'a ConvertOptions,
    cache: HashMap<String, bool>,
}

impl<'a> TrashClassifier<'a> {
    pub fn new(index: &'a GroupIndex, options: &'a ConvertOptions) -> Self {
        Self { index, options, cache: HashMap::new() }
    }

    pub fn is_in_trash(&mut self, group_id: &str) -> Result<bool> {
        if let Some(&cached) = self.cache.get(group_id) {
            return Ok(cached);
        }
        let in_trash = is_group_in_trash(self.index, group_id, self.options)?;
        self.cache.insert(group_id.to_string(), in_trash);
        Ok(in_trash)
    }
}

/// Keep the entry records and split them into active and deleted ones.
///
/// One unresolvable `group_id` aborts the whole split.
pub fn split_entries_by_deleted_status<'a>(
    line_objects: &'a [LineObject],
    index: &GroupIndex,
    options: &ConvertOptions,
) -> Result<SplitResult<'a>> {
    let mut classifier = TrashClassifier::new(index, options);
    let mut split = SplitResult::default();

    for lo in line_objects.iter().filter(|lo| lo.is_entry()) {
        let group_id = lo.group_id.as_deref().unwrap_or_default();
        if classifier.is_in_trash(group_id)? {
            tracing::debug!("Skipping trashed entry on line {}", lo.line);
            split.deleted.push(lo);
        } else {
            split.active.push(lo);
        }
    }

    Ok(split)
}
