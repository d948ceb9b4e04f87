//! Group hierarchy and trash detection

pub mod index;
pub mod trash;

pub use index::{create_group_index, GroupIndex};
pub use trash::{is_group_in_trash, split_entries_by_deleted_status, TrashClassifier};
