//! bcup2kpxc: Convert Buttercup CSV exports into KeePassXC CSV imports
//!
//! The export is read into line objects, the group tree is rebuilt, entries
//! living under the root `Trash` group are dropped, and every remaining entry
//! is reshaped into KeePassXC's fixed ten-column layout. Non-standard fields
//! end up in the notes column, except for an `otpauth://` URI which becomes
//! the TOTP column.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fields;
pub mod groups;
pub mod parse;
pub mod pipeline;
pub mod render;
pub mod utils;

pub use domain::{ConvertOptions, EntryParsed, GroupInfo, LineObject};
pub use error::ConvertError;
pub use pipeline::{convert, convert_file, Conversion, ConversionSummary};
