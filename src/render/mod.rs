//! Output rendering (entry formatting, KeePassXC CSV)

pub mod clock;
pub mod entries;
pub mod keepassxc;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entries::{format_entries, format_entry};
pub use keepassxc::entries_to_keepassxc_content;
