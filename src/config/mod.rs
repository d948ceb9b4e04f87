//! Configuration loading
//!
//! Options come from built-in defaults, then a config file, then
//! `BCUP2KPXC_*` environment variables (later sources win).

pub mod loader;

pub use loader::{load_config, ENV_PREFIX};
