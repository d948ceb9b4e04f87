//! Config file loading

use crate::domain::ConvertOptions;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `BCUP2KPXC_TRASH_GROUP_NAME`.
pub const ENV_PREFIX: &str = "BCUP2KPXC_";

/// Load options from an explicit or discovered config file, then apply
/// environment overrides.
///
/// An explicit file must exist and parse. A broken auto-discovered file is
/// reported and ignored.
pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<ConvertOptions> {
    let from_file = load_config_file(search_dir, config_path)?;
    apply_env_overrides(from_file)
}

fn load_config_file(search_dir: &Path, config_path: Option<&Path>) -> Result<ConvertOptions> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(ConvertOptions::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(options) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(options)
        }
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(ConvertOptions::default())
        }
    }
}

/// Parse TOML config, supporting a nested `[bcup2kpxc]` section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<ConvertOptions> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("bcup2kpxc") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `bcup2kpxc` section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<ConvertOptions> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("bcup2kpxc") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn apply_env_overrides(options: ConvertOptions) -> Result<ConvertOptions> {
    Figment::from(Serialized::defaults(options))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Invalid configuration in environment")
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates = ["bcup2kpxc.toml", ".bcup2kpxc.toml", "bcup2kpxc.yml", "bcup2kpxc.yaml"];

    candidates.iter().map(|candidate| search_dir.join(candidate)).find(|path| path.exists())
}
