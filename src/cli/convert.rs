//! Conversion command implementation

use anyhow::{Context, Result};
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Args;
use std::path::PathBuf;

use crate::config::load_config;
use crate::error::ConvertError;
use crate::pipeline::convert_file;
use crate::render::SystemClock;

#[derive(Args)]
pub struct ConvertArgs {
    /// Buttercup CSV export to read
    #[arg(long, value_name = "PATH", value_parser = path_or_empty())]
    pub input: Option<PathBuf>,

    /// KeePassXC CSV file to write
    #[arg(long, value_name = "PATH", value_parser = path_or_empty())]
    pub output: Option<PathBuf>,

    /// Path to config file (bcup2kpxc.toml or bcup2kpxc.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Convert and report counts without writing the output file
    #[arg(long)]
    pub dry_run: bool,
}

/// Path parser that lets `--input ""` through so it is reported as missing.
fn path_or_empty() -> impl TypedValueParser<Value = PathBuf> {
    OsStringValueParser::new().map(PathBuf::from)
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let given = |path: Option<PathBuf>| path.filter(|p| !p.as_os_str().is_empty());
    let (Some(input), Some(output)) = (given(args.input), given(args.output)) else {
        return Err(ConvertError::MissingArguments.into());
    };

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    let options = load_config(&cwd, args.config.as_deref())?;
    tracing::debug!("Using options {:?}", options);

    let summary = convert_file(&input, &output, &options, &SystemClock, args.dry_run)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    for line in summary.lines() {
        println!("{}", line);
    }

    Ok(())
}
