// src/cli/mod.rs

//! Command-line front end of the `argmeta` binary.

use crate::{
    constants::COLUMNS_ENV_VAR,
    core::{definition::load_definition, i18n::MessageBundle},
};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::{env, path::PathBuf, sync::Arc};

/// argmeta: renders the usage text of a declared command-line interface.
///
/// The interface is read from a TOML definition file that lists the program's
/// options, its main parameter and its (nested) commands.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML definition file.
    pub definition: PathBuf,

    /// Column budget for the rendered text. Overrides `ARGMETA_COLUMNS` and the file.
    #[arg(long, short)]
    pub columns: Option<usize>,

    /// Program name shown in the banner.
    #[arg(long)]
    pub program_name: Option<String>,

    /// Message bundle used to localize descriptions. Overrides the file's bundle.
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Print only the description of this top-level command (name or alias).
    #[arg(long)]
    pub describe: Option<String>,
}

/// Picks the column budget: the flag, then the environment value, then the
/// value already configured on the parser.
pub fn resolve_column_size(
    flag: Option<usize>,
    env_value: Option<&str>,
    configured: usize,
) -> Result<usize> {
    if let Some(columns) = flag {
        return Ok(columns);
    }
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.parse::<usize>().map_err(|_| {
            anyhow!(
                "Invalid value '{}' in {}: expected a positive number of columns",
                value,
                COLUMNS_ENV_VAR
            )
        }),
        None => Ok(configured),
    }
}

/// Loads the definition, applies the overrides and renders the requested text.
pub fn run(cli: &Cli) -> Result<String> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut parser = load_definition(&cli.definition)
        .with_context(|| format!("Failed to load '{}'", cli.definition.display()))?;

    if let Some(name) = &cli.program_name {
        parser.set_program_name(name.clone());
    }
    if let Some(path) = &cli.bundle {
        let bundle = MessageBundle::from_path(path)
            .with_context(|| format!("Failed to load bundle '{}'", path.display()))?;
        parser.set_bundle(Arc::new(bundle));
    }

    let env_columns = env::var(COLUMNS_ENV_VAR).ok();
    let columns = resolve_column_size(cli.columns, env_columns.as_deref(), parser.column_size())?;
    parser.set_column_size(columns)?;

    match &cli.describe {
        Some(name) => {
            let description = parser.usage_formatter().command_description(name)?;
            Ok(description.map(|text| text + "\n").unwrap_or_default())
        }
        None => Ok(parser.usage()),
    }
}
