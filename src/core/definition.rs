// src/core/definition.rs

//! # Definition Files
//!
//! Declares a whole parser tree in TOML:
//!
//! ```toml
//! program_name = "vcs"
//! column_size = 79
//! bundle = "messages.toml"        # relative to this file
//!
//! [main_parameter]
//! description = "files to track"
//!
//! [[parameters]]
//! names = ["-v", "--verbose"]
//! description = "Level of verbosity"
//! default = 0
//!
//! [[commands]]
//! name = "commit"
//! aliases = ["ci"]
//! description = "Record changes"
//!
//! [[commands.parameters]]
//! names = ["--amend"]
//! ```

use crate::{
    core::{
        i18n::{BundleError, MessageBundle},
        parser::CommandParser,
    },
    errors::UsageError,
    models::{CommandDescriptor, FieldValue, MainParameter, ParameterDescriptor},
};
use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

/// Failure to turn a definition file into a parser tree.
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Could not read definition file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse definition: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Unsupported default value for parameter '{0}': tables cannot be displayed")]
    UnsupportedDefault(String),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

// --- TOML MODELS ---

/// Root of a definition file.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TomlDefinition {
    pub program_name: Option<String>,
    pub column_size: Option<usize>,
    /// Message bundle path, relative to the definition file.
    pub bundle: Option<PathBuf>,
    pub main_parameter: Option<TomlMainParameter>,
    #[serde(default)]
    pub parameters: Vec<TomlParameter>,
    #[serde(default)]
    pub commands: Vec<TomlCommand>,
}

/// `[main_parameter]` table.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TomlMainParameter {
    #[serde(default)]
    pub description: String,
    pub description_key: Option<String>,
}

/// One `[[parameters]]` entry.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TomlParameter {
    pub names: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub description_key: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub help: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub password: bool,
    /// Assignment character of a dynamic parameter (`-Dkey=value`).
    pub dynamic: Option<char>,
    pub order: Option<u32>,
    /// Scalar or array; tables are rejected.
    pub default: Option<toml::Value>,
    pub choices: Option<Vec<String>>,
}

/// One `[[commands]]` entry; nests the same tables as the root.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct TomlCommand {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub description_key: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    pub bundle: Option<PathBuf>,
    pub main_parameter: Option<TomlMainParameter>,
    #[serde(default)]
    pub parameters: Vec<TomlParameter>,
    #[serde(default)]
    pub commands: Vec<TomlCommand>,
}

// --- LOADING ---

/// Reads a definition file and builds its parser tree.
///
/// Bundle paths inside the file are resolved against the file's directory.
pub fn load_definition(path: &Path) -> Result<CommandParser, DefinitionError> {
    debug!("Loading definition from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    from_toml_str(&content, base_dir)
}

/// Parses definition text. Relative bundle paths are joined onto `base_dir`.
pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<CommandParser, DefinitionError> {
    let definition: TomlDefinition = toml::from_str(content)?;
    definition.into_parser(base_dir)
}

impl TomlDefinition {
    /// Converts the file model into a validated [`CommandParser`].
    pub fn into_parser(self, base_dir: &Path) -> Result<CommandParser, DefinitionError> {
        let mut builder = CommandParser::builder();
        if let Some(name) = self.program_name {
            builder = builder.program_name(name);
        }
        if let Some(column_size) = self.column_size {
            builder = builder.column_size(column_size);
        }
        if let Some(path) = self.bundle {
            builder = builder.bundle(Arc::new(load_bundle(base_dir, &path)?));
        }
        if let Some(main) = self.main_parameter {
            builder = builder.main_parameter(main.into_main_parameter());
        }
        for param in self.parameters {
            builder = builder.parameter(param.into_descriptor()?);
        }
        for command in self.commands {
            builder = builder.command(command.into_descriptor(base_dir)?);
        }
        Ok(builder.build()?)
    }
}

impl TomlMainParameter {
    fn into_main_parameter(self) -> MainParameter {
        let main = MainParameter::new(self.description);
        match self.description_key {
            Some(key) => main.with_description_key(key),
            None => main,
        }
    }
}

impl TomlParameter {
    fn into_descriptor(self) -> Result<ParameterDescriptor, DefinitionError> {
        let mut param = ParameterDescriptor::new(self.names).with_description(self.description);
        if let Some(key) = self.description_key {
            param = param.with_description_key(key);
        }
        if let Some(placeholder) = self.placeholder {
            param = param.with_placeholder(placeholder);
        }
        if let Some(order) = self.order {
            param = param.with_order(order);
        }
        if let Some(choices) = self.choices {
            param = param.with_permitted_values(choices);
        }
        if let Some(default) = self.default {
            let value = field_value(&default)
                .ok_or_else(|| DefinitionError::UnsupportedDefault(param.primary_name().to_string()))?;
            param = param.with_default(value);
        }
        if let Some(assignment) = self.dynamic {
            param = param.dynamic(assignment);
        }
        param.required = self.required;
        param.help = self.help;
        param.hidden = self.hidden;
        param.password = self.password;
        Ok(param)
    }
}

impl TomlCommand {
    fn into_descriptor(self, base_dir: &Path) -> Result<CommandDescriptor, DefinitionError> {
        let mut builder = CommandParser::builder();
        if let Some(path) = self.bundle {
            builder = builder.bundle(Arc::new(load_bundle(base_dir, &path)?));
        }
        if let Some(main) = self.main_parameter {
            builder = builder.main_parameter(main.into_main_parameter());
        }
        for param in self.parameters {
            builder = builder.parameter(param.into_descriptor()?);
        }
        for command in self.commands {
            builder = builder.command(command.into_descriptor(base_dir)?);
        }

        let mut command = CommandDescriptor::new(self.name, builder.build()?)
            .with_description(self.description)
            .with_aliases(self.aliases);
        if let Some(key) = self.description_key {
            command = command.with_description_key(key);
        }
        command.hidden = self.hidden;
        Ok(command)
    }
}

fn load_bundle(base_dir: &Path, path: &Path) -> Result<MessageBundle, BundleError> {
    MessageBundle::from_path(&base_dir.join(path))
}

/// Display form of a TOML default. Strings are taken verbatim, arrays become
/// lists, tables have no display form.
fn field_value(value: &toml::Value) -> Option<FieldValue> {
    match value {
        toml::Value::Table(_) => None,
        toml::Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::List),
        scalar => scalar_text(scalar).map(FieldValue::Scalar),
    }
}

fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Table(_) | toml::Value::Array(_) => None,
        other => Some(other.to_string()),
    }
}
