// src/core/i18n.rs

use log::debug;
use std::{collections::HashMap, fmt, fs, path::Path};
use thiserror::Error;

/// Failure to load a message bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Could not read message bundle '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse message bundle: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Source of localized description texts, queried per description at render time.
pub trait MessageLookup: fmt::Debug + Send + Sync {
    /// Returns the text stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// A flat key/value message bundle.
///
/// Loaded from TOML, where nested tables are flattened into dotted keys:
///
/// ```toml
/// "app.name" = "demo"
///
/// [command.one]
/// description = "the first command"   # key: command.one.description
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the text stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    /// Builder form of [`MessageBundle::insert`].
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the bundle holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Parses a bundle from TOML text. Non-string leaves are stored in their TOML form.
    pub fn from_toml_str(content: &str) -> Result<Self, BundleError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut bundle = Self::new();
        flatten_into(&mut bundle.messages, "", &table);
        debug!("Loaded message bundle with {} entries", bundle.len());
        Ok(bundle)
    }

    /// Reads and parses a TOML bundle file.
    pub fn from_path(path: &Path) -> Result<Self, BundleError> {
        debug!("Loading message bundle from '{}'", path.display());
        let content = fs::read_to_string(path).map_err(|source| BundleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

impl MessageLookup for MessageBundle {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

fn flatten_into(messages: &mut HashMap<String, String>, prefix: &str, table: &toml::Table) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_into(messages, &full_key, nested),
            toml::Value::String(text) => {
                messages.insert(full_key, text.clone());
            }
            other => {
                messages.insert(full_key, other.to_string());
            }
        }
    }
}

/// Resolves the text to display for a description.
///
/// The localized text wins when a lookup is configured and knows `key`. In every
/// other case (no lookup, no key, or a key missing from the bundle) the raw
/// description is used. Never fails and never exposes the key itself.
pub fn localize<'a>(
    lookup: Option<&'a dyn MessageLookup>,
    key: Option<&str>,
    raw: &'a str,
) -> &'a str {
    match (lookup, key) {
        (Some(lookup), Some(key)) => lookup.lookup(key).unwrap_or(raw),
        _ => raw,
    }
}
