// src/constants.rs

//! Layout constants shared by the usage renderer and the configuration layer.

/// Column size used when none is configured.
pub const DEFAULT_COLUMN_SIZE: usize = 79;

/// Offset of the detail lines (descriptions, defaults) from the current indentation.
/// Nested parsers are also rendered this many columns to the right of their parent.
pub const DESCRIPTION_INDENT: usize = 6;

/// Offset of the `Options:` / `Commands:` headers from the current indentation.
pub const SECTION_INDENT: usize = 2;

/// Offset of option names and command names from the current indentation.
pub const ENTRY_INDENT: usize = 4;

/// Gap between a padded command name and its description.
pub const COMMAND_DESCRIPTION_GAP: usize = 6;

/// Below this many free columns a command description moves under its name
/// instead of hanging after it.
pub const MIN_HANGING_WIDTH: usize = 12;

/// Separator between a dynamic parameter's key and value when none is configured.
pub const DEFAULT_ASSIGNMENT: char = '=';

/// Environment variable overriding the column size of the `argmeta` binary.
pub const COLUMNS_ENV_VAR: &str = "ARGMETA_COLUMNS";
