//! # argmeta
//!
//! Declarative command-line parameter metadata and the usage renderer that
//! turns it into column-bounded, hierarchically indented help text.
//!
//! A [`CommandParser`] owns the descriptors of one program (its options, an
//! optional positional main parameter, and a tree of sub-commands). A
//! [`UsageFormatter`] renders that tree:
//!
//! ```text
//! Usage: <main class> [options] [command] [command options]
//!
//!   Options:
//!     -a, --a, --a-parameter
//!       a parameter
//!       Default: 0
//! ```

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod errors;
pub mod models;

pub use crate::core::formatter::UsageFormatter;
pub use crate::core::i18n::{MessageBundle, MessageLookup};
pub use crate::core::parser::{CommandParser, ParserBuilder};
pub use errors::UsageError;
pub use models::{CommandDescriptor, FieldValue, MainParameter, ParameterDescriptor};
