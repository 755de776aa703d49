// src/core/parser.rs

use crate::{
    constants::DEFAULT_COLUMN_SIZE,
    core::{formatter::UsageFormatter, i18n::MessageLookup},
    errors::{UsageError, UsageResult},
    models::{CommandDescriptor, MainParameter, ParameterDescriptor},
};
use std::{cmp::Ordering, sync::Arc};

/// The descriptor tree of one program or sub-command, plus its render context.
///
/// A parser exclusively owns its sub-commands, each of which owns a nested
/// parser. Nothing in the tree points back to its parent.
#[derive(Debug, Clone)]
pub struct CommandParser {
    program_name: Option<String>,
    column_size: usize,
    main_parameter: Option<MainParameter>,
    parameters: Vec<ParameterDescriptor>,
    commands: Vec<CommandDescriptor>,
    bundle: Option<Arc<dyn MessageLookup>>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self {
            program_name: None,
            column_size: DEFAULT_COLUMN_SIZE,
            main_parameter: None,
            parameters: Vec::new(),
            commands: Vec::new(),
            bundle: None,
        }
    }
}

/// Registration API producing a validated [`CommandParser`].
#[derive(Debug, Default)]
pub struct ParserBuilder {
    parser: CommandParser,
}

impl ParserBuilder {
    /// Name shown in the banner instead of `<main class>`.
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.parser.program_name = Some(name.into());
        self
    }

    /// Maximum rendered line width. Validated by [`ParserBuilder::build`].
    pub fn column_size(mut self, column_size: usize) -> Self {
        self.parser.column_size = column_size;
        self
    }

    /// Registers a named option. Names are checked by [`ParserBuilder::build`].
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parser.parameters.push(parameter);
        self
    }

    /// Sets the positional parameter described at the end of the banner.
    pub fn main_parameter(mut self, main_parameter: MainParameter) -> Self {
        self.parser.main_parameter = Some(main_parameter);
        self
    }

    /// Registers a sub-command. Duplicate names are checked by [`ParserBuilder::build`].
    pub fn command(mut self, command: CommandDescriptor) -> Self {
        self.parser.commands.push(command);
        self
    }

    /// Message bundle localizing this parser's descriptions and its sub-commands'.
    pub fn bundle(mut self, bundle: Arc<dyn MessageLookup>) -> Self {
        self.parser.bundle = Some(bundle);
        self
    }

    /// Validates the configuration and returns the parser.
    ///
    /// # Errors
    /// - [`UsageError::InvalidColumnSize`] for a column size of zero.
    /// - [`UsageError::UnnamedParameter`] for an option without names.
    /// - [`UsageError::DuplicateCommand`] when two commands share a name or alias.
    pub fn build(self) -> UsageResult<CommandParser> {
        let parser = self.parser;
        validate_column_size(parser.column_size)?;
        if parser.parameters.iter().any(|p| p.names.is_empty()) {
            return Err(UsageError::UnnamedParameter);
        }
        for (index, command) in parser.commands.iter().enumerate() {
            let earlier = parser.commands.iter().take(index);
            if let Some(clash) = first_clash(command, earlier) {
                return Err(UsageError::DuplicateCommand(clash));
            }
        }
        Ok(parser)
    }
}

fn validate_column_size(column_size: usize) -> UsageResult<()> {
    if column_size == 0 {
        return Err(UsageError::InvalidColumnSize(column_size));
    }
    Ok(())
}

/// Returns the first name or alias of `command` already claimed by `others`.
fn first_clash<'a>(
    command: &CommandDescriptor,
    others: impl Iterator<Item = &'a CommandDescriptor> + Clone,
) -> Option<String> {
    std::iter::once(&command.name)
        .chain(command.aliases.iter())
        .find(|name| others.clone().any(|other| other.answers_to(name)))
        .cloned()
}

/// Explicitly ordered parameters first (by position), then by primary name.
fn compare_parameters(a: &ParameterDescriptor, b: &ParameterDescriptor) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.primary_name().cmp(b.primary_name()),
    }
}

impl CommandParser {
    /// Starts a [`ParserBuilder`] with the default render context.
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// The configured program name, if any. See [`CommandParser::display_program_name`].
    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    /// The name shown in the banner, `<main class>` when none is configured.
    pub fn display_program_name(&self) -> &str {
        self.program_name
            .as_deref()
            .unwrap_or(t!("usage.program.placeholder"))
    }

    /// Replaces the program name shown in the banner.
    pub fn set_program_name(&mut self, name: impl Into<String>) {
        self.program_name = Some(name.into());
    }

    /// Maximum width, in columns, of every rendered line.
    pub fn column_size(&self) -> usize {
        self.column_size
    }

    /// Changes the column size used by subsequent renders.
    ///
    /// # Errors
    /// Returns [`UsageError::InvalidColumnSize`] for zero; the previous value is kept.
    pub fn set_column_size(&mut self, column_size: usize) -> UsageResult<()> {
        validate_column_size(column_size)?;
        self.column_size = column_size;
        Ok(())
    }

    /// The positional parameter, if one was declared.
    pub fn main_parameter(&self) -> Option<&MainParameter> {
        self.main_parameter.as_ref()
    }

    /// All registered options in registration order, hidden ones included.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Options that appear in the usage text, in display order.
    pub fn sorted_parameters(&self) -> Vec<&ParameterDescriptor> {
        let mut visible: Vec<_> = self.parameters.iter().filter(|p| !p.hidden).collect();
        visible.sort_by(|a, b| compare_parameters(a, b));
        visible
    }

    /// Finds an option by any of its names, for assigning parsed values.
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut ParameterDescriptor> {
        self.parameters
            .iter_mut()
            .find(|p| p.names.iter().any(|n| n == name))
    }

    /// Registers an option after construction.
    ///
    /// # Errors
    /// Returns [`UsageError::UnnamedParameter`] if `parameter` has no names.
    pub fn add_parameter(&mut self, parameter: ParameterDescriptor) -> UsageResult<()> {
        if parameter.names.is_empty() {
            return Err(UsageError::UnnamedParameter);
        }
        self.parameters.push(parameter);
        Ok(())
    }

    /// Commands that appear in the usage text, ordered by name.
    pub fn sorted_commands(&self) -> Vec<&CommandDescriptor> {
        let mut visible: Vec<_> = self.commands.iter().filter(|c| !c.hidden).collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));
        visible
    }

    /// Finds a command by name or alias.
    pub fn find_command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.answers_to(name))
    }

    /// Mutable variant of [`CommandParser::find_command`], used to nest sub-commands.
    pub fn find_command_mut(&mut self, name: &str) -> Option<&mut CommandDescriptor> {
        self.commands.iter_mut().find(|c| c.answers_to(name))
    }

    /// Registers a sub-command after construction.
    ///
    /// # Errors
    /// Returns [`UsageError::DuplicateCommand`] if the name or an alias is taken.
    pub fn add_command(&mut self, command: CommandDescriptor) -> UsageResult<()> {
        if let Some(clash) = first_clash(&command, self.commands.iter()) {
            return Err(UsageError::DuplicateCommand(clash));
        }
        self.commands.push(command);
        Ok(())
    }

    /// This parser's own bundle. Sub-parsers without one inherit their parent's.
    pub fn bundle(&self) -> Option<&dyn MessageLookup> {
        self.bundle.as_deref()
    }

    /// Replaces this parser's message bundle.
    pub fn set_bundle(&mut self, bundle: Arc<dyn MessageLookup>) {
        self.bundle = Some(bundle);
    }

    /// A formatter borrowing this parser.
    pub fn usage_formatter(&self) -> UsageFormatter<'_> {
        UsageFormatter::new(self)
    }

    /// Renders the full usage text of this parser and its command tree.
    pub fn usage(&self) -> String {
        self.usage_formatter().usage()
    }
}
