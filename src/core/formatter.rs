// src/core/formatter.rs

//! # Usage Formatter
//!
//! Renders a [`CommandParser`] and its command tree into help text:
//!
//! 1. **Banner:** `Usage: <program> [options] [command] [command options] <main>`.
//!    Which segments appear is decided before anything is written.
//! 2. **Options:** names at `indent + 4`, detail lines (description, syntax,
//!    default, possible values) at `indent + 6`.
//! 3. **Commands:** aligned names with hanging descriptions, each followed by
//!    the command's own usage rendered `6` columns further right.
//!
//! The tree is walked with an explicit stack of frames instead of recursion,
//! so arbitrarily deep command trees cannot exhaust the call stack.

use crate::{
    constants::{
        COMMAND_DESCRIPTION_GAP, DESCRIPTION_INDENT, ENTRY_INDENT, MIN_HANGING_WIDTH,
        SECTION_INDENT,
    },
    core::{
        i18n::{MessageLookup, localize},
        parser::CommandParser,
        values,
        wrapper::{display_width, wrap_hanging},
    },
    errors::{UsageError, UsageResult},
    models::{CommandDescriptor, ParameterDescriptor},
};
use log::{debug, trace};
use std::fmt;

/// Renders usage text for a parser. Holds nothing but a shared borrow, so it
/// is cheap to create per call and safe to use from several threads.
#[derive(Debug, Clone, Copy)]
pub struct UsageFormatter<'p> {
    parser: &'p CommandParser,
}

/// One pending unit of work of the tree walk.
enum Frame<'p> {
    /// Banner and options of a parser, then the header of its command list.
    Parser {
        parser: &'p CommandParser,
        program: &'p str,
        lookup: Option<&'p dyn MessageLookup>,
        indent: usize,
    },
    /// One entry of a command list, followed by its sub-parser.
    Command {
        command: &'p CommandDescriptor,
        lookup: Option<&'p dyn MessageLookup>,
        indent: usize,
        name_width: usize,
        separated: bool,
    },
}

/// Line-level writer that keeps every line inside `column_size`.
struct Writer<'o> {
    out: &'o mut String,
    column_size: usize,
}

impl Writer<'_> {
    fn indent(&mut self, columns: usize) {
        self.out.extend(std::iter::repeat_n(' ', columns));
    }

    /// Writes `text` wrapped, assuming the cursor already sits at `first_col`.
    /// Continuation lines start at `rest_col`. Always ends with a newline.
    fn wrapped(&mut self, text: &str, first_col: usize, rest_col: usize) {
        let first_width = self.column_size.saturating_sub(first_col);
        let width = self.column_size.saturating_sub(rest_col);
        for (index, line) in wrap_hanging(text, first_width, width).enumerate() {
            if index > 0 {
                self.indent(rest_col);
            }
            self.out.push_str(&line);
            self.out.push('\n');
        }
    }

    fn detail(&mut self, text: &str, col: usize) {
        self.indent(col);
        self.wrapped(text, col, col);
    }

    fn section_header(&mut self, title: &str, indent: usize) {
        self.out.push('\n');
        self.indent(indent + SECTION_INDENT);
        self.out.push_str(title);
        self.out.push('\n');
    }

    fn banner(
        &mut self,
        parser: &CommandParser,
        program: &str,
        lookup: Option<&dyn MessageLookup>,
        indent: usize,
        has_options: bool,
        has_commands: bool,
    ) {
        let mut banner = format!("{} {}", t!("usage.banner"), program);
        if has_options {
            banner.push(' ');
            banner.push_str(t!("usage.banner.options"));
        }
        if has_commands {
            banner.push(' ');
            banner.push_str(t!("usage.banner.commands"));
        }
        if let Some(main) = parser.main_parameter() {
            let description = localize(lookup, main.description_key.as_deref(), &main.description);
            if !description.trim().is_empty() {
                banner.push(' ');
                banner.push_str(description);
            }
        }

        self.indent(indent);
        self.wrapped(&banner, indent, indent + DESCRIPTION_INDENT);
    }

    fn parameter(
        &mut self,
        param: &ParameterDescriptor,
        lookup: Option<&dyn MessageLookup>,
        indent: usize,
    ) {
        let detail_col = indent + DESCRIPTION_INDENT;

        self.indent(indent + SECTION_INDENT);
        self.out.push_str(if param.required { "* " } else { "  " });
        let mut names = param.display_names();
        if let Some(placeholder) = &param.placeholder {
            names.push(' ');
            names.push_str(placeholder);
        }
        self.wrapped(&names, indent + ENTRY_INDENT, detail_col);

        let description = localize(lookup, param.description_key.as_deref(), &param.description);
        let has_description = !description.trim().is_empty();

        // Without a description, the value list takes its place.
        if has_description {
            self.detail(description, detail_col);
        } else if let Some(line) = values::choices_line(param, false) {
            self.detail(&line, detail_col);
        }
        if let Some(line) = values::syntax_line(param) {
            self.detail(&line, detail_col);
        }
        if let Some(line) = values::default_line(param) {
            self.detail(&line, detail_col);
        }
        if has_description {
            if let Some(line) = values::choices_line(param, true) {
                self.detail(&line, detail_col);
            }
        }
    }

    fn command(
        &mut self,
        command: &CommandDescriptor,
        lookup: Option<&dyn MessageLookup>,
        indent: usize,
        name_width: usize,
    ) {
        let entry_col = indent + ENTRY_INDENT;
        let detail_col = indent + DESCRIPTION_INDENT;
        let name = command.display_name();
        let description = localize(
            lookup,
            command.description_key.as_deref(),
            &command.description,
        );

        let hanging_col = entry_col + name_width + COMMAND_DESCRIPTION_GAP;
        let hangs = !description.trim().is_empty()
            && display_width(&name) <= name_width
            && self.column_size >= hanging_col + MIN_HANGING_WIDTH;

        self.indent(entry_col);
        if hangs {
            self.out.push_str(&name);
            let padding = name_width - display_width(&name) + COMMAND_DESCRIPTION_GAP;
            self.indent(padding);
            self.wrapped(description, hanging_col, hanging_col);
        } else {
            // Name on its own (split if needed), description below it.
            self.wrapped(&name, entry_col, detail_col);
            if !description.trim().is_empty() {
                self.detail(description, detail_col);
            }
        }
    }

    /// Width of the aligned name column of a command list. Names too wide to
    /// leave room for a hanging description do not widen it.
    fn name_column(&self, commands: &[&CommandDescriptor], indent: usize) -> usize {
        let widest_hanging = self.column_size.saturating_sub(
            indent + ENTRY_INDENT + COMMAND_DESCRIPTION_GAP + MIN_HANGING_WIDTH,
        );
        commands
            .iter()
            .map(|command| display_width(&command.display_name()))
            .filter(|width| *width <= widest_hanging)
            .max()
            .unwrap_or(0)
    }
}

impl<'p> UsageFormatter<'p> {
    /// Creates a formatter over `parser` and everything reachable from it.
    pub fn new(parser: &'p CommandParser) -> Self {
        Self { parser }
    }

    /// Renders the full usage text.
    pub fn usage(&self) -> String {
        let mut out = String::new();
        self.append_usage(&mut out);
        out
    }

    /// Writes the full usage text into `sink` in a single write.
    ///
    /// The text is rendered into a buffer first, so a failing sink never
    /// receives a partial usage block from this call.
    pub fn write_usage<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str(&self.usage())
    }

    /// Appends the full usage text to `out`.
    pub fn append_usage(&self, out: &mut String) {
        let root = self.parser;
        let mut writer = Writer {
            out,
            column_size: root.column_size(),
        };
        debug!(
            "Rendering usage for '{}' at {} columns",
            root.display_program_name(),
            writer.column_size
        );

        let mut stack = vec![Frame::Parser {
            parser: root,
            program: root.display_program_name(),
            lookup: root.bundle(),
            indent: 0,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Parser {
                    parser,
                    program,
                    lookup,
                    indent,
                } => {
                    trace!("Rendering parser '{}' at indent {}", program, indent);
                    let options = parser.sorted_parameters();
                    let commands = parser.sorted_commands();

                    writer.banner(
                        parser,
                        program,
                        lookup,
                        indent,
                        !options.is_empty(),
                        !commands.is_empty(),
                    );

                    if !options.is_empty() {
                        writer.section_header(t!("usage.section.options"), indent);
                        for param in options {
                            writer.parameter(param, lookup, indent);
                        }
                    }

                    if !commands.is_empty() {
                        writer.section_header(t!("usage.section.commands"), indent);
                        let name_width = writer.name_column(&commands, indent);
                        // Reversed so the first command is popped first.
                        for (index, command) in commands.into_iter().enumerate().rev() {
                            stack.push(Frame::Command {
                                command,
                                lookup: command.parser.bundle().or(lookup),
                                indent,
                                name_width,
                                separated: index > 0,
                            });
                        }
                    }
                }
                Frame::Command {
                    command,
                    lookup,
                    indent,
                    name_width,
                    separated,
                } => {
                    if separated {
                        writer.out.push('\n');
                    }
                    writer.command(command, lookup, indent, name_width);
                    stack.push(Frame::Parser {
                        parser: &command.parser,
                        program: &command.name,
                        lookup,
                        indent: indent + DESCRIPTION_INDENT,
                    });
                }
            }
        }
    }

    /// The (localized) description of a top-level command, by name or alias.
    ///
    /// Returns `Ok(None)` for a registered command without a description.
    ///
    /// # Errors
    /// Returns [`UsageError::CommandNotFound`] if no command answers to `name`.
    pub fn command_description(&self, name: &str) -> UsageResult<Option<String>> {
        let command = self
            .parser
            .find_command(name)
            .ok_or_else(|| UsageError::CommandNotFound(name.to_string()))?;
        let lookup = command.parser.bundle().or(self.parser.bundle());
        let description = localize(
            lookup,
            command.description_key.as_deref(),
            &command.description,
        );
        Ok((!description.trim().is_empty()).then(|| description.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::i18n::MessageBundle;
    use crate::models::{FieldValue, MainParameter};
    use std::sync::Arc;

    fn int_param(names: [&str; 3], description: &str) -> ParameterDescriptor {
        ParameterDescriptor::new(names)
            .with_description(description)
            .with_default(FieldValue::scalar(0))
    }

    fn command_with_main(name: &str, description: &str, main: &str) -> CommandDescriptor {
        let parser = CommandParser::builder()
            .main_parameter(MainParameter::new(main))
            .build()
            .unwrap();
        CommandDescriptor::new(name, parser).with_description(description)
    }

    fn assert_width_bound(usage: &str, column_size: usize) {
        for line in usage.lines() {
            assert!(
                display_width(line) <= column_size,
                "line exceeds {} columns: {:?}",
                column_size,
                line
            );
        }
    }

    const LONG_TEXT: &str = "This is a very long description that keeps going well past the \
        configured column size so that it has to be wrapped across several lines, and it \
        also embeds an unbreakable token https://example.com/a/really/long/path/that/cannot/\
        be/split/on/whitespace/because/it/has/none/at/all/anywhere/in/it to exercise splitting.";

    // --- Exact Layout Tests ---

    #[test]
    fn test_usage_with_nested_commands() {
        // --- Setup ---
        let one = CommandParser::builder()
            .parameter(int_param(["-b", "--b", "--b-parameter"], "b parameter"))
            .build()
            .unwrap();
        let two = CommandParser::builder()
            .parameter(int_param(["-c", "--c", "--c-parameter"], "c parameter"))
            .build()
            .unwrap();
        let parser = CommandParser::builder()
            .parameter(int_param(["-a", "--a", "--a-parameter"], "a parameter"))
            .command(CommandDescriptor::new("two", two).with_description("two command"))
            .command(CommandDescriptor::new("one", one).with_description("one command"))
            .build()
            .unwrap();

        // --- Execute ---
        let usage = parser.usage();

        // --- Assert ---
        let expected = concat!(
            "Usage: <main class> [options] [command] [command options]\n",
            "\n",
            "  Options:\n",
            "    -a, --a, --a-parameter\n",
            "      a parameter\n",
            "      Default: 0\n",
            "\n",
            "  Commands:\n",
            "    one      one command\n",
            "      Usage: one [options]\n",
            "\n",
            "        Options:\n",
            "          -b, --b, --b-parameter\n",
            "            b parameter\n",
            "            Default: 0\n",
            "\n",
            "    two      two command\n",
            "      Usage: two [options]\n",
            "\n",
            "        Options:\n",
            "          -c, --c, --c-parameter\n",
            "            c parameter\n",
            "            Default: 0\n",
        );
        assert_eq!(usage, expected);
    }

    #[test]
    fn test_output_format_of_defaults_and_choices() {
        let abcd = ["A", "B", "C", "D"];
        let none: [&str; 0] = [];
        let parser = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["--a", "-a"]).with_default(FieldValue::scalar(0)))
            .parameter(ParameterDescriptor::new(["--b", "-b"]).with_default(FieldValue::scalar(2)))
            .parameter(
                ParameterDescriptor::new(["--c", "-c"])
                    .with_description("sets c")
                    .with_default(FieldValue::scalar(0)),
            )
            .parameter(
                ParameterDescriptor::new(["--d", "-d"])
                    .with_description("sets d")
                    .with_default(FieldValue::scalar(2)),
            )
            .parameter(ParameterDescriptor::new(["--e"]).with_permitted_values(abcd))
            .parameter(
                ParameterDescriptor::new(["--f"])
                    .with_permitted_values(abcd)
                    .with_default(FieldValue::scalar("A")),
            )
            .parameter(
                ParameterDescriptor::new(["--g"])
                    .with_description("sets g")
                    .with_permitted_values(abcd),
            )
            .parameter(
                ParameterDescriptor::new(["--h"])
                    .with_description("sets h")
                    .with_permitted_values(abcd)
                    .with_default(FieldValue::scalar("A")),
            )
            .parameter(ParameterDescriptor::new(["-i"]).with_permitted_values(none))
            .parameter(
                ParameterDescriptor::new(["-k"])
                    .with_description("sets k")
                    .with_permitted_values(none),
            )
            .build()
            .unwrap();

        let expected = concat!(
            "Usage: <main class> [options]\n",
            "\n",
            "  Options:\n",
            "    --a, -a\n",
            "      Default: 0\n",
            "    --b, -b\n",
            "      Default: 2\n",
            "    --c, -c\n",
            "      sets c\n",
            "      Default: 0\n",
            "    --d, -d\n",
            "      sets d\n",
            "      Default: 2\n",
            "    --e\n",
            "      Options: [A, B, C, D]\n",
            "    --f\n",
            "      Options: [A, B, C, D]\n",
            "      Default: A\n",
            "    --g\n",
            "      sets g\n",
            "      Possible Values: [A, B, C, D]\n",
            "    --h\n",
            "      sets h\n",
            "      Default: A\n",
            "      Possible Values: [A, B, C, D]\n",
            "    -i\n",
            "      Options: []\n",
            "    -k\n",
            "      sets k\n",
            "      Possible Values: []\n",
        );
        assert_eq!(parser.usage(), expected);
    }

    #[test]
    fn test_placeholder_follows_names() {
        let parser = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["-i"]).with_placeholder("<filename>"))
            .build()
            .unwrap();

        let expected = concat!(
            "Usage: <main class> [options]\n",
            "\n",
            "  Options:\n",
            "    -i <filename>\n",
        );
        assert_eq!(parser.usage(), expected);
    }

    #[test]
    fn test_commands_separated_by_one_blank_line() {
        let parser = CommandParser::builder()
            .command(command_with_main("a", "command a", "command a parameters"))
            .command(command_with_main("b", "command b", "command b parameters"))
            .build()
            .unwrap();

        let usage = parser.usage();

        let expected = concat!(
            "Usage: <main class> [command] [command options]\n",
            "\n",
            "  Commands:\n",
            "    a      command a\n",
            "      Usage: a command a parameters\n",
            "\n",
            "    b      command b\n",
            "      Usage: b command b parameters\n",
        );
        assert_eq!(usage, expected);
        assert!(usage.contains("[command options]\n\n  Commands:"));
    }

    #[test]
    fn test_sub_commands_are_indented_further() {
        let mut parser = CommandParser::builder()
            .column_size(100)
            .command(command_with_main("a", "command a", "command a parameters"))
            .build()
            .unwrap();
        let a = parser.find_command_mut("a").unwrap();
        a.parser
            .add_command(command_with_main("b", "command b", "command b parameters"))
            .unwrap();

        let usage = parser.usage();

        assert!(usage.contains("command a parameters\n\n        Commands:"));
        assert!(usage.contains("command b\n            Usage:"));
        assert!(usage.contains(
            "      Usage: a [command] [command options] command a parameters\n"
        ));
    }

    #[test]
    fn test_required_marker_and_dynamic_syntax() {
        let parser = CommandParser::builder()
            .parameter(
                ParameterDescriptor::new(["-D"])
                    .with_description("Dynamic parameters go here")
                    .dynamic('='),
            )
            .parameter(ParameterDescriptor::new(["-A"]).dynamic('@'))
            .parameter(
                ParameterDescriptor::new(["--name"])
                    .with_description("who to greet")
                    .required(),
            )
            .build()
            .unwrap();

        let expected = concat!(
            "Usage: <main class> [options]\n",
            "\n",
            "  Options:\n",
            "  * --name\n",
            "      who to greet\n",
            "    -A\n",
            "      Syntax: -Akey@value\n",
            "    -D\n",
            "      Dynamic parameters go here\n",
            "      Syntax: -Dkey=value\n",
        );
        assert_eq!(parser.usage(), expected);
    }

    #[test]
    fn test_aliases_widen_the_name_column() {
        let parser = CommandParser::builder()
            .command(
                CommandDescriptor::new("remote", CommandParser::default())
                    .with_aliases(["r"])
                    .with_description("manage remotes"),
            )
            .command(CommandDescriptor::new("add", CommandParser::default()).with_description("add files"))
            .build()
            .unwrap();

        let usage = parser.usage();

        assert!(usage.contains("    add            add files\n"));
        assert!(usage.contains("    remote(r)      manage remotes\n"));
        assert!(usage.contains("      Usage: remote\n"));
    }

    // --- Suppression Rules ---

    #[test]
    fn test_empty_string_default() {
        let parser = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["-x"]).with_default(FieldValue::scalar("")))
            .build()
            .unwrap();

        let usage = parser.usage();
        assert!(usage.contains("Default: <empty string>"));
        assert!(!usage.contains("Default: \n"));
    }

    #[test]
    fn test_whitespace_only_default_is_marked() {
        let parser = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["-x"]).with_default(FieldValue::scalar("   ")))
            .build()
            .unwrap();

        let usage = parser.usage();

        assert!(usage.ends_with("    -x\n      Default: <empty string>\n"));
        assert!(!usage.contains("Default:\n"));
    }

    #[test]
    fn test_help_default_is_never_displayed() {
        let mut parser = CommandParser::builder()
            .parameter(
                ParameterDescriptor::new(["--help"])
                    .help()
                    .with_default(FieldValue::scalar(false)),
            )
            .build()
            .unwrap();
        parser
            .parameter_mut("--help")
            .unwrap()
            .assign(FieldValue::scalar(true));

        assert!(!parser.usage().contains("Default"));
    }

    #[test]
    fn test_missing_command_description_prints_no_null() {
        let parser = CommandParser::builder()
            .command(CommandDescriptor::new("testCommand", CommandParser::default()))
            .build()
            .unwrap();

        let usage = parser.usage();

        assert!(!usage.contains("null"));
        assert!(usage.contains("    testCommand\n      Usage: testCommand\n"));
    }

    #[test]
    fn test_no_options_means_no_options_anywhere() {
        let mut parser = CommandParser::builder()
            .main_parameter(MainParameter::new(""))
            .parameter(ParameterDescriptor::new(["--internal"]).hidden())
            .build()
            .unwrap();
        parser.set_program_name("main");

        let usage = parser.usage();

        assert_eq!(usage, "Usage: main\n");
        assert!(!usage.contains("options"));
        assert!(!usage.contains("Commands:"));
    }

    #[test]
    fn test_hidden_commands_are_suppressed() {
        let parser = CommandParser::builder()
            .command(CommandDescriptor::new("debug", CommandParser::default()).hidden())
            .build()
            .unwrap();

        let usage = parser.usage();

        assert_eq!(usage, "Usage: <main class>\n");
    }

    #[test]
    fn test_program_name_is_used() {
        let mut parser = CommandParser::default();
        parser.set_program_name("main");
        assert!(parser.usage().contains("main"));
        assert_eq!(parser.program_name(), Some("main"));
    }

    // --- Width Bound ---

    #[test]
    fn test_long_descriptions_stay_within_column_size() {
        for column_size in [79, 40, 24] {
            let mut parser = CommandParser::builder()
                .main_parameter(MainParameter::new(LONG_TEXT))
                .parameter(ParameterDescriptor::new(["-l", "--long"]).with_description(LONG_TEXT))
                .parameter(
                    ParameterDescriptor::new(["-s"])
                        .with_description("short")
                        .with_default(FieldValue::scalar(LONG_TEXT)),
                )
                .command(
                    CommandDescriptor::new("long", CommandParser::default())
                        .with_description(LONG_TEXT),
                )
                .build()
                .unwrap();
            parser.set_column_size(column_size).unwrap();

            let usage = parser.usage();

            assert_width_bound(&usage, column_size);
            assert!(usage.contains("Default: "));
        }
    }

    #[test]
    fn test_narrow_column_moves_command_description_below() {
        let parser = CommandParser::builder()
            .column_size(24)
            .command(
                CommandDescriptor::new("configure", CommandParser::default())
                    .with_description("sets things up"),
            )
            .build()
            .unwrap();

        let usage = parser.usage();

        assert_width_bound(&usage, 24);
        assert!(usage.contains("    configure\n      sets things up\n      Usage: configure\n"));
    }

    #[test]
    fn test_long_command_name_is_split_without_widening_siblings() {
        // --- Setup ---
        let long_name = "x".repeat(60);
        let parser = CommandParser::builder()
            .column_size(40)
            .command(
                CommandDescriptor::new(long_name.as_str(), CommandParser::default())
                    .with_description("long one"),
            )
            .command(CommandDescriptor::new("add", CommandParser::default()).with_description("add files"))
            .build()
            .unwrap();

        // --- Execute ---
        let usage = parser.usage();

        // --- Assert ---
        assert_width_bound(&usage, 40);
        assert!(usage.contains("    add      add files\n"));
        let split_name = format!("    {}\n      {}\n      long one\n", "x".repeat(36), "x".repeat(24));
        assert!(usage.contains(&split_name));
    }

    #[test]
    fn test_column_size_is_read_on_every_render() {
        let mut parser = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["-l"]).with_description(LONG_TEXT))
            .build()
            .unwrap();

        let wide = parser.usage();
        parser.set_column_size(30).unwrap();
        let narrow = parser.usage();

        assert_ne!(wide, narrow);
        assert_width_bound(&narrow, 30);
        assert!(narrow.lines().count() > wide.lines().count());
    }

    // --- Idempotence & Sinks ---

    #[test]
    fn test_usage_should_not_change() {
        let mut parser = CommandParser::builder()
            .parameter(
                ParameterDescriptor::new(["-log", "-verbose"])
                    .with_description("Level of verbosity")
                    .with_default(FieldValue::scalar(0)),
            )
            .command(command_with_main("a", "command a", "files"))
            .build()
            .unwrap();
        parser
            .parameter_mut("-log")
            .unwrap()
            .assign(FieldValue::scalar(1));

        let first = parser.usage();
        let second = parser.usage();

        assert_eq!(first, second);
        assert!(first.contains("Default: 0"));
    }

    #[test]
    fn test_write_usage_and_append_usage() {
        let parser = CommandParser::builder()
            .parameter(int_param(["-a", "--a", "--a-parameter"], "a parameter"))
            .build()
            .unwrap();
        let formatter = parser.usage_formatter();

        let mut sink = String::new();
        formatter.write_usage(&mut sink).unwrap();
        assert_eq!(sink, parser.usage());

        let mut appended = String::from("prefix\n");
        formatter.append_usage(&mut appended);
        assert_eq!(appended, format!("prefix\n{}", parser.usage()));
    }

    #[test]
    fn test_deep_command_tree_renders_without_recursion() {
        const DEPTH: usize = 512;

        let mut parser = CommandParser::default();
        for level in (0..DEPTH).rev() {
            parser = CommandParser::builder()
                .column_size(1_000_000)
                .command(CommandDescriptor::new(format!("c{}", level), parser))
                .build()
                .unwrap();
        }

        let usage = parser.usage();

        let deepest = format!("{}Usage: c{}\n", " ".repeat(DESCRIPTION_INDENT * DEPTH), DEPTH - 1);
        assert!(usage.ends_with(&deepest));
        assert_eq!(usage.matches("Commands:").count(), DEPTH);
    }

    // --- Command Descriptions & Localization ---

    #[test]
    fn test_command_description_for_unknown_command() {
        let parser = CommandParser::default();
        let result = parser.usage_formatter().command_description("foo");
        assert_eq!(result, Err(UsageError::CommandNotFound("foo".to_string())));
    }

    #[test]
    fn test_command_description_by_name_and_alias() {
        let parser = CommandParser::builder()
            .command(
                CommandDescriptor::new("remote", CommandParser::default())
                    .with_aliases(["r"])
                    .with_description("manage remotes"),
            )
            .command(CommandDescriptor::new("bare", CommandParser::default()))
            .build()
            .unwrap();
        let formatter = parser.usage_formatter();

        assert_eq!(
            formatter.command_description("remote").unwrap().as_deref(),
            Some("manage remotes")
        );
        assert_eq!(
            formatter.command_description("r").unwrap().as_deref(),
            Some("manage remotes")
        );
        assert_eq!(formatter.command_description("bare").unwrap(), None);
    }

    #[test]
    fn test_localized_descriptions_and_missing_keys() {
        let bundle = MessageBundle::new()
            .with("param.verbose", "sé más detallado")
            .with("command.sync", "sincroniza todo");
        let parser = CommandParser::builder()
            .bundle(Arc::new(bundle))
            .parameter(
                ParameterDescriptor::new(["-v"])
                    .with_description("be verbose")
                    .with_description_key("param.verbose"),
            )
            .parameter(
                ParameterDescriptor::new(["-q"])
                    .with_description("quiet text")
                    .with_description_key("param.missing"),
            )
            .command(
                CommandDescriptor::new("sync", CommandParser::default())
                    .with_description("sync everything")
                    .with_description_key("command.sync"),
            )
            .command(
                CommandDescriptor::new("long", CommandParser::default())
                    .with_description("text without a translation")
                    .with_description_key("command.long.missing"),
            )
            .build()
            .unwrap();

        let usage = parser.usage();

        assert!(usage.contains("      sé más detallado\n"));
        assert!(usage.contains("      quiet text\n"));
        assert!(usage.contains("sincroniza todo"));
        assert!(usage.contains("text without a translation"));
        assert!(!usage.contains("param.missing"));
        assert!(!usage.contains("command.long.missing"));
        assert_eq!(
            parser
                .usage_formatter()
                .command_description("sync")
                .unwrap()
                .as_deref(),
            Some("sincroniza todo")
        );
    }

    #[test]
    fn test_sub_parsers_inherit_or_override_bundles() {
        let parent_bundle = MessageBundle::new().with("desc", "from parent");
        let child_bundle = MessageBundle::new().with("desc", "from child");

        let inheriting = CommandParser::builder()
            .parameter(ParameterDescriptor::new(["-x"]).with_description_key("desc"))
            .build()
            .unwrap();
        let overriding = CommandParser::builder()
            .bundle(Arc::new(child_bundle))
            .parameter(ParameterDescriptor::new(["-y"]).with_description_key("desc"))
            .build()
            .unwrap();
        let parser = CommandParser::builder()
            .bundle(Arc::new(parent_bundle))
            .command(CommandDescriptor::new("inherit", inheriting))
            .command(CommandDescriptor::new("override", overriding))
            .build()
            .unwrap();

        let usage = parser.usage();

        assert!(usage.contains("          -x\n            from parent\n"));
        assert!(usage.contains("          -y\n            from child\n"));
    }
}
