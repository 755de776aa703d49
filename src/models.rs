// src/models.rs

use crate::constants::DEFAULT_ASSIGNMENT;
use crate::core::parser::CommandParser;

// --- VALUE MODEL ---

/// A default or current value as produced by the conversion layer.
///
/// Values are stringified once, when the descriptor is built, so rendering
/// never has to inspect the original type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// The field has no value (e.g. an unset `Option` or object reference).
    #[default]
    Unset,
    /// A single value in its natural string form. May be empty.
    Scalar(String),
    /// A collection value, kept in insertion order.
    List(Vec<String>),
}

impl FieldValue {
    /// Builds a scalar from anything with a natural string form.
    pub fn scalar(value: impl ToString) -> Self {
        Self::Scalar(value.to_string())
    }

    /// Builds a list value from its items.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

// --- DESCRIPTOR MODEL ---

/// Read-only description of one named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Every name the option answers to, in declaration order (e.g. `-a`, `--all`).
    pub names: Vec<String>,
    /// Raw description text, used when no localized text is available.
    pub description: String,
    /// Key looked up in the message bundle to localize `description`.
    pub description_key: Option<String>,
    /// Display hint shown after the names, e.g. `<filename>`.
    pub placeholder: Option<String>,
    pub required: bool,
    /// Help flags never show their default value.
    pub help: bool,
    pub hidden: bool,
    /// Password defaults are masked.
    pub password: bool,
    /// Dynamic parameters collect repeated `key=value` occurrences.
    pub dynamic: bool,
    /// Separator between key and value of a dynamic parameter.
    pub assignment: char,
    /// Explicit position; ordered options come before alphabetical ones.
    pub order: Option<u32>,
    pub default_value: FieldValue,
    /// Value assigned by the parsing layer. Never rendered.
    pub current_value: FieldValue,
    /// `Some` for enum-like types, listing their constants (possibly none).
    pub permitted_values: Option<Vec<String>>,
}

impl Default for ParameterDescriptor {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            description: String::new(),
            description_key: None,
            placeholder: None,
            required: false,
            help: false,
            hidden: false,
            password: false,
            dynamic: false,
            assignment: DEFAULT_ASSIGNMENT,
            order: None,
            default_value: FieldValue::Unset,
            current_value: FieldValue::Unset,
            permitted_values: None,
        }
    }
}

impl ParameterDescriptor {
    /// An option answering to `names`, with every other field at its default.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Sets the raw description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the bundle key used to localize the description.
    pub fn with_description_key(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }

    /// Sets the value hint printed after the names.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets the default value, already in display form.
    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = value;
        self
    }

    /// Marks the option as enum-like with these constants.
    pub fn with_permitted_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permitted_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Gives the option an explicit position in the options section.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Marks the option as required (`* ` in front of its names).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the option as a help flag.
    pub fn help(mut self) -> Self {
        self.help = true;
        self
    }

    /// Leaves the option out of the usage text.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Masks the default value.
    pub fn password(mut self) -> Self {
        self.password = true;
        self
    }

    /// Marks the option as dynamic, using `assignment` between key and value.
    pub fn dynamic(mut self, assignment: char) -> Self {
        self.dynamic = true;
        self.assignment = assignment;
        self
    }

    /// The name used for ordering and for the dynamic syntax line.
    pub fn primary_name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// Names joined the way they appear in the usage text: `-a, --all`.
    pub fn display_names(&self) -> String {
        self.names.join(", ")
    }

    /// Records a value assigned while parsing. Does not touch the default.
    pub fn assign(&mut self, value: FieldValue) {
        self.current_value = value;
    }
}

/// The unnamed positional parameter that collects leftover arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainParameter {
    /// Raw description appended to the banner.
    pub description: String,
    /// Bundle key used to localize `description`.
    pub description_key: Option<String>,
}

impl MainParameter {
    /// A main parameter with a raw description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            description_key: None,
        }
    }

    /// Sets the bundle key used to localize the description.
    pub fn with_description_key(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }
}

/// A named sub-command and the parser that owns its own options and commands.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub name: String,
    /// Alternative names, shown as `name(a,b)`.
    pub aliases: Vec<String>,
    pub description: String,
    pub description_key: Option<String>,
    pub hidden: bool,
    /// Options and sub-commands of this command.
    pub parser: CommandParser,
}

impl CommandDescriptor {
    /// A visible command without aliases or description.
    pub fn new(name: impl Into<String>, parser: CommandParser) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            description_key: None,
            hidden: false,
            parser,
        }
    }

    /// Sets the raw description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the bundle key used to localize the description.
    pub fn with_description_key(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }

    /// Replaces the aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Leaves the command out of the usage text.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// `name`, or `name(alias1,alias2)` when aliases are declared.
    pub fn display_name(&self) -> String {
        if self.aliases.is_empty() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, self.aliases.join(","))
        }
    }

    /// Whether `name` is this command's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}
