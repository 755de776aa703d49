// src/core/values.rs

//! Display strings for default values and permitted-value sets.

use crate::models::{FieldValue, ParameterDescriptor};

/// Renders a value in its display form, or `None` when it is unset.
///
/// An empty or whitespace-only string renders as `<empty string>`: a bare
/// blank would be indistinguishable from "no default".
pub fn render_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Unset => None,
        FieldValue::Scalar(text) if text.trim().is_empty() => {
            Some(t!("usage.value.empty_string").to_string())
        }
        FieldValue::Scalar(text) => Some(text.clone()),
        FieldValue::List(items) => Some(format!("[{}]", items.join(", "))),
    }
}

/// The default value as shown to users, or `None` if no `Default:` line applies.
///
/// Help flags never show a default, whatever their stored value.
pub fn render_default(param: &ParameterDescriptor) -> Option<String> {
    if param.help {
        return None;
    }
    let rendered = render_value(&param.default_value)?;
    if param.password {
        return Some(t!("usage.value.password_mask").to_string());
    }
    Some(rendered)
}

/// `[A, B, C]` for a permitted-value set, `None` when the type is not enum-like.
///
/// An empty set still renders (`[]`): it means the type has no constants.
pub fn render_choices(values: Option<&[String]>) -> Option<String> {
    values.map(|values| format!("[{}]", values.join(", ")))
}

/// Which label a choice list carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoicesLabel {
    /// `Options: [...]`, standing in for a missing description.
    Options,
    /// `Possible Values: [...]`, listed after a real description.
    PossibleValues,
}

impl ChoicesLabel {
    /// Parameters with a description list their values as `Possible Values`;
    /// without one the list takes the description's place as `Options`.
    pub fn for_description(has_description: bool) -> Self {
        if has_description {
            Self::PossibleValues
        } else {
            Self::Options
        }
    }

    /// The localized label, without the trailing value list.
    pub fn text(self) -> &'static str {
        match self {
            Self::Options => t!("usage.value.options"),
            Self::PossibleValues => t!("usage.value.possible"),
        }
    }
}

/// The full `Default: …` line, if any.
pub fn default_line(param: &ParameterDescriptor) -> Option<String> {
    render_default(param).map(|value| format!("{} {}", t!("usage.value.default"), value))
}

/// The full labelled choice line, if the parameter is enum-like.
pub fn choices_line(param: &ParameterDescriptor, has_description: bool) -> Option<String> {
    let choices = render_choices(param.permitted_values.as_deref())?;
    let label = ChoicesLabel::for_description(has_description);
    Some(format!("{} {}", label.text(), choices))
}

/// `Syntax: -Dkey=value` for dynamic parameters.
pub fn syntax_line(param: &ParameterDescriptor) -> Option<String> {
    param.dynamic.then(|| {
        format!(
            "{} {}key{}value",
            t!("usage.value.syntax"),
            param.primary_name(),
            param.assignment
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_value_variants() {
        assert_eq!(render_value(&FieldValue::Unset), None);
        assert_eq!(render_value(&FieldValue::scalar(0)).as_deref(), Some("0"));
        assert_eq!(
            render_value(&FieldValue::scalar("")).as_deref(),
            Some("<empty string>")
        );
        assert_eq!(
            render_value(&FieldValue::scalar(" \t ")).as_deref(),
            Some("<empty string>")
        );
        assert_eq!(
            render_value(&FieldValue::list(["a", "b"])).as_deref(),
            Some("[a, b]")
        );
        assert_eq!(
            render_value(&FieldValue::list(Vec::<String>::new())).as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_help_flag_hides_default() {
        let help = ParameterDescriptor::new(["--help"])
            .help()
            .with_default(FieldValue::scalar(false));
        assert_eq!(render_default(&help), None);
        assert_eq!(default_line(&help), None);

        let assigned_help = ParameterDescriptor::new(["--help"])
            .help()
            .with_default(FieldValue::scalar(true));
        assert_eq!(default_line(&assigned_help), None);
    }

    #[test]
    fn test_password_default_is_masked() {
        let param = ParameterDescriptor::new(["--token"])
            .password()
            .with_default(FieldValue::scalar("s3cret"));
        assert_eq!(default_line(&param).as_deref(), Some("Default: ********"));

        let unset = ParameterDescriptor::new(["--token"]).password();
        assert_eq!(default_line(&unset), None);
    }

    #[test]
    fn test_empty_string_default_line() {
        let param = ParameterDescriptor::new(["-x"]).with_default(FieldValue::scalar(""));
        assert_eq!(
            default_line(&param).as_deref(),
            Some("Default: <empty string>")
        );
    }

    #[test]
    fn test_render_choices_absent_and_empty() {
        assert_eq!(render_choices(None), None);
        let empty: Vec<String> = Vec::new();
        assert_eq!(render_choices(Some(empty.as_slice())).as_deref(), Some("[]"));
        let values: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
        assert_eq!(
            render_choices(Some(values.as_slice())).as_deref(),
            Some("[A, B, C, D]")
        );
    }

    #[test]
    fn test_choice_label_split() {
        let param = ParameterDescriptor::new(["--e"]).with_permitted_values(["A", "B"]);
        assert_eq!(choices_line(&param, false).as_deref(), Some("Options: [A, B]"));
        assert_eq!(
            choices_line(&param, true).as_deref(),
            Some("Possible Values: [A, B]")
        );

        let plain = ParameterDescriptor::new(["--n"]);
        assert_eq!(choices_line(&plain, true), None);
    }

    #[test]
    fn test_syntax_line_for_dynamic_parameters() {
        let dynamic = ParameterDescriptor::new(["-D"]).dynamic('=');
        assert_eq!(syntax_line(&dynamic).as_deref(), Some("Syntax: -Dkey=value"));

        let at_sign = ParameterDescriptor::new(["-A"]).dynamic('@');
        assert_eq!(syntax_line(&at_sign).as_deref(), Some("Syntax: -Akey@value"));

        assert_eq!(syntax_line(&ParameterDescriptor::new(["-x"])), None);
    }
}
