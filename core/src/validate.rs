//! Definition validation.
//!
//! Catches structural problems in a [`ParserDefinition`] before a parser is
//! built from it: empty prefixes, malformed or reserved option names,
//! duplicates and inconsistent choice lists.
//!
//! # Examples
//!
//! ```
//! use argspec_core::*;
//!
//! let def = ParserDefinition::new("tool")
//!     .with_option(&OptionSpec::new("verbose").with_kind(ValueKind::Bool));
//! assert!(validate_definition(&def).is_empty());
//!
//! // Invalid: name carries its own prefix
//! let bad = ParserDefinition::new("tool").with_option(&OptionSpec::new("--verbose"));
//! assert_eq!(
//!     validate_definition(&bad),
//!     vec![ValidationError::InvalidOptionName("--verbose".into())]
//! );
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::definition::{KindName, ParserDefinition};
use crate::parser::HELP_KEY;

static OPTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("option name pattern is valid")
});

/// Definition validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The option prefix is empty.
    #[error("option prefix cannot be empty")]
    EmptyPrefix,
    /// An option name is empty or whitespace-only.
    #[error("option name cannot be empty")]
    EmptyOptionName,
    /// An option name contains characters that cannot be typed as a key.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// An option uses a name the parser reserves for itself.
    #[error("option name is reserved: {0}")]
    ReservedOptionName(String),
    /// Two options share a name.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// A `choice` option lists no choices.
    #[error("option {0} has type choice but no choices")]
    EmptyChoices(String),
    /// `choices` given on an option whose type is not `choice`.
    #[error("option {0} lists choices but its type is not choice")]
    UnusedChoices(String),
}

/// Validates a parser definition, collecting every problem found.
///
/// Each option contributes at most one name error; choice consistency is
/// checked for every option.
pub fn validate_definition(definition: &ParserDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if definition.prefix.is_empty() {
        errors.push(ValidationError::EmptyPrefix);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for option in &definition.options {
        let name = option.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyOptionName);
        } else if !OPTION_NAME.is_match(name) {
            errors.push(ValidationError::InvalidOptionName(name.to_string()));
        } else if name == HELP_KEY {
            errors.push(ValidationError::ReservedOptionName(name.to_string()));
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateOption(name.to_string()));
        }

        let is_choice = option.kind == Some(KindName::Choice);
        if is_choice && option.choices.is_empty() {
            errors.push(ValidationError::EmptyChoices(name.to_string()));
        }
        if !is_choice && !option.choices.is_empty() {
            errors.push(ValidationError::UnusedChoices(name.to_string()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptionSpec, ValueKind};

    fn definition(names: &[&str]) -> ParserDefinition {
        names.iter().fold(ParserDefinition::new("t"), |def, name| {
            def.with_option(&OptionSpec::new(*name))
        })
    }

    #[test]
    fn test_validate_accepts_valid_definition() {
        let def = definition(&["arg_int", "arg-str", "v2.level", "_x"]);
        assert!(validate_definition(&def).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert_eq!(
            validate_definition(&definition(&["  "])),
            vec![ValidationError::EmptyOptionName]
        );
        assert_eq!(
            validate_definition(&definition(&["a=b"])),
            vec![ValidationError::InvalidOptionName("a=b".to_string())]
        );
        assert_eq!(
            validate_definition(&definition(&["help"])),
            vec![ValidationError::ReservedOptionName("help".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        assert_eq!(
            validate_definition(&definition(&["a", "b", "a"])),
            vec![ValidationError::DuplicateOption("a".to_string())]
        );
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut def = definition(&["a", "bad name", "help", "a"]);
        def.prefix.clear();
        def.options[0].choices = vec!["x".to_string()];
        assert_eq!(
            validate_definition(&def),
            vec![
                ValidationError::EmptyPrefix,
                ValidationError::UnusedChoices("a".to_string()),
                ValidationError::InvalidOptionName("bad name".to_string()),
                ValidationError::ReservedOptionName("help".to_string()),
                ValidationError::DuplicateOption("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut def = definition(&["a"]);
        def.prefix.clear();
        assert_eq!(validate_definition(&def), vec![ValidationError::EmptyPrefix]);
    }

    #[test]
    fn test_validate_checks_choice_consistency() {
        let def = ParserDefinition::new("t")
            .with_option(&OptionSpec::new("mode").with_kind(ValueKind::Choice(Vec::new())));
        assert_eq!(
            validate_definition(&def),
            vec![ValidationError::EmptyChoices("mode".to_string())]
        );

        let mut def = definition(&["mode"]);
        def.options[0].choices = vec!["x".to_string()];
        assert_eq!(
            validate_definition(&def),
            vec![ValidationError::UnusedChoices("mode".to_string())]
        );
    }
}
