//! Serializable parser definitions.
//!
//! A [`ParserDefinition`] describes a whole parser: program name, prefix and
//! the option list. It can be kept in a YAML or JSON file and turned into a
//! ready [`Parser`] with [`ParserDefinition::into_parser`].
//!
//! # Example YAML
//!
//! ```yaml
//! program: convert
//! prefix: "--"
//! options:
//!   - name: input
//!     type: str
//!     required: true
//!     description: file to read
//!   - name: size
//!     type: int
//!     num_args: 2
//!   - name: format
//!     type: choice
//!     choices: [json, yaml]
//!   - name: verbose
//!     type: bool
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_PREFIX, DEFAULT_PROGRAM, ParserConfig};
use crate::error::ArgError;
use crate::registry::Registry;
use crate::types::DEFAULT_DESCRIPTION;
use crate::validate::{ValidationError, validate_definition};
use crate::{OptionSpec, Parser, ValueKind};

/// Errors raised while loading a definition or building a parser from it.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The definition failed validation.
    #[error("invalid definition: {0}")]
    Invalid(#[from] ValidationError),

    /// Registry or parser construction failed.
    #[error(transparent)]
    Arg(#[from] ArgError),
}

/// Kind names accepted in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindName {
    /// [`ValueKind::Bool`].
    #[serde(alias = "boolean")]
    Bool,
    /// [`ValueKind::Int`].
    #[serde(alias = "integer")]
    Int,
    /// [`ValueKind::Float`].
    Float,
    /// [`ValueKind::Str`].
    #[serde(alias = "string")]
    Str,
    /// [`ValueKind::Literal`].
    Literal,
    /// [`ValueKind::Choice`], with values from `choices`.
    Choice,
}

/// One option entry of a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Option name, without prefix.
    pub name: String,
    /// Whether the option must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Coercion kind; omitted keeps raw strings.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindName>,
    /// Allowed values for `type: choice`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Exact number of values, if fixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_args: Option<usize>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionDefinition {
    /// Converts the entry into an [`OptionSpec`].
    pub fn to_spec(&self) -> OptionSpec {
        let kind = self.kind.map(|name| match name {
            KindName::Bool => ValueKind::Bool,
            KindName::Int => ValueKind::Int,
            KindName::Float => ValueKind::Float,
            KindName::Str => ValueKind::Str,
            KindName::Literal => ValueKind::Literal,
            KindName::Choice => ValueKind::Choice(self.choices.clone()),
        });
        OptionSpec {
            name: self.name.clone(),
            required: self.required,
            kind,
            num_args: self.num_args,
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

impl From<&OptionSpec> for OptionDefinition {
    fn from(spec: &OptionSpec) -> Self {
        let (kind, choices) = match &spec.kind {
            None => (None, Vec::new()),
            Some(ValueKind::Bool) => (Some(KindName::Bool), Vec::new()),
            Some(ValueKind::Int) => (Some(KindName::Int), Vec::new()),
            Some(ValueKind::Float) => (Some(KindName::Float), Vec::new()),
            Some(ValueKind::Str) => (Some(KindName::Str), Vec::new()),
            Some(ValueKind::Literal) => (Some(KindName::Literal), Vec::new()),
            Some(ValueKind::Choice(values)) => (Some(KindName::Choice), values.clone()),
        };
        Self {
            name: spec.name.clone(),
            required: spec.required,
            kind,
            choices,
            num_args: spec.num_args,
            description: Some(spec.description.clone()),
        }
    }
}

/// Complete, serializable description of a parser.
///
/// # Examples
///
/// ```
/// use argspec_core::ParserDefinition;
///
/// let def = ParserDefinition::from_yaml_str(
///     "program: demo\noptions:\n  - name: n\n    type: int\n    required: true\n",
/// )
/// .unwrap();
/// let parser = def.into_parser().unwrap();
///
/// let args = parser.parse(&["--n", "5"]).unwrap().into_args().unwrap();
/// assert_eq!(args.get_int("n"), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserDefinition {
    /// Program name for the usage header.
    #[serde(default = "default_program")]
    pub program: String,
    /// Option prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Declared options, in registration order.
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl ParserDefinition {
    /// Creates an empty definition for `program` with the default prefix.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix: default_prefix(),
            options: Vec::new(),
        }
    }

    /// Adds an option entry.
    pub fn with_option(mut self, spec: &OptionSpec) -> Self {
        self.options.push(OptionDefinition::from(spec));
        self
    }

    /// Loads a definition file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, everything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Io`] if the file cannot be read, or
    /// [`DefinitionError::Json`]/[`DefinitionError::Yaml`] on parse failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DefinitionError> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let definition = if is_yaml {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(definition)
    }

    /// Parses a YAML document.
    pub fn from_yaml_str(raw: &str) -> Result<Self, DefinitionError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The parser configuration carried by this definition.
    pub fn config(&self) -> ParserConfig {
        ParserConfig::new(self.program.clone()).with_prefix(self.prefix.clone())
    }

    /// Builds the registry, registering options in file order.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateOption`] on a repeated name.
    pub fn to_registry(&self) -> Result<Registry, ArgError> {
        Registry::from_specs(self.options.iter().map(OptionDefinition::to_spec))
    }

    /// Validates the definition and builds a parser from it.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Invalid`] with the first validation problem,
    /// or [`DefinitionError::Arg`] if parser construction fails.
    pub fn into_parser(self) -> Result<Parser, DefinitionError> {
        if let Some(err) = validate_definition(&self).into_iter().next() {
            return Err(err.into());
        }
        let registry = self.to_registry()?;
        Ok(Parser::with_config(registry, self.config())?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::Value;

    const YAML: &str = r#"
program: convert
options:
  - name: input
    type: string
    required: true
    description: file to read
  - name: size
    type: int
    num_args: 2
  - name: format
    type: choice
    choices: [json, yaml]
  - name: verbose
    type: bool
  - name: extra
"#;

    #[test]
    fn test_yaml_definition_round_trips_into_specs() {
        let def = ParserDefinition::from_yaml_str(YAML).unwrap();
        assert_eq!(def.program, "convert");
        assert_eq!(def.prefix, "--");

        let registry = def.to_registry().unwrap();
        let names: Vec<&str> = registry.all_specs().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["input", "size", "format", "verbose", "extra"]);

        let input = registry.lookup("input").unwrap();
        assert_eq!(input.kind, Some(ValueKind::Str));
        assert!(input.required);
        assert_eq!(input.description, "file to read");

        let format = registry.lookup("format").unwrap();
        assert_eq!(
            format.kind,
            Some(ValueKind::Choice(vec!["json".into(), "yaml".into()]))
        );

        let extra = registry.lookup("extra").unwrap();
        assert_eq!(extra.kind, None);
        assert_eq!(extra.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_into_parser_parses_tokens() {
        let parser = ParserDefinition::from_yaml_str(YAML)
            .unwrap()
            .into_parser()
            .unwrap();
        let args = parser
            .parse(&["--input=a.txt", "--size", "3", "4", "--format", "yaml", "--verbose"])
            .unwrap()
            .into_args()
            .unwrap();

        assert_eq!(args.get_str("input"), Some("a.txt"));
        assert_eq!(
            args.get("size"),
            Some(&Value::List(vec![Value::Int(3), Value::Int(4)]))
        );
        assert_eq!(args.get_str("format"), Some("yaml"));
        assert_eq!(args.get_bool("verbose"), Some(true));
    }

    #[test]
    fn test_into_parser_rejects_invalid_definition() {
        let def = ParserDefinition::from_json_str(
            r#"{"options": [{"name": "a"}, {"name": "a"}]}"#,
        )
        .unwrap();
        let err = def.into_parser().unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Invalid(ValidationError::DuplicateOption(ref name)) if name == "a"
        ));
    }

    #[test]
    fn test_unknown_type_is_a_yaml_error() {
        let err = ParserDefinition::from_yaml_str("options:\n  - name: a\n    type: complex\n")
            .unwrap_err();
        assert!(matches!(err, DefinitionError::Yaml(_)));
    }

    #[test]
    fn test_load_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("def.yml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(YAML.as_bytes())
            .unwrap();
        assert_eq!(ParserDefinition::load(&yaml_path).unwrap().options.len(), 5);

        let def = ParserDefinition::new("tool").with_option(
            &OptionSpec::new("n").with_kind(ValueKind::Int).with_num_args(1),
        );
        let json_path = dir.path().join("def.json");
        std::fs::write(&json_path, serde_json::to_string(&def).unwrap()).unwrap();
        assert_eq!(ParserDefinition::load(&json_path).unwrap(), def);

        let missing = ParserDefinition::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, DefinitionError::Io(_)));
    }

    #[test]
    fn test_spec_to_definition_keeps_choices() {
        let spec = OptionSpec::new("mode")
            .with_kind(ValueKind::Choice(vec!["a".into(), "b".into()]))
            .required();
        let entry = OptionDefinition::from(&spec);
        assert_eq!(entry.kind, Some(KindName::Choice));
        assert_eq!(entry.to_spec(), spec);
    }
}
