//! Parse results.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::Value;

/// Outcome of a successful [`Parser::parse`](crate::Parser::parse) call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A `help` key was present; carries the rendered usage text.
    Help(String),
    /// The validated, coerced option values.
    Parsed(ParsedArgs),
}

impl ParseOutcome {
    /// Returns the parsed arguments, or `None` for a help outcome.
    pub fn into_args(self) -> Option<ParsedArgs> {
        match self {
            Self::Parsed(args) => Some(args),
            Self::Help(_) => None,
        }
    }

    /// Returns the usage text if help was requested.
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Self::Help(text) => Some(text),
            Self::Parsed(_) => None,
        }
    }
}

/// Mapping from option name to coerced value.
///
/// Holds only the options that were supplied, in registry order. Serializes
/// as a map.
///
/// # Examples
///
/// ```
/// use argspec_core::{OptionSpec, Parser, Registry, Value, ValueKind};
///
/// let mut registry = Registry::new();
/// registry.register(OptionSpec::new("n").with_kind(ValueKind::Int)).unwrap();
/// registry.register(OptionSpec::new("dry-run").with_kind(ValueKind::Bool)).unwrap();
///
/// let args = Parser::new(registry)
///     .parse(&["--n", "1", "2", "--dry-run"])
///     .unwrap()
///     .into_args()
///     .unwrap();
///
/// assert_eq!(args.get("n"), Some(&Value::List(vec![Value::Int(1), Value::Int(2)])));
/// assert_eq!(args.get_bool("dry-run"), Some(true));
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    entries: Vec<(String, Value)>,
}

impl ParsedArgs {
    pub(crate) fn insert(&mut self, name: String, value: Value) {
        self.entries.push((name, value));
    }

    /// Returns the value for `name`, if supplied.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `name` was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Shorthand for `get(name)` followed by [`Value::as_bool`].
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Shorthand for `get(name)` followed by [`Value::as_int`].
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Shorthand for `get(name)` followed by [`Value::as_float`].
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Shorthand for `get(name)` followed by [`Value::as_str`].
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Iterates over `(name, value)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Option names present in the result.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Number of supplied options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no option was supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
