//! Option spec and value type definitions.
//!
//! An [`OptionSpec`] declares one accepted option. Its optional
//! [`ValueKind`] selects how raw tokens are coerced into [`Value`]s.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::literal;

/// Description used when an option does not declare one.
pub const DEFAULT_DESCRIPTION: &str = "missing description";

/// Coercion kind for an option's values.
///
/// The set is closed: each kind has one conversion routine,
/// [`ValueKind::coerce`], which returns a value or a reason string.
///
/// # Examples
///
/// ```
/// use argspec_core::{Value, ValueKind};
///
/// assert_eq!(ValueKind::Int.coerce("42"), Ok(Value::Int(42)));
/// assert!(ValueKind::Int.coerce("4.2").is_err());
/// assert_eq!(ValueKind::Float.coerce("123"), Ok(Value::Float(123.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Flag semantics: bare presence or any value except `false` is `true`.
    Bool,
    /// Signed 64-bit integer.
    ///
    /// Values outside the `i64` range fail coercion; there is no
    /// arbitrary-precision fallback.
    Int,
    /// 64-bit float.
    Float,
    /// Token kept as-is.
    Str,
    /// Literal data expression (numbers, strings, bools, lists, maps).
    Literal,
    /// One of a fixed set of strings.
    Choice(Vec<String>),
}

impl ValueKind {
    /// Converts a single raw token into a [`Value`].
    ///
    /// For [`ValueKind::Bool`] this applies to one token; the engine only
    /// ever looks at the first token of a boolean option.
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Bool => Ok(Value::Bool(!raw.eq_ignore_ascii_case("false"))),
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|err| format!("expected an integer ({err})")),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|err| format!("expected a number ({err})")),
            Self::Str => Ok(Value::Str(raw.to_string())),
            Self::Literal => literal::parse_literal(raw).map_err(|err| err.to_string()),
            Self::Choice(choices) => {
                if choices.iter().any(|c| c == raw) {
                    Ok(Value::Str(raw.to_string()))
                } else {
                    Err(format!("expected one of: {}", choices.join(", ")))
                }
            }
        }
    }

    /// Short lowercase name, as used in definition files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Literal => "literal",
            Self::Choice(_) => "choice",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A coerced option value.
///
/// Serializes to the natural JSON/YAML shape: scalars as scalars, lists as
/// sequences and maps as maps with their insertion order kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(String),
    /// Literal `None` / `null`.
    None,
    /// Ordered sequence.
    List(Vec<Value>),
    /// Insertion-ordered map.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns the boolean if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Float`] or [`Value::Int`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a key if this is a [`Value::Map`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::None => serializer.serialize_unit(),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Declaration of one accepted option.
///
/// Construct with [`OptionSpec::new`] and chain the builder methods.
///
/// # Examples
///
/// ```
/// use argspec_core::{OptionSpec, ValueKind};
///
/// let spec = OptionSpec::new("port")
///     .with_kind(ValueKind::Int)
///     .required()
///     .with_description("Port to listen on");
/// assert!(spec.required);
/// assert_eq!(spec.kind, Some(ValueKind::Int));
/// assert_eq!(spec.num_args, None);
///
/// let flag = OptionSpec::new("verbose");
/// assert!(!flag.required);
/// assert_eq!(flag.description, "missing description");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Option name, without prefix.
    pub name: String,
    /// Whether parsing fails when the option is absent.
    pub required: bool,
    /// Coercion kind; `None` keeps raw strings.
    pub kind: Option<ValueKind>,
    /// Exact number of values the option must receive, if fixed.
    pub num_args: Option<usize>,
    /// Help text.
    pub description: String,
}

impl OptionSpec {
    /// Creates an optional, untyped option with the default description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind: None,
            num_args: None,
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the coercion kind.
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Fixes the number of values.
    pub fn with_num_args(mut self, num_args: usize) -> Self {
        self.num_args = Some(num_args);
        self
    }

    /// Sets the help text.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Returns `true` when the option is a boolean flag.
    pub fn is_flag(&self) -> bool {
        self.kind == Some(ValueKind::Bool)
    }
}
