//! Declarative command-line option parsing.
//!
//! This crate turns a declared set of options and a raw token sequence into a
//! validated, type-coerced mapping:
//!
//! - [`OptionSpec`]: one accepted option (name, required flag, [`ValueKind`],
//!   fixed arity, description).
//! - [`Registry`]: the insertion-ordered, duplicate-free set of specs.
//! - [`Parser`]: tokenizes, accumulates, validates and coerces; returns a
//!   [`ParseOutcome`] holding either [`ParsedArgs`] or the usage text when
//!   `--help` is present.
//! - [`render_usage`]: the usage renderer behind `--help`.
//! - [`ParserDefinition`]: YAML/JSON description of a parser, checked by
//!   [`validate_definition`].
//!
//! Accepted token forms:
//!
//! | Input | Result |
//! |---|---|
//! | `--option` | present with no values (`true` for [`ValueKind::Bool`]) |
//! | `--option=value` / `--option value` | one value |
//! | `--option v1 v2` / `--option=v1 v2` | ordered list of values |
//! | `--help` anywhere | usage text instead of values |
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(OptionSpec::new("arg_int").with_kind(ValueKind::Int).with_num_args(2).required())
//!     .unwrap();
//! registry
//!     .register(OptionSpec::new("arg_eval").with_kind(ValueKind::Literal))
//!     .unwrap();
//! registry
//!     .register(OptionSpec::new("arg_bool").with_kind(ValueKind::Bool))
//!     .unwrap();
//!
//! let parser = Parser::new(registry);
//! let args = parser
//!     .parse(&["--arg_int", "1", "2", "--arg_eval", r#"{"name":"Alex", "age":18}"#, "--arg_bool"])
//!     .unwrap()
//!     .into_args()
//!     .unwrap();
//!
//! assert_eq!(args.get("arg_int"), Some(&Value::List(vec![Value::Int(1), Value::Int(2)])));
//! assert_eq!(args.get("arg_eval").and_then(|v| v.get("age")), Some(&Value::Int(18)));
//! assert_eq!(args.get_bool("arg_bool"), Some(true));
//!
//! assert!(matches!(
//!     parser.parse(&["--arg_int", "1"]),
//!     Err(ArgError::ArityMismatch { expected: 2, actual: 1, .. })
//! ));
//! ```

mod args;
mod config;
mod definition;
mod error;
mod literal;
mod parser;
mod registry;
mod types;
mod usage;
mod validate;

pub use args::{ParseOutcome, ParsedArgs};
pub use config::{DEFAULT_PREFIX, DEFAULT_PROGRAM, ParserConfig};
pub use definition::{DefinitionError, KindName, OptionDefinition, ParserDefinition};
pub use error::{ArgError, Result};
pub use literal::{LiteralError, parse_literal};
pub use parser::{HELP_KEY, Parser};
pub use registry::Registry;
pub use types::*;
pub use usage::{option_usage, render_usage};
pub use validate::{ValidationError, validate_definition};
