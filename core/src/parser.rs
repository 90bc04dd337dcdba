//! The parser engine.
//!
//! Each [`Parser::parse`] call runs these stages in order, stopping at the
//! first error:
//!
//! 1. help check over the whole token sequence;
//! 2. tokenize and accumulate values per key;
//! 3. reject keys missing from the registry;
//! 4. per declared option, in registry order: arity and coercion when
//!    supplied, required check when not.
//!
//! The engine keeps no state between calls.
//!
//! # Example
//!
//! ```
//! use argspec_core::*;
//!
//! let mut registry = Registry::new();
//! registry.register(OptionSpec::new("arg").with_kind(ValueKind::Int).required()).unwrap();
//! let parser = Parser::new(registry);
//!
//! let a = parser.parse(&["--arg=123"]).unwrap();
//! let b = parser.parse(&["--arg", "123"]).unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.into_args().unwrap().get_int("arg"), Some(123));
//!
//! let err = parser.parse(&["--nope"]).unwrap_err();
//! assert_eq!(err, ArgError::UnknownOption("nope".into()));
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::args::{ParseOutcome, ParsedArgs};
use crate::config::ParserConfig;
use crate::error::{ArgError, Result};
use crate::registry::Registry;
use crate::usage::render_usage;
use crate::{OptionSpec, Value, ValueKind};

/// Key that short-circuits parsing into usage rendering.
pub const HELP_KEY: &str = "help";

/// Parses token sequences against a [`Registry`].
///
/// `parse` takes `&self`, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct Parser {
    registry: Registry,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default [`ParserConfig`].
    ///
    /// A registered option named [`HELP_KEY`] is shadowed by the help check
    /// and never reaches the result.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::InvalidPrefix`] if `config.prefix` is empty.
    pub fn with_config(registry: Registry, config: ParserConfig) -> Result<Self> {
        if config.prefix.is_empty() {
            return Err(ArgError::InvalidPrefix);
        }
        Ok(Self { registry, config })
    }

    /// The declared options.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Renders the usage text for the declared options.
    pub fn usage(&self) -> String {
        render_usage(&self.registry, &self.config)
    }

    /// Parses `tokens` into a validated result.
    ///
    /// Returns [`ParseOutcome::Help`] if any option token has the key `help`,
    /// without inspecting the other tokens further.
    ///
    /// # Errors
    ///
    /// The first of [`ArgError::MalformedArgument`],
    /// [`ArgError::UnknownOption`], [`ArgError::ArityMismatch`],
    /// [`ArgError::CoercionError`] or [`ArgError::MissingRequiredOption`]
    /// encountered.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome> {
        if self.wants_help(tokens) {
            debug!(program = %self.config.program, "Help requested, skipping validation");
            return Ok(ParseOutcome::Help(self.usage()));
        }

        let raw = self.accumulate(tokens)?;
        debug!(
            tokens = tokens.len(),
            options = raw.len(),
            "Accumulated option values"
        );

        self.validate(raw).map(ParseOutcome::Parsed)
    }

    fn strip_prefix<'t>(&self, token: &'t str) -> Option<&'t str> {
        token.strip_prefix(self.config.prefix.as_str())
    }

    fn wants_help<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        tokens.iter().any(|token| {
            self.strip_prefix(token.as_ref())
                .map(|rest| rest.split('=').next() == Some(HELP_KEY))
                .unwrap_or(false)
        })
    }

    fn accumulate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<RawArgs> {
        let mut raw = RawArgs::default();
        let mut current: Option<usize> = None;

        for token in tokens {
            let token = token.as_ref();
            if let Some(rest) = self.strip_prefix(token) {
                let slot = match rest.split_once('=') {
                    Some((key, value)) => {
                        if value.contains('=') {
                            return Err(ArgError::MalformedArgument(token.to_string()));
                        }
                        let slot = raw.slot(key);
                        if !value.is_empty() {
                            raw.push(slot, value);
                        }
                        slot
                    }
                    None => raw.slot(rest),
                };
                current = Some(slot);
            } else if let Some(slot) = current {
                raw.push(slot, token);
            } else {
                trace!(token, "Dropping value that precedes any option");
            }
        }

        Ok(raw)
    }

    fn validate(&self, raw: RawArgs) -> Result<ParsedArgs> {
        if let Some((key, _)) = raw
            .entries
            .iter()
            .find(|(key, _)| !self.registry.contains(key))
        {
            debug!(option = %key, "Rejecting unknown option");
            return Err(ArgError::UnknownOption(key.clone()));
        }

        let mut parsed = ParsedArgs::default();
        for spec in self.registry.all_specs() {
            match raw.get(&spec.name) {
                Some(values) => {
                    let value = coerce_option(spec, values)?;
                    parsed.insert(spec.name.clone(), value);
                }
                None if spec.required => {
                    debug!(option = %spec.name, "Required option missing");
                    return Err(ArgError::MissingRequiredOption(spec.name.clone()));
                }
                None => {}
            }
        }

        Ok(parsed)
    }
}

/// Checks arity, then converts the accumulated tokens of one option.
fn coerce_option(spec: &OptionSpec, values: &[String]) -> Result<Value> {
    if let Some(expected) = spec.num_args
        && values.len() != expected
    {
        return Err(ArgError::ArityMismatch {
            option: spec.name.clone(),
            expected,
            actual: values.len(),
        });
    }

    let kind = match &spec.kind {
        Some(ValueKind::Bool) => {
            let flag = values
                .first()
                .is_none_or(|first| !first.eq_ignore_ascii_case("false"));
            return Ok(Value::Bool(flag));
        }
        Some(kind) => kind,
        None => &ValueKind::Str,
    };

    let mut coerced = values
        .iter()
        .map(|raw| {
            kind.coerce(raw).map_err(|reason| ArgError::CoercionError {
                option: spec.name.clone(),
                value: raw.clone(),
                reason,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if coerced.len() == 1 {
        Ok(coerced.remove(0))
    } else {
        Ok(Value::List(coerced))
    }
}

/// Per-parse accumulator: keys in first-seen order with their raw tokens.
#[derive(Debug, Default)]
struct RawArgs {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RawArgs {
    /// Returns the slot for `key`, creating an empty one if needed.
    fn slot(&mut self, key: &str) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        let slot = self.entries.len();
        self.entries.push((key.to_string(), Vec::new()));
        self.index.insert(key.to_string(), slot);
        slot
    }

    fn push(&mut self, slot: usize, value: &str) {
        self.entries[slot].1.push(value.to_string());
    }

    fn get(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(specs: Vec<OptionSpec>) -> Parser {
        Parser::new(Registry::from_specs(specs).unwrap())
    }

    fn parse_ok(parser: &Parser, tokens: &[&str]) -> ParsedArgs {
        parser
            .parse(tokens)
            .expect("parse failed")
            .into_args()
            .expect("unexpected help outcome")
    }

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn test_accumulate_keeps_bare_keys_and_drops_leading_values() {
        let p = parser(vec![]);
        let raw = p
            .accumulate(&["orphan", "--a", "--b=1", "2", "--a", "x", "--c="])
            .unwrap();

        assert_eq!(raw.len(), 3);
        assert_eq!(raw.get("a"), Some(&["x".to_string()][..]));
        assert_eq!(raw.get("b"), Some(&["1".to_string(), "2".to_string()][..]));
        assert_eq!(raw.get("c"), Some(&[][..]));
        assert_eq!(raw.get("orphan"), None);
    }

    #[test]
    fn test_double_equals_is_malformed() {
        let p = parser(vec![OptionSpec::new("arg")]);
        let err = p.parse(&["--arg=a=b"]).unwrap_err();
        assert_eq!(err, ArgError::MalformedArgument("--arg=a=b".to_string()));
    }

    #[test]
    fn test_equals_and_space_forms_agree() {
        let p = parser(vec![
            OptionSpec::new("arg").with_kind(ValueKind::Int).required(),
        ]);
        let expected = parse_ok(&p, &["--arg=123"]);
        assert_eq!(expected.get("arg"), Some(&Value::Int(123)));
        assert_eq!(parse_ok(&p, &["--arg", "123"]), expected);
    }

    #[test]
    fn test_multi_value_options_keep_order() {
        let p = parser(vec![
            OptionSpec::new("arg1").with_kind(ValueKind::Int),
            OptionSpec::new("arg2").with_kind(ValueKind::Int),
        ]);

        for tokens in [
            &["--arg1", "1", "2", "3", "4", "--arg2", "11", "22"][..],
            &["--arg1=1", "2", "3", "4", "--arg2=11", "22"][..],
        ] {
            let args = parse_ok(&p, tokens);
            assert_eq!(args.get("arg1"), Some(&ints(&[1, 2, 3, 4])));
            assert_eq!(args.get("arg2"), Some(&ints(&[11, 22])));
        }
    }

    #[test]
    fn test_repeated_key_appends() {
        let p = parser(vec![OptionSpec::new("x").with_kind(ValueKind::Int)]);
        let args = parse_ok(&p, &["--x", "1", "--x=2"]);
        assert_eq!(args.get("x"), Some(&ints(&[1, 2])));
    }

    #[test]
    fn test_bool_flag_semantics() {
        let p = parser(vec![
            OptionSpec::new("flag").with_kind(ValueKind::Bool).required(),
        ]);
        assert_eq!(parse_ok(&p, &["--flag"]).get_bool("flag"), Some(true));
        assert_eq!(parse_ok(&p, &["--flag=True"]).get_bool("flag"), Some(true));
        assert_eq!(parse_ok(&p, &["--flag=False"]).get_bool("flag"), Some(false));
        assert_eq!(parse_ok(&p, &["--flag=false"]).get_bool("flag"), Some(false));
        assert_eq!(parse_ok(&p, &["--flag", "fAlSe", "x"]).get_bool("flag"), Some(false));
        assert_eq!(parse_ok(&p, &["--flag=no"]).get_bool("flag"), Some(true));
    }

    #[test]
    fn test_untyped_option_keeps_raw_strings() {
        let p = parser(vec![OptionSpec::new("raw")]);
        assert_eq!(parse_ok(&p, &["--raw"]).get("raw"), Some(&Value::List(vec![])));
        assert_eq!(parse_ok(&p, &["--raw", "7"]).get_str("raw"), Some("7"));
        assert_eq!(
            parse_ok(&p, &["--raw", "a", "b"]).get("raw"),
            Some(&Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]))
        );
    }

    #[test]
    fn test_arity_must_match_exactly() {
        let p = parser(vec![
            OptionSpec::new("arg1")
                .with_kind(ValueKind::Int)
                .with_num_args(3)
                .required(),
        ]);

        assert_eq!(parse_ok(&p, &["--arg1", "1", "2", "3"]).get("arg1"), Some(&ints(&[1, 2, 3])));

        for (tokens, actual) in [
            (&["--arg1"][..], 0),
            (&["--arg1", "1"][..], 1),
            (&["--arg1", "1", "2"][..], 2),
            (&["--arg1", "1", "2", "3", "4"][..], 4),
        ] {
            assert_eq!(
                p.parse(tokens).unwrap_err(),
                ArgError::ArityMismatch {
                    option: "arg1".to_string(),
                    expected: 3,
                    actual,
                }
            );
        }
    }

    #[test]
    fn test_arity_checked_before_coercion() {
        let p = parser(vec![
            OptionSpec::new("n").with_kind(ValueKind::Int).with_num_args(2),
        ]);
        let err = p.parse(&["--n", "oops"]).unwrap_err();
        assert!(matches!(err, ArgError::ArityMismatch { actual: 1, .. }));
    }

    #[test]
    fn test_coercion_error_names_option_and_token() {
        let p = parser(vec![OptionSpec::new("arg").with_kind(ValueKind::Int)]);
        let err = p.parse(&["--arg", "1", "123.123"]).unwrap_err();
        match err {
            ArgError::CoercionError { option, value, .. } => {
                assert_eq!(option, "arg");
                assert_eq!(value, "123.123");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_option_reported_before_other_failures() {
        let p = parser(vec![
            OptionSpec::new("need").required(),
            OptionSpec::new("n").with_kind(ValueKind::Int),
        ]);
        let err = p.parse(&["--n=x", "--foo", "--bar=1"]).unwrap_err();
        assert_eq!(err, ArgError::UnknownOption("foo".to_string()));
    }

    #[test]
    fn test_failures_follow_registry_order() {
        let p = parser(vec![
            OptionSpec::new("first").required(),
            OptionSpec::new("second").with_kind(ValueKind::Int),
        ]);
        let err = p.parse(&["--second", "x"]).unwrap_err();
        assert_eq!(err, ArgError::MissingRequiredOption("first".to_string()));
    }

    #[test]
    fn test_help_short_circuits_everything() {
        let p = parser(vec![OptionSpec::new("arg").with_kind(ValueKind::Int).required()]);
        for tokens in [
            &["--help"][..],
            &["--unknown", "--arg=a=b", "--help"][..],
            &["--help=now"][..],
        ] {
            let outcome = p.parse(tokens).unwrap();
            assert!(outcome.help_text().unwrap().starts_with("usage: prog"));
        }
    }

    #[test]
    fn test_option_named_help_is_shadowed() {
        let p = parser(vec![OptionSpec::new(HELP_KEY).with_kind(ValueKind::Int)]);
        let outcome = p.parse(&["--help", "3"]).unwrap();
        assert_eq!(outcome.help_text(), Some(p.usage().as_str()));
    }

    #[test]
    fn test_custom_prefix() {
        let registry = Registry::from_specs([
            OptionSpec::new("size").with_kind(ValueKind::Int),
            OptionSpec::new("raw"),
        ])
        .unwrap();
        let p = Parser::with_config(registry, ParserConfig::new("tool").with_prefix("/")).unwrap();

        let args = parse_ok(&p, &["/raw", "--size", "/size=4", "5"]);
        assert_eq!(args.get_str("raw"), Some("--size"));
        assert_eq!(args.get("size"), Some(&ints(&[4, 5])));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = Parser::with_config(Registry::new(), ParserConfig::default().with_prefix(""))
            .unwrap_err();
        assert_eq!(err, ArgError::InvalidPrefix);
    }

    #[test]
    fn test_repeated_parses_are_identical() {
        let p = parser(vec![
            OptionSpec::new("a").with_kind(ValueKind::Float),
            OptionSpec::new("b").with_kind(ValueKind::Literal),
        ]);
        let tokens = ["--a", "3.5", "--b", "[1, 'two']"];
        let first = p.parse(&tokens).unwrap();
        let second = p.parse(&tokens).unwrap();
        assert_eq!(first, second);
    }
}
