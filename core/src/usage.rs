//! Usage text rendering.
//!
//! The header lists required options first, then optional ones in brackets.
//! The body has one `name  description` line per option, in the same order.

use std::fmt::Write;

use crate::config::ParserConfig;
use crate::registry::Registry;
use crate::OptionSpec;

const NAME_COLUMN_WIDTH: usize = 12;

/// Renders the usage text for `registry`.
///
/// # Examples
///
/// ```
/// use argspec_core::*;
///
/// let registry = Registry::from_specs([
///     OptionSpec::new("verbose").with_kind(ValueKind::Bool),
///     OptionSpec::new("input").required().with_description("file to read"),
/// ])
/// .unwrap();
///
/// let text = render_usage(&registry, &ParserConfig::new("tool"));
/// assert_eq!(
///     text,
///     "usage: tool --input=<value> [--verbose]\n\
///      \n    input        file to read\
///      \n    verbose      missing description\n"
/// );
/// ```
pub fn render_usage(registry: &Registry, config: &ParserConfig) -> String {
    let (required, optional): (Vec<&OptionSpec>, Vec<&OptionSpec>) =
        registry.all_specs().partition(|spec| spec.required);

    let mut header = format!("usage: {}", config.program);
    for spec in &required {
        header.push(' ');
        header.push_str(&option_usage(spec, &config.prefix));
    }
    for spec in &optional {
        let _ = write!(header, " [{}]", option_usage(spec, &config.prefix));
    }

    let mut out = header;
    out.push_str("\n\n");
    for spec in required.iter().chain(optional.iter()) {
        let _ = writeln!(
            out,
            "    {:<width$} {}",
            spec.name,
            spec.description,
            width = NAME_COLUMN_WIDTH
        );
    }
    out
}

/// Renders one option as it would be typed: `--name=<value>`, or bare
/// `--name` for boolean flags.
pub fn option_usage(spec: &OptionSpec, prefix: &str) -> String {
    if spec.is_flag() {
        format!("{prefix}{}", spec.name)
    } else {
        format!("{prefix}{}=<value>", spec.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueKind;

    #[test]
    fn test_required_options_come_first() {
        let registry = Registry::from_specs([
            OptionSpec::new("arg_eval")
                .with_kind(ValueKind::Literal)
                .with_description("help description for arg_eval"),
            OptionSpec::new("arg_int")
                .with_kind(ValueKind::Int)
                .required()
                .with_num_args(2)
                .with_description("help description for arg_int"),
            OptionSpec::new("arg_bool")
                .with_kind(ValueKind::Bool)
                .with_description("help description for arg_bool"),
            OptionSpec::new("arg_str")
                .with_kind(ValueKind::Str)
                .required()
                .with_description("help description for arg_str"),
        ])
        .unwrap();

        let text = render_usage(&registry, &ParserConfig::new("parser"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "usage: parser --arg_int=<value> --arg_str=<value> [--arg_eval=<value>] [--arg_bool]"
        );
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "    arg_int      help description for arg_int");
        assert_eq!(lines[3], "    arg_str      help description for arg_str");
        assert_eq!(lines[4], "    arg_eval     help description for arg_eval");
        assert_eq!(lines[5], "    arg_bool     help description for arg_bool");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let registry = Registry::from_specs([OptionSpec::new("a_rather_long_name")]).unwrap();
        let text = render_usage(&registry, &ParserConfig::default());
        assert!(text.contains("    a_rather_long_name missing description\n"));
    }

    #[test]
    fn test_uses_configured_prefix() {
        let registry = Registry::from_specs([
            OptionSpec::new("q").with_kind(ValueKind::Bool).required(),
        ])
        .unwrap();
        let text = render_usage(&registry, &ParserConfig::new("t").with_prefix("+"));
        assert!(text.starts_with("usage: t +q\n\n"));
    }

    #[test]
    fn test_empty_registry_renders_header_only() {
        let text = render_usage(&Registry::new(), &ParserConfig::default());
        assert_eq!(text, "usage: prog\n\n");
    }
}
