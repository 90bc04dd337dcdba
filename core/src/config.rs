//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default option prefix.
pub const DEFAULT_PREFIX: &str = "--";

/// Default program name shown in the usage header.
pub const DEFAULT_PROGRAM: &str = "prog";

/// Settings that shape how tokens are recognized and how usage is rendered.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Examples
///
/// ```
/// use argspec_core::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.prefix, "--");
/// assert_eq!(config.program, "prog");
///
/// let config = ParserConfig::new("mytool").with_prefix("/");
/// assert_eq!(config.prefix, "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// String that marks a token as an option key.
    pub prefix: String,
    /// Program name for the usage header.
    pub program: String,
}

impl ParserConfig {
    /// Creates a config for `program` with the default prefix.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Replaces the option prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ParserConfig = serde_yaml::from_str("program: tool\n").unwrap();
        assert_eq!(config.program, "tool");
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }
}
