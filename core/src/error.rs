//! Error types for registry construction and argument parsing.
//!
//! Every failure the engine can produce is a named variant of [`ArgError`].
//! All of them are terminal for the current `parse` call: the engine stops
//! at the first one and never returns a partial result.

use thiserror::Error;

/// Errors raised while building a registry or parsing a token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// An option with this name is already registered.
    #[error("argument with name <{0}> already exists")]
    DuplicateOption(String),

    /// A prefixed token contains more than one `=`.
    #[error("too many \"=\" in argument: {0}")]
    MalformedArgument(String),

    /// A supplied key has no matching option in the registry.
    #[error("unknown argument: <{0}>")]
    UnknownOption(String),

    /// A required option was not supplied.
    #[error("required argument <{0}> was not supplied")]
    MissingRequiredOption(String),

    /// An option with a fixed `num_args` received a different token count.
    #[error("option <{option}> expects {expected} value(s) but {actual} were supplied")]
    ArityMismatch {
        /// Option name.
        option: String,
        /// Declared `num_args`.
        expected: usize,
        /// Number of accumulated tokens.
        actual: usize,
    },

    /// A token could not be converted to the option's declared kind.
    #[error("invalid value '{value}' for option <{option}>: {reason}")]
    CoercionError {
        /// Option name.
        option: String,
        /// The raw token that failed.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// The configured option prefix is empty.
    #[error("option prefix cannot be empty")]
    InvalidPrefix,
}

/// Convenience alias for results with [`ArgError`].
pub type Result<T> = std::result::Result<T, ArgError>;
