//! Declared option storage.
//!
//! A [`Registry`] is filled once through [`Registry::register`] and then only
//! read. Names are unique, and iteration follows insertion order, which the
//! usage renderer and the validation pass rely on.

use std::collections::HashMap;

use crate::error::{ArgError, Result};
use crate::OptionSpec;

/// Insertion-ordered collection of [`OptionSpec`]s keyed by name.
///
/// # Examples
///
/// ```
/// use argspec_core::{ArgError, OptionSpec, Registry, ValueKind};
///
/// let mut registry = Registry::new();
/// registry
///     .register(OptionSpec::new("arg").with_kind(ValueKind::Int).required())
///     .unwrap();
///
/// assert!(registry.lookup("arg").is_some());
/// assert!(registry.lookup("other").is_none());
///
/// let err = registry.register(OptionSpec::new("arg")).unwrap_err();
/// assert_eq!(err, ArgError::DuplicateOption("arg".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: Vec<OptionSpec>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from specs, registering them in order.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateOption`] for the first repeated name.
    pub fn from_specs(specs: impl IntoIterator<Item = OptionSpec>) -> Result<Self> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateOption`] if the name is already taken;
    /// the registry is left unchanged.
    ///
    /// Names are not checked here. An option named `help` is accepted but
    /// can never be parsed, since any `help` key turns a parse into a
    /// usage request. Run [`validate_definition`](crate::validate_definition)
    /// on a [`ParserDefinition`](crate::ParserDefinition) to catch reserved
    /// or malformed names.
    pub fn register(&mut self, spec: OptionSpec) -> Result<()> {
        if self.index.contains_key(&spec.name) {
            return Err(ArgError::DuplicateOption(spec.name));
        }
        self.index.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    /// Finds an option by name.
    pub fn lookup(&self, name: &str) -> Option<&OptionSpec> {
        self.index.get(name).map(|&i| &self.specs[i])
    }

    /// Returns `true` if an option with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over all specs in insertion order.
    pub fn all_specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.iter()
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
