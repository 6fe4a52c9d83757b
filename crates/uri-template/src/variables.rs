//! Variable table owned by a template
//!
//! Segments register the variables they discover while compiling. The table
//! keeps every path variable in declaration order (repeats included, since
//! positional rendering consumes one value per occurrence) and hands back a
//! shared name that the segment keeps for emitting bindings.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Where a variable was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSite<'a> {
    /// `{name}`, `{name=default}` or `{*name}` occupying a whole segment
    Segment { default: Option<&'a str> },
    /// Inside a compound segment such as `foo{name}bar`
    Compound,
}

/// What the registry knows about a variable after registering it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredVariable {
    /// Shared name, owned by the table
    pub name: Arc<str>,
    /// Whether any occurrence of this name carries a default value
    pub has_default: bool,
    /// Whether any occurrence of this name sits inside a compound segment
    pub in_compound: bool,
}

/// Callback used by segment compilation to register discovered variables
pub trait VariableRegistry {
    fn register_path_variable(&mut self, name: &str, site: VariableSite<'_>) -> RegisteredVariable;
}

/// Default [`VariableRegistry`]: the variable table of one template
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    path_variables: Vec<Arc<str>>,
    defaults: HashMap<Arc<str>, String>,
    compound: HashSet<Arc<str>>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path variables in declaration order, repeats included
    pub fn path_variables(&self) -> impl Iterator<Item = &str> {
        self.path_variables.iter().map(|name| &**name)
    }

    /// Number of path variable occurrences
    pub fn len(&self) -> usize {
        self.path_variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path_variables.is_empty()
    }

    /// Default value recorded for a variable, if any
    pub fn default_value(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    pub fn has_default(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    fn intern(&self, name: &str) -> Arc<str> {
        self.path_variables
            .iter()
            .find(|existing| &***existing == name)
            .cloned()
            .unwrap_or_else(|| Arc::from(name))
    }
}

impl VariableRegistry for VariableTable {
    fn register_path_variable(&mut self, name: &str, site: VariableSite<'_>) -> RegisteredVariable {
        let shared = self.intern(name);
        self.path_variables.push(Arc::clone(&shared));

        match site {
            VariableSite::Segment {
                default: Some(value),
            } => {
                self.defaults.insert(Arc::clone(&shared), value.to_string());
            }
            VariableSite::Segment { default: None } => {}
            VariableSite::Compound => {
                self.compound.insert(Arc::clone(&shared));
            }
        }

        RegisteredVariable {
            has_default: self.defaults.contains_key(name),
            in_compound: self.compound.contains(name),
            name: shared,
        }
    }
}
