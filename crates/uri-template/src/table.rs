//! Template table: the aggregator that keeps templates in preference order
//!
//! Templates are kept sorted by [`UriTemplate::compare_specificity`], so the
//! first template that matches a path is the most specific one. Matching is
//! done in two passes, the same way a request is routed:
//! 1. test each template without a sink until one matches
//! 2. match the winner again to extract its bindings

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::error::{Result, TemplateError};
use crate::options::TableOptions;
use crate::path::decode_segments;
use crate::template::UriTemplate;

/// A registered template and the value it routes to
#[derive(Debug, Clone)]
pub struct TableEntry<T> {
    pub template: UriTemplate,
    pub value: T,
}

/// Result of matching a path against the table
#[derive(Debug)]
pub struct TableMatch<'a, T> {
    pub template: &'a UriTemplate,
    pub value: &'a T,
    pub bindings: HashMap<String, String>,
}

/// Ordered set of templates
///
/// # Examples
///
/// ```
/// use uri_template::{TemplateTable, UriTemplate};
///
/// let mut table = TemplateTable::new();
/// table.insert(UriTemplate::parse("/users/{id}").unwrap(), "show").unwrap();
/// table.insert(UriTemplate::parse("/users/new").unwrap(), "new").unwrap();
///
/// let m = table.match_path("/users/new").unwrap();
/// assert_eq!(*m.value, "new");
///
/// let m = table.match_path("/users/42").unwrap();
/// assert_eq!(*m.value, "show");
/// assert_eq!(m.bindings["id"], "42");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateTable<T> {
    entries: Vec<TableEntry<T>>,
    options: TableOptions,
}

impl<T> Default for TemplateTable<T> {
    fn default() -> Self {
        Self::with_options(TableOptions::default())
    }
}

impl<T> TemplateTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableOptions) -> Self {
        Self {
            entries: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Registers a template
    ///
    /// Inserted after every entry it does not strictly precede, so equally
    /// ranked templates keep registration order.
    ///
    /// # Errors
    ///
    /// `Duplicate` when an equivalent template is registered and the table
    /// does not allow duplicates.
    pub fn insert(&mut self, template: UriTemplate, value: T) -> Result<()> {
        if !self.options.allow_duplicates {
            let ignore_slash = self.options.ignore_trailing_slash;
            if let Some(existing) = self
                .entries
                .iter()
                .find(|entry| entry.template.is_equivalent_to(&template, ignore_slash))
            {
                warn!(
                    template = %template,
                    existing = %existing.template,
                    "rejected duplicate uri template"
                );
                return Err(TemplateError::Duplicate {
                    template: template.to_string(),
                    existing: existing.template.to_string(),
                });
            }
        }

        let position = self
            .entries
            .partition_point(|entry| entry.template.compare_specificity(&template).is_le());
        debug!(template = %template, position, "registered uri template");
        self.entries.insert(position, TableEntry { template, value });
        Ok(())
    }

    /// Parses `text` and registers it
    pub fn insert_str(&mut self, text: &str, value: T) -> Result<()> {
        self.insert(UriTemplate::parse(text)?, value)
    }

    /// Finds the most specific template matching `path`
    pub fn match_path(&self, path: &str) -> Option<TableMatch<'_, T>> {
        let Some(decoded) = decode_segments(path) else {
            trace!(path, "path segments are not valid UTF-8");
            return None;
        };

        let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.template.match_segments(&decoded, None))
        else {
            trace!(path, "no uri template matched");
            return None;
        };

        let mut bindings: HashMap<String, String> = HashMap::new();
        entry.template.match_segments(&decoded, Some(&mut bindings));
        trace!(path, template = %entry.template, "matched uri template");

        Some(TableMatch {
            template: &entry.template,
            value: &entry.value,
            bindings,
        })
    }

    /// Templates in preference order
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
