//! Whole-path URI templates
//!
//! A template owns its variable table and one compiled [`PathSegment`] per
//! path segment. It matches incoming paths segment by segment and renders
//! concrete paths from values.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::binding::BindingSink;
use crate::error::{ContractViolation, FormatReason, Result, TemplateError};
use crate::path::{decode_segments, has_trailing_slash, normalize_path, segments};
use crate::segment::{PathSegment, SegmentContext};
use crate::variables::VariableTable;

/// A compiled URI template such as `/files/{name}.{ext}` or `/docs/{*path}`
#[derive(Debug, Clone)]
pub struct UriTemplate {
    text: String,
    segments: Vec<PathSegment>,
    variables: VariableTable,
}

impl UriTemplate {
    /// Parses and compiles a template
    ///
    /// # Errors
    ///
    /// Any malformed segment rejects the whole template. Additionally:
    /// - a wildcard anywhere but the final segment is a format error
    /// - a variable with a default followed by a segment without one is a
    ///   configuration error (defaults only fill in a shortened path's tail)
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::UriTemplate;
    ///
    /// let template = UriTemplate::parse("/files/{name}.{ext}").unwrap();
    /// let params = template.match_path("/files/report.pdf").unwrap();
    /// assert_eq!(params["name"], "report");
    /// assert_eq!(params["ext"], "pdf");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = normalize_path(text);
        let trailing_slash = has_trailing_slash(&normalized);
        let raw: Vec<(usize, &str)> = segments(&normalized).collect();

        let mut variables = VariableTable::new();
        let mut compiled = Vec::with_capacity(raw.len());
        for (index, &(offset, segment)) in raw.iter().enumerate() {
            let is_last = index + 1 == raw.len();
            let mut ctx = SegmentContext::at_offset(&normalized, offset, &mut variables);
            let segment = PathSegment::parse(segment, is_last && trailing_slash, &mut ctx)?;

            if matches!(segment, PathSegment::Wildcard(_)) && !is_last {
                return Err(TemplateError::format(
                    &normalized,
                    offset,
                    FormatReason::WildcardNotLast,
                ));
            }
            compiled.push(segment);
        }

        check_default_tail(&normalized, &compiled)?;

        debug!(
            template = %normalized,
            segments = compiled.len(),
            variables = variables.len(),
            "parsed uri template"
        );

        Ok(Self {
            text: normalized.into_owned(),
            segments: compiled,
            variables,
        })
    }

    /// Normalized template text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Path variable names in declaration order, repeats included
    pub fn path_variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.path_variables()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.segments
            .last()
            .is_some_and(PathSegment::has_trailing_slash)
    }

    /// Matches a request path and returns the bound variables
    ///
    /// The path is percent-decoded segment by segment before matching.
    /// Trailing variable segments with defaults may be omitted.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let decoded = decode_segments(path)?;
        let mut bindings: HashMap<String, String> = HashMap::new();
        self.match_segments(&decoded, Some(&mut bindings))
            .then_some(bindings)
    }

    /// Tests a request path without building bindings
    pub fn is_match(&self, path: &str) -> bool {
        decode_segments(path).is_some_and(|decoded| self.match_segments(&decoded, None))
    }

    /// Matches already-decoded segments, writing bindings into `sink`
    ///
    /// Callers that want an all-or-nothing sink should test with `None`
    /// first, as [`TemplateTable`](crate::TemplateTable) does.
    pub fn match_segments(
        &self,
        candidates: &[Cow<'_, str>],
        mut sink: Option<&mut dyn BindingSink>,
    ) -> bool {
        for (index, segment) in self.segments.iter().enumerate() {
            if let PathSegment::Wildcard(wildcard) = segment {
                let remainder = candidates.get(index..).unwrap_or_default().join("/");
                return wildcard.matches(&remainder, sink);
            }

            match candidates.get(index) {
                Some(candidate) => {
                    if !segment.matches(candidate, reborrow(&mut sink)) {
                        return false;
                    }
                }
                None => match segment {
                    PathSegment::Variable(variable) => match variable.default_value() {
                        Some(default) => {
                            if let Some(sink) = reborrow(&mut sink) {
                                sink.bind(variable.name(), default);
                            }
                        }
                        None => return false,
                    },
                    _ => return false,
                },
            }
        }

        candidates.len() <= self.segments.len()
    }

    /// Renders a path from values in path-variable order
    ///
    /// Values are percent-encoded here; a named wildcard's value keeps its
    /// `/` separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::UriTemplate;
    ///
    /// let template = UriTemplate::parse("/users/{id}/v{major}.{minor}").unwrap();
    /// assert_eq!(template.bind_by_position(&["a b", "1", "2"]).unwrap(), "/users/a%20b/v1.2");
    /// ```
    pub fn bind_by_position<S: AsRef<str>>(
        &self,
        values: &[S],
    ) -> std::result::Result<String, ContractViolation> {
        let expected = self.variables.len();
        if values.len() != expected {
            return Err(ContractViolation::ValueCountMismatch {
                expected,
                supplied: values.len(),
            });
        }

        let mut escaped = Vec::with_capacity(values.len());
        let mut remaining = values;
        for segment in &self.segments {
            let (own, rest) = remaining.split_at(segment.variable_count());
            let keep_separators = matches!(segment, PathSegment::Wildcard(_));
            escaped.extend(own.iter().map(|value| escape(value.as_ref(), keep_separators)));
            remaining = rest;
        }

        let mut out = String::with_capacity(self.text.len() + 16);
        let mut cursor: &[String] = &escaped;
        for segment in &self.segments {
            if matches!(segment, PathSegment::Wildcard(w) if w.name().is_none()) {
                continue;
            }
            out.push('/');
            cursor = segment.render(cursor, &mut out)?;
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }

    /// Renders a path from named values, falling back to defaults
    pub fn bind_by_name<V: AsRef<str>>(
        &self,
        values: &HashMap<String, V>,
    ) -> std::result::Result<String, ContractViolation> {
        let ordered = self
            .variables
            .path_variables()
            .map(|name| {
                values
                    .get(name)
                    .map(|value| value.as_ref())
                    .or_else(|| self.variables.default_value(name))
                    .ok_or_else(|| ContractViolation::MissingVariable(name.to_string()))
            })
            .collect::<std::result::Result<Vec<&str>, _>>()?;
        self.bind_by_position(&ordered)
    }

    /// Same structure and literals; variable names are not compared
    pub fn is_equivalent_to(&self, other: &UriTemplate, ignore_trailing_slash: bool) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.is_equivalent_to(b, ignore_trailing_slash))
    }

    /// Preference order between templates: `Less` is tried first
    ///
    /// Segments are compared left to right. When one template's segments
    /// are a tied prefix of the other's, the shorter template comes first if
    /// the longer one's extra tail can match nothing (a wildcard, or
    /// variables that all have defaults); otherwise the longer comes first.
    pub fn compare_specificity(&self, other: &UriTemplate) -> Ordering {
        let shared = self.segments.len().min(other.segments.len());
        self.segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| a.compare_specificity(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| {
                compare_tails(&self.segments[shared..], &other.segments[shared..])
            })
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Once a variable segment has a default, every later segment must too
fn check_default_tail(template: &str, segments: &[PathSegment]) -> Result<()> {
    let first_default = segments.iter().position(|segment| {
        matches!(segment, PathSegment::Variable(v) if v.default_value().is_some())
    });
    let Some(start) = first_default else {
        return Ok(());
    };

    let defaulted = match &segments[start] {
        PathSegment::Variable(v) => v.name(),
        _ => "",
    };
    let tail_ok = segments[start..].iter().all(|segment| {
        matches!(segment, PathSegment::Variable(v) if v.default_value().is_some())
    });
    if tail_ok {
        Ok(())
    } else {
        Err(TemplateError::configuration(
            template,
            defaulted,
            "a variable with a default value must only be followed by variables with defaults",
        ))
    }
}

/// Orders two templates whose shared segments tie; at most one tail is non-empty
fn compare_tails(own: &[PathSegment], other: &[PathSegment]) -> Ordering {
    match (own.is_empty(), other.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) if matches_empty(other) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, true) if matches_empty(own) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => Ordering::Equal,
    }
}

/// Whether a tail of segments can be satisfied by a path that ends before it
fn matches_empty(tail: &[PathSegment]) -> bool {
    tail.iter().all(|segment| match segment {
        PathSegment::Wildcard(_) => true,
        PathSegment::Variable(variable) => variable.default_value().is_some(),
        _ => false,
    })
}

fn reborrow<'s>(sink: &'s mut Option<&mut dyn BindingSink>) -> Option<&'s mut dyn BindingSink> {
    match sink {
        Some(sink) => Some(&mut **sink),
        None => None,
    }
}

fn escape(value: &str, keep_separators: bool) -> String {
    if keep_separators {
        value
            .split('/')
            .map(|part| urlencoding::encode(part).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    } else {
        urlencoding::encode(value).into_owned()
    }
}
