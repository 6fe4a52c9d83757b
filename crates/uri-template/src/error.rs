//! Error types for template registration and rendering
//!
//! Two families are kept apart:
//! - [`TemplateError`] is user-facing: the template author wrote something
//!   malformed or disallowed, and registration is rejected wholesale.
//! - [`ContractViolation`] is a bug in the calling code (e.g. rendering with
//!   too few values) and must never be reported as bad template input.
//!
//! Matching has no error type: "no match" is an ordinary outcome.

use thiserror::Error;

/// Result alias for template compilation and registration
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Why a segment's text could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatReason {
    #[error("variable reference is not terminated by `}}`")]
    UnterminatedVariable,
    #[error("variable name is empty")]
    EmptyVariable,
    #[error("variable `{0}` is immediately followed by another variable")]
    AdjacentVariables(String),
    #[error("wildcard marker `*` is not allowed in literal text")]
    WildcardInLiteral,
    #[error("wildcard variable `{0}` is not allowed inside a compound segment")]
    WildcardInCompound(String),
    #[error("closing brace without a matching opening brace")]
    StrayClosingBrace,
    #[error("opening brace inside a variable reference")]
    NestedBrace,
    #[error("literal text is not valid percent-encoded UTF-8")]
    InvalidEncoding,
    #[error("segment contains no variable")]
    NoVariables,
    #[error("wildcard is only allowed in the final segment")]
    WildcardNotLast,
}

/// Errors raised while compiling or registering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed template text
    #[error("invalid template `{template}` at position {position}: {reason}")]
    Format {
        template: String,
        position: usize,
        reason: FormatReason,
    },

    /// Structurally valid, but not allowed
    #[error("invalid use of variable `{variable}` in template `{template}`: {reason}")]
    Configuration {
        template: String,
        variable: String,
        reason: String,
    },

    /// Template is indistinguishable from one already in the table
    #[error("template `{template}` is equivalent to registered template `{existing}`")]
    Duplicate { template: String, existing: String },

    /// Table options could not be parsed
    #[error("invalid table options: {0}")]
    Options(#[from] toml::de::Error),
}

impl TemplateError {
    pub(crate) fn format(template: &str, position: usize, reason: FormatReason) -> Self {
        TemplateError::Format {
            template: template.to_string(),
            position,
            reason,
        }
    }

    pub(crate) fn configuration(
        template: &str,
        variable: &str,
        reason: impl Into<String>,
    ) -> Self {
        TemplateError::Configuration {
            template: template.to_string(),
            variable: variable.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the format reason, if this is a format error
    pub fn format_reason(&self) -> Option<&FormatReason> {
        match self {
            TemplateError::Format { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Caller bug detected by a precondition check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Renderer was handed fewer values than the pattern has variables
    #[error("rendering requires {expected} value(s) but only {available} remain")]
    MissingValues { expected: usize, available: usize },

    /// Positional binding was handed the wrong number of values
    #[error("template has {expected} variable(s) but {supplied} value(s) were supplied")]
    ValueCountMismatch { expected: usize, supplied: usize },

    /// Named binding lacks a value for a variable without a default
    #[error("no value supplied for variable `{0}`")]
    MissingVariable(String),
}
