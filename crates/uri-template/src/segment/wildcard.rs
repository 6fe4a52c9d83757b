//! Wildcard segments: `*` or `{*name}`, matching the rest of the path

use std::sync::Arc;

use super::{take_values, SegmentContext, WILDCARD_MARKER};
use crate::binding::BindingSink;
use crate::error::{ContractViolation, FormatReason, Result};
use crate::variables::VariableSite;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardSegment {
    original: String,
    name: Option<Arc<str>>,
    trailing_slash: bool,
}

impl WildcardSegment {
    pub fn anonymous(trailing_slash: bool) -> Self {
        Self {
            original: WILDCARD_MARKER.to_string(),
            name: None,
            trailing_slash,
        }
    }

    /// `name` is the text after `{*`
    pub fn named(
        text: &str,
        name: &str,
        trailing_slash: bool,
        ctx: &mut SegmentContext<'_>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(ctx.format_error(2, FormatReason::EmptyVariable));
        }
        let registered = ctx.register(name, VariableSite::Segment { default: None });
        Ok(Self {
            original: text.to_string(),
            name: Some(registered.name),
            trailing_slash,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Matches anything; `remainder` is the rest of the path joined by `/`
    pub fn matches(&self, remainder: &str, sink: Option<&mut dyn BindingSink>) -> bool {
        if let (Some(name), Some(sink)) = (self.name.as_deref(), sink) {
            if !remainder.is_empty() {
                sink.bind(name, remainder);
            }
        }
        true
    }

    pub fn render<'v, S: AsRef<str>>(
        &self,
        values: &'v [S],
        out: &mut String,
    ) -> std::result::Result<&'v [S], ContractViolation> {
        if self.name.is_none() {
            return Ok(values);
        }
        let (value, rest) = take_values(values, 1)?;
        out.push_str(value[0].as_ref());
        if self.trailing_slash {
            out.push('/');
        }
        Ok(rest)
    }
}
