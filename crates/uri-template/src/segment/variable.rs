//! Variable segments: `{name}` or `{name=default}` capturing a whole segment

use std::sync::Arc;

use super::{take_values, SegmentContext};
use crate::binding::BindingSink;
use crate::error::{ContractViolation, FormatReason, Result};
use crate::variables::VariableSite;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSegment {
    original: String,
    name: Arc<str>,
    default: Option<String>,
    trailing_slash: bool,
}

impl VariableSegment {
    /// `inner` is the text between the braces
    pub fn compile(
        text: &str,
        inner: &str,
        trailing_slash: bool,
        ctx: &mut SegmentContext<'_>,
    ) -> Result<Self> {
        let (name, default) = match inner.split_once('=') {
            Some((name, default)) => (name, Some(default)),
            None => (inner, None),
        };
        if name.is_empty() {
            return Err(ctx.format_error(1, FormatReason::EmptyVariable));
        }
        if default == Some("") {
            return Err(ctx.configuration_error(name, "default value cannot be empty"));
        }

        let default = default
            .map(|raw| {
                urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .map_err(|_| ctx.format_error(name.len() + 2, FormatReason::InvalidEncoding))
            })
            .transpose()?;

        let registered = ctx.register(
            name,
            VariableSite::Segment {
                default: default.as_deref(),
            },
        );
        if default.is_some() && registered.in_compound {
            return Err(ctx.configuration_error(
                name,
                "variable is also used in a compound segment and cannot have a default value",
            ));
        }

        Ok(Self {
            original: text.to_string(),
            name: registered.name,
            default,
            trailing_slash,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Any non-empty segment matches
    pub fn matches(&self, candidate: &str, sink: Option<&mut dyn BindingSink>) -> bool {
        if candidate.is_empty() {
            return false;
        }
        if let Some(sink) = sink {
            sink.bind(&self.name, candidate);
        }
        true
    }

    pub fn render<'v, S: AsRef<str>>(
        &self,
        values: &'v [S],
        out: &mut String,
    ) -> std::result::Result<&'v [S], ContractViolation> {
        let (value, rest) = take_values(values, 1)?;
        out.push_str(value[0].as_ref());
        if self.trailing_slash {
            out.push('/');
        }
        Ok(rest)
    }
}
