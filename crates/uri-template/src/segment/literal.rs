//! Literal segments: fixed text matched verbatim

use super::{decode_literal, slash_compatible, SegmentContext};
use crate::error::Result;
use crate::text::eq_ignore_case;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSegment {
    original: String,
    value: String,
    trailing_slash: bool,
}

impl LiteralSegment {
    pub fn compile(text: &str, trailing_slash: bool, ctx: &mut SegmentContext<'_>) -> Result<Self> {
        Ok(Self {
            original: text.to_string(),
            value: decode_literal(text, 0, ctx)?,
            trailing_slash,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Decoded text
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Case-sensitive comparison in decoded space
    pub fn matches(&self, candidate: &str) -> bool {
        self.value == candidate
    }

    /// Appends the segment as written; literal text is already escaped
    pub fn render(&self, out: &mut String) {
        out.push_str(&self.original);
        if self.trailing_slash {
            out.push('/');
        }
    }

    pub fn is_equivalent_to(&self, other: &LiteralSegment, ignore_trailing_slash: bool) -> bool {
        slash_compatible(self.trailing_slash, other.trailing_slash, ignore_trailing_slash)
            && eq_ignore_case(&self.value, &other.value)
    }
}
