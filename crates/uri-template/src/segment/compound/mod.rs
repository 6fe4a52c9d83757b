//! Compound segments: literal text interleaved with variables
//!
//! `foo{x}bar{y}` decomposes into a prefix and an ordered list of
//! `(variable, trailing literal)` pairs:
//!
//! ```text
//! prefix = "foo"
//! pairs  = [("x", "bar"), ("y", "")]
//! suffix = ""            (literal of the last pair)
//! ```
//!
//! - [`parser`] compiles raw text into this form
//! - [`matcher`] tests candidates and extracts values
//! - [`ordering`] classifies the shape and ranks competing patterns

use std::sync::Arc;

use super::{slash_compatible, take_values};
use crate::error::ContractViolation;
use crate::text::eq_ignore_case;

pub mod matcher;
pub mod ordering;
pub mod parser;

pub use ordering::ShapeClass;

/// A variable and the literal text that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePair {
    name: Arc<str>,
    literal: String,
    raw_literal: String,
}

impl VariablePair {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded literal following the variable; may be empty
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Compiled compound segment
///
/// Invariants upheld by [`CompoundSegment::compile`]:
/// - at least one pair
/// - every pair except the last has a non-empty literal
/// - prefix and literals are stored decoded and contain no `*` or stray `}`;
///   the text as written is kept alongside for rendering
#[derive(Debug, Clone)]
pub struct CompoundSegment {
    original: String,
    trailing_slash: bool,
    prefix: String,
    raw_prefix: String,
    pairs: Vec<VariablePair>,
    class: ShapeClass,
}

impl CompoundSegment {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Decoded leading literal; may be empty
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Literal of the last pair; may be empty
    pub fn suffix(&self) -> &str {
        self.pairs.last().map_or("", |pair| pair.literal.as_str())
    }

    pub fn pairs(&self) -> &[VariablePair] {
        &self.pairs
    }

    pub fn variable_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn class(&self) -> ShapeClass {
        self.class
    }

    /// Appends the segment built from one pre-escaped value per pair
    ///
    /// Literal text is written as it appears in the template, still
    /// percent-encoded. Returns the values not consumed; values are not
    /// escaped here.
    pub fn render<'v, S: AsRef<str>>(
        &self,
        values: &'v [S],
        out: &mut String,
    ) -> Result<&'v [S], ContractViolation> {
        let (own, rest) = take_values(values, self.pairs.len())?;

        out.push_str(&self.raw_prefix);
        for (pair, value) in self.pairs.iter().zip(own) {
            out.push_str(value.as_ref());
            out.push_str(&pair.raw_literal);
        }
        if self.trailing_slash {
            out.push('/');
        }
        Ok(rest)
    }

    /// Same literal structure, compared case-insensitively
    ///
    /// Variable names do not take part: `a{x}b` and `A{y}B` are equivalent.
    pub fn is_equivalent_to(&self, other: &CompoundSegment, ignore_trailing_slash: bool) -> bool {
        slash_compatible(self.trailing_slash, other.trailing_slash, ignore_trailing_slash)
            && self.pairs.len() == other.pairs.len()
            && eq_ignore_case(&self.prefix, &other.prefix)
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|(a, b)| eq_ignore_case(&a.literal, &b.literal))
    }
}
