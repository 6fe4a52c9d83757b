//! Compiles compound segment text into prefix + pairs
//!
//! Single left-to-right scan:
//!
//! ```text
//! foo{x}bar{y}
//! ^^^          prefix            (text before the first `{`)
//!    ^^^       variable x        (registered with the owning template)
//!       ^^^    literal after x   (up to the next `{` or end of segment)
//!          ^^^ variable y, literal ""
//! ```

use tracing::debug;

use super::{CompoundSegment, ShapeClass, VariablePair};
use crate::error::{FormatReason, Result};
use crate::segment::{decode_literal, SegmentContext, WILDCARD_MARKER};
use crate::variables::VariableSite;

impl CompoundSegment {
    /// Compiles `text` (one path segment, without separators)
    ///
    /// # Errors
    ///
    /// - `Format` for unterminated or empty variables, adjacent variables,
    ///   `*` or a stray `}` in literal text, or text without any variable
    /// - `Configuration` when a variable carries (or already has) a default
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::{CompoundSegment, SegmentContext, ShapeClass, VariableTable};
    ///
    /// let mut vars = VariableTable::new();
    /// let seg = CompoundSegment::compile("foo{x}bar", false, &mut SegmentContext::new("foo{x}bar", &mut vars)).unwrap();
    /// assert_eq!(seg.prefix(), "foo");
    /// assert_eq!(seg.pairs()[0].name(), "x");
    /// assert_eq!(seg.pairs()[0].literal(), "bar");
    /// assert_eq!(seg.class(), ShapeClass::PrefixAndSuffix);
    /// ```
    pub fn compile(text: &str, trailing_slash: bool, ctx: &mut SegmentContext<'_>) -> Result<Self> {
        let Some(first_open) = text.find('{') else {
            return Err(ctx.format_error(0, FormatReason::NoVariables));
        };

        let raw_prefix = &text[..first_open];
        let prefix = decode_literal(raw_prefix, 0, ctx)?;
        let mut pairs = Vec::new();
        let mut open = first_open;

        loop {
            let body_start = open + 1;
            let close = match text[body_start..].find('}') {
                Some(at) => body_start + at,
                None => return Err(ctx.format_error(open, FormatReason::UnterminatedVariable)),
            };
            let name = &text[body_start..close];

            if let Some(at) = name.find('{') {
                return Err(ctx.format_error(body_start + at, FormatReason::NestedBrace));
            }
            if name.is_empty() {
                return Err(ctx.format_error(open, FormatReason::EmptyVariable));
            }
            if name.starts_with(WILDCARD_MARKER) {
                return Err(ctx.format_error(
                    body_start,
                    FormatReason::WildcardInCompound(name[1..].to_string()),
                ));
            }
            if let Some((variable, _)) = name.split_once('=') {
                return Err(ctx.configuration_error(
                    variable,
                    "variables in a compound segment cannot have default values",
                ));
            }

            let registered = ctx.register(name, VariableSite::Compound);
            if registered.has_default {
                return Err(ctx.configuration_error(
                    name,
                    "variable has a default value and cannot be used in a compound segment",
                ));
            }

            let literal_start = close + 1;
            let next_open = text[literal_start..].find('{').map(|at| literal_start + at);
            let literal_end = next_open.unwrap_or(text.len());
            if next_open == Some(literal_start) {
                return Err(ctx.format_error(
                    literal_start,
                    FormatReason::AdjacentVariables(name.to_string()),
                ));
            }

            let raw_literal = &text[literal_start..literal_end];
            pairs.push(VariablePair {
                name: registered.name,
                literal: decode_literal(raw_literal, literal_start, ctx)?,
                raw_literal: raw_literal.to_string(),
            });

            match next_open {
                Some(at) => open = at,
                None => break,
            }
        }

        let suffix = pairs.last().map_or("", |pair| pair.literal.as_str());
        let class = ShapeClass::of(&prefix, suffix);
        debug!(
            segment = text,
            prefix = %prefix,
            pairs = pairs.len(),
            class = ?class,
            "compiled compound segment"
        );

        Ok(Self {
            original: text.to_string(),
            trailing_slash,
            prefix,
            raw_prefix: raw_prefix.to_string(),
            pairs,
            class,
        })
    }
}
