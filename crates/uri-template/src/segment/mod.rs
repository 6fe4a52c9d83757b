//! Path segment patterns
//!
//! A template path splits on `/` into segments. Each segment compiles into
//! one variant of the closed [`PathSegment`] sum type:
//!
//! | Text            | Variant    |
//! |-----------------|------------|
//! | `users`         | `Literal`  |
//! | `{id}`          | `Variable` |
//! | `{page=1}`      | `Variable` with default |
//! | `*`, `{*rest}`  | `Wildcard` |
//! | `foo{x}bar{y}`  | `Compound` |
//!
//! All variants are immutable once compiled; matching writes only into the
//! caller's [`BindingSink`].

use std::cmp::Ordering;

use crate::binding::BindingSink;
use crate::error::{ContractViolation, FormatReason, Result, TemplateError};
use crate::text::cmp_ignore_case;
use crate::variables::{RegisteredVariable, VariableRegistry, VariableSite};

pub mod compound;
pub mod literal;
pub mod variable;
pub mod wildcard;

pub use compound::{CompoundSegment, ShapeClass, VariablePair};
pub use literal::LiteralSegment;
pub use variable::VariableSegment;
pub use wildcard::WildcardSegment;

/// Marks a wildcard segment; never allowed inside literal text
pub const WILDCARD_MARKER: char = '*';

/// Segment kind, declared in match precedence order (earlier = tried first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentKind {
    Literal,
    Compound,
    Variable,
    Wildcard,
}

/// One compiled segment of a template path
#[derive(Debug, Clone)]
pub enum PathSegment {
    Literal(LiteralSegment),
    Variable(VariableSegment),
    Wildcard(WildcardSegment),
    Compound(CompoundSegment),
}

/// Compilation context: error reporting plus the owning template's registry
pub struct SegmentContext<'a> {
    template: &'a str,
    offset: usize,
    registry: &'a mut dyn VariableRegistry,
}

impl<'a> SegmentContext<'a> {
    /// Context for a segment that starts at the beginning of `template`
    pub fn new(template: &'a str, registry: &'a mut dyn VariableRegistry) -> Self {
        Self::at_offset(template, 0, registry)
    }

    /// Context for a segment starting `offset` bytes into `template`
    pub fn at_offset(
        template: &'a str,
        offset: usize,
        registry: &'a mut dyn VariableRegistry,
    ) -> Self {
        Self {
            template,
            offset,
            registry,
        }
    }

    pub(crate) fn register(&mut self, name: &str, site: VariableSite<'_>) -> RegisteredVariable {
        self.registry.register_path_variable(name, site)
    }

    /// `position` is relative to the segment being compiled
    pub(crate) fn format_error(&self, position: usize, reason: FormatReason) -> TemplateError {
        TemplateError::format(self.template, self.offset + position, reason)
    }

    pub(crate) fn configuration_error(&self, variable: &str, reason: &str) -> TemplateError {
        TemplateError::configuration(self.template, variable, reason)
    }
}

/// Validates raw literal text and returns it percent-decoded
///
/// `position` is the literal's offset within the segment, for error context.
pub(crate) fn decode_literal(raw: &str, position: usize, ctx: &SegmentContext<'_>) -> Result<String> {
    if let Some(at) = raw.find('}') {
        return Err(ctx.format_error(position + at, FormatReason::StrayClosingBrace));
    }
    if let Some(at) = raw.find(WILDCARD_MARKER) {
        return Err(ctx.format_error(position + at, FormatReason::WildcardInLiteral));
    }
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ctx.format_error(position, FormatReason::InvalidEncoding))
}

/// Splits off the values one segment consumes while rendering
pub(crate) fn take_values<S>(
    values: &[S],
    needed: usize,
) -> std::result::Result<(&[S], &[S]), ContractViolation> {
    if values.len() < needed {
        return Err(ContractViolation::MissingValues {
            expected: needed,
            available: values.len(),
        });
    }
    Ok(values.split_at(needed))
}

pub(crate) fn slash_compatible(a: bool, b: bool, ignore_trailing_slash: bool) -> bool {
    ignore_trailing_slash || a == b
}

/// Returns the inside of `{...}` when the whole segment is one variable
fn single_variable(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    (!inner.contains(['{', '}'])).then_some(inner)
}

impl PathSegment {
    /// Classifies and compiles one segment's text
    ///
    /// # Rules (evaluated in order)
    ///
    /// 1. `*` → anonymous wildcard
    /// 2. `{*name}` → named wildcard
    /// 3. `{name}` / `{name=default}` → variable
    /// 4. anything else containing `{` → compound
    /// 5. plain text → literal
    pub fn parse(text: &str, trailing_slash: bool, ctx: &mut SegmentContext<'_>) -> Result<Self> {
        if text.len() == 1 && text.starts_with(WILDCARD_MARKER) {
            return Ok(PathSegment::Wildcard(WildcardSegment::anonymous(trailing_slash)));
        }

        match single_variable(text) {
            Some(inner) => match inner.strip_prefix(WILDCARD_MARKER) {
                Some(name) => WildcardSegment::named(text, name, trailing_slash, ctx)
                    .map(PathSegment::Wildcard),
                None => VariableSegment::compile(text, inner, trailing_slash, ctx)
                    .map(PathSegment::Variable),
            },
            None if text.contains('{') => {
                CompoundSegment::compile(text, trailing_slash, ctx).map(PathSegment::Compound)
            }
            None => LiteralSegment::compile(text, trailing_slash, ctx).map(PathSegment::Literal),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            PathSegment::Literal(_) => SegmentKind::Literal,
            PathSegment::Variable(_) => SegmentKind::Variable,
            PathSegment::Wildcard(_) => SegmentKind::Wildcard,
            PathSegment::Compound(_) => SegmentKind::Compound,
        }
    }

    /// Segment text as written in the template
    pub fn original(&self) -> &str {
        match self {
            PathSegment::Literal(s) => s.original(),
            PathSegment::Variable(s) => s.original(),
            PathSegment::Wildcard(s) => s.original(),
            PathSegment::Compound(s) => s.original(),
        }
    }

    pub fn has_trailing_slash(&self) -> bool {
        match self {
            PathSegment::Literal(s) => s.has_trailing_slash(),
            PathSegment::Variable(s) => s.has_trailing_slash(),
            PathSegment::Wildcard(s) => s.has_trailing_slash(),
            PathSegment::Compound(s) => s.has_trailing_slash(),
        }
    }

    /// Number of values this segment consumes when rendering
    pub fn variable_count(&self) -> usize {
        match self {
            PathSegment::Literal(_) => 0,
            PathSegment::Variable(_) => 1,
            PathSegment::Wildcard(s) => usize::from(s.name().is_some()),
            PathSegment::Compound(s) => s.variable_count(),
        }
    }

    /// Tests one already-unescaped segment, binding values into `sink`
    pub fn matches(&self, candidate: &str, sink: Option<&mut dyn BindingSink>) -> bool {
        match self {
            PathSegment::Literal(s) => s.matches(candidate),
            PathSegment::Variable(s) => s.matches(candidate, sink),
            PathSegment::Wildcard(s) => s.matches(candidate, sink),
            PathSegment::Compound(s) => s.matches(candidate, sink),
        }
    }

    /// Appends this segment rendered from pre-escaped `values`
    ///
    /// Returns the values left over for the following segments.
    pub fn render<'v, S: AsRef<str>>(
        &self,
        values: &'v [S],
        out: &mut String,
    ) -> std::result::Result<&'v [S], ContractViolation> {
        match self {
            PathSegment::Literal(s) => {
                s.render(out);
                Ok(values)
            }
            PathSegment::Variable(s) => s.render(values, out),
            PathSegment::Wildcard(s) => s.render(values, out),
            PathSegment::Compound(s) => s.render(values, out),
        }
    }

    /// Same structure and literal text; variable names are not compared
    pub fn is_equivalent_to(&self, other: &PathSegment, ignore_trailing_slash: bool) -> bool {
        match (self, other) {
            (PathSegment::Literal(a), PathSegment::Literal(b)) => {
                a.is_equivalent_to(b, ignore_trailing_slash)
            }
            (PathSegment::Variable(a), PathSegment::Variable(b)) => slash_compatible(
                a.has_trailing_slash(),
                b.has_trailing_slash(),
                ignore_trailing_slash,
            ),
            (PathSegment::Wildcard(_), PathSegment::Wildcard(_)) => true,
            (PathSegment::Compound(a), PathSegment::Compound(b)) => {
                a.is_equivalent_to(b, ignore_trailing_slash)
            }
            _ => false,
        }
    }

    /// Preference order between two segments in the same position
    ///
    /// `Less` means `self` is more specific and is tried first.
    pub fn compare_specificity(&self, other: &PathSegment) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| match (self, other) {
                (PathSegment::Literal(a), PathSegment::Literal(b)) => {
                    cmp_ignore_case(a.value().chars(), b.value().chars())
                }
                (PathSegment::Compound(a), PathSegment::Compound(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::VariableTable;

    fn parse(text: &str) -> Result<PathSegment> {
        let mut table = VariableTable::new();
        PathSegment::parse(text, false, &mut SegmentContext::new(text, &mut table))
    }

    #[test]
    fn test_classify_literal() {
        assert_eq!(parse("about").unwrap().kind(), SegmentKind::Literal);
    }

    #[test]
    fn test_classify_variable() {
        assert_eq!(parse("{id}").unwrap().kind(), SegmentKind::Variable);
        assert_eq!(parse("{page=1}").unwrap().kind(), SegmentKind::Variable);
    }

    #[test]
    fn test_classify_wildcard() {
        assert_eq!(parse("*").unwrap().kind(), SegmentKind::Wildcard);
        assert_eq!(parse("{*rest}").unwrap().kind(), SegmentKind::Wildcard);
    }

    #[test]
    fn test_classify_compound() {
        assert_eq!(parse("foo{x}").unwrap().kind(), SegmentKind::Compound);
        assert_eq!(parse("{x}.{y}").unwrap().kind(), SegmentKind::Compound);
    }

    #[test]
    fn test_classify_rejects_empty_variable() {
        let err = parse("{}").unwrap_err();
        assert_eq!(err.format_reason(), Some(&FormatReason::EmptyVariable));
        let err = parse("{*}").unwrap_err();
        assert_eq!(err.format_reason(), Some(&FormatReason::EmptyVariable));
    }

    #[test]
    fn test_classify_rejects_stray_brace_in_literal() {
        let err = parse("ab}c").unwrap_err();
        assert_eq!(err.format_reason(), Some(&FormatReason::StrayClosingBrace));
    }

    #[test]
    fn test_kind_precedence() {
        assert!(SegmentKind::Literal < SegmentKind::Compound);
        assert!(SegmentKind::Compound < SegmentKind::Variable);
        assert!(SegmentKind::Variable < SegmentKind::Wildcard);
    }

    #[test]
    fn test_compare_specificity_by_kind() {
        let literal = parse("users").unwrap();
        let compound = parse("u{x}").unwrap();
        let variable = parse("{x}").unwrap();
        let wildcard = parse("*").unwrap();

        assert_eq!(literal.compare_specificity(&compound), Ordering::Less);
        assert_eq!(compound.compare_specificity(&variable), Ordering::Less);
        assert_eq!(variable.compare_specificity(&wildcard), Ordering::Less);
        assert_eq!(wildcard.compare_specificity(&literal), Ordering::Greater);
    }

    #[test]
    fn test_equivalence_ignores_variable_names() {
        assert!(parse("{a}").unwrap().is_equivalent_to(&parse("{b}").unwrap(), false));
        assert!(parse("x{a}").unwrap().is_equivalent_to(&parse("X{b}").unwrap(), false));
        assert!(!parse("{a}").unwrap().is_equivalent_to(&parse("a").unwrap(), true));
    }

    #[test]
    fn test_variable_count() {
        assert_eq!(parse("users").unwrap().variable_count(), 0);
        assert_eq!(parse("{id}").unwrap().variable_count(), 1);
        assert_eq!(parse("*").unwrap().variable_count(), 0);
        assert_eq!(parse("{*rest}").unwrap().variable_count(), 1);
        assert_eq!(parse("{a}-{b}-{c}").unwrap().variable_count(), 3);
    }
}
