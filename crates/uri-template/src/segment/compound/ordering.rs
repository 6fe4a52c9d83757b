//! Shape classification and the preference order between compound segments
//!
//! Two compound segments in the same position can both match one input
//! (`food{x}ar` and `foo{x}bar` both accept `foodbar`). The aggregator needs a
//! deterministic order to try them in and to tell real duplicates apart.
//!
//! Comparing literals pairwise cannot give a consistent total order across
//! arbitrary prefix/suffix lengths, so the order canonically prefers the
//! more specific literal on one fixed side. Prefix and suffix are not
//! symmetric.
//!
//! # Order (earlier = preferred)
//!
//! 1. Class: `PrefixAndSuffix` < `PrefixOnly` < `SuffixOnly` < `Neither`
//! 2. `PrefixAndSuffix` / `PrefixOnly`: ordinally greater prefix first,
//!    ignoring case (`PrefixAndSuffix` then compares suffixes like rule 3)
//! 3. `SuffixOnly`: greater suffix first, compared on reversed characters
//! 4. More variables first
//! 5. Remaining literals and the trailing slash, so that only equivalent
//!    segments compare `Equal`

use std::cmp::Ordering;

use super::CompoundSegment;
use crate::text::cmp_ignore_case;

/// Which ends of a compound segment are anchored by literal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeClass {
    PrefixAndSuffix,
    PrefixOnly,
    SuffixOnly,
    Neither,
}

impl ShapeClass {
    pub fn of(prefix: &str, suffix: &str) -> Self {
        match (prefix.is_empty(), suffix.is_empty()) {
            (false, false) => ShapeClass::PrefixAndSuffix,
            (false, true) => ShapeClass::PrefixOnly,
            (true, false) => ShapeClass::SuffixOnly,
            (true, true) => ShapeClass::Neither,
        }
    }

    const fn index(self) -> usize {
        match self {
            ShapeClass::PrefixAndSuffix => 0,
            ShapeClass::PrefixOnly => 1,
            ShapeClass::SuffixOnly => 2,
            ShapeClass::Neither => 3,
        }
    }

    /// Precedence between two classes, from the fixed lookup table
    pub fn precedence(self, other: ShapeClass) -> Ordering {
        CLASS_PRECEDENCE[self.index()][other.index()]
    }
}

use Ordering::{Equal as E, Greater as G, Less as L};

/// `CLASS_PRECEDENCE[a][b]` orders class `a` against class `b`
const CLASS_PRECEDENCE: [[Ordering; 4]; 4] = [
    //  P&S PO SO  N
    [E, L, L, L], // PrefixAndSuffix
    [G, E, L, L], // PrefixOnly
    [G, G, E, L], // SuffixOnly
    [G, G, G, E], // Neither
];

/// Greater prefix sorts first
fn compare_prefix(a: &CompoundSegment, b: &CompoundSegment) -> Ordering {
    cmp_ignore_case(b.prefix.chars(), a.prefix.chars())
}

/// Greater reversed suffix sorts first
fn compare_suffix(a: &CompoundSegment, b: &CompoundSegment) -> Ordering {
    cmp_ignore_case(b.suffix().chars().rev(), a.suffix().chars().rev())
}

/// More variables sort first
fn compare_count(a: &CompoundSegment, b: &CompoundSegment) -> Ordering {
    b.pairs.len().cmp(&a.pairs.len())
}

impl CompoundSegment {
    /// Ranks two patterns by rules 1-4
    ///
    /// `Equal` here means neither is more specific; the two may still differ
    /// in their inner literals. Use [`Ord::cmp`] for a total order.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use uri_template::{CompoundSegment, SegmentContext, VariableTable};
    ///
    /// fn compile(text: &str) -> CompoundSegment {
    ///     let mut vars = VariableTable::new();
    ///     CompoundSegment::compile(text, false, &mut SegmentContext::new(text, &mut vars)).unwrap()
    /// }
    ///
    /// let food = compile("food{x}ar");
    /// let foo = compile("foo{x}bar");
    /// assert_eq!(food.compare_preference(&foo), Ordering::Less);
    /// ```
    pub fn compare_preference(&self, other: &CompoundSegment) -> Ordering {
        self.class.precedence(other.class).then_with(|| {
            let literal = match self.class {
                ShapeClass::PrefixAndSuffix => {
                    compare_prefix(self, other).then_with(|| compare_suffix(self, other))
                }
                ShapeClass::PrefixOnly => compare_prefix(self, other),
                ShapeClass::SuffixOnly => compare_suffix(self, other),
                ShapeClass::Neither => Ordering::Equal,
            };
            literal.then_with(|| compare_count(self, other))
        })
    }

    /// Structural tie-break applied after [`compare_preference`](Self::compare_preference)
    fn compare_structure(&self, other: &CompoundSegment) -> Ordering {
        cmp_ignore_case(self.prefix.chars(), other.prefix.chars())
            .then_with(|| {
                self.pairs
                    .iter()
                    .zip(&other.pairs)
                    .map(|(a, b)| cmp_ignore_case(a.literal.chars(), b.literal.chars()))
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.trailing_slash.cmp(&other.trailing_slash))
    }
}

/// Equivalent segments, trailing slash included
impl PartialEq for CompoundSegment {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent_to(other, false)
    }
}

impl Eq for CompoundSegment {}

impl PartialOrd for CompoundSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total preference order: `Less` is tried first, `Equal` only for equivalent segments
impl Ord for CompoundSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_preference(other)
            .then_with(|| self.compare_structure(other))
    }
}
