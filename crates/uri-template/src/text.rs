//! Ordinal, case-insensitive text comparison
//!
//! Each character is folded to its single-character uppercase form and
//! compared by code point, so the result does not depend on locale. A
//! character whose uppercase form expands (`ß` → `SS`) is kept as is.

use std::cmp::Ordering;

/// Compares two character sequences ignoring case
pub(crate) fn cmp_ignore_case<A, B>(a: A, b: B) -> Ordering
where
    A: Iterator<Item = char>,
    B: Iterator<Item = char>,
{
    a.map(fold).cmp(b.map(fold))
}

fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    cmp_ignore_case(a.chars(), b.chars()) == Ordering::Equal
}
