//! Greedy, non-backtracking matching of a candidate segment
//!
//! The scan cursor is a local slice (`rest`) rather than state on the
//! pattern, so a compiled segment can be matched from many threads at once.

use super::CompoundSegment;
use crate::binding::BindingSink;

impl CompoundSegment {
    /// Tests an already-unescaped segment against the pattern
    ///
    /// When `sink` is supplied and the candidate matches, one binding per
    /// pair is written in declaration order. On a failed match the sink is
    /// left untouched. Bound values are never empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use uri_template::{CompoundSegment, SegmentContext, VariableTable};
    ///
    /// let mut vars = VariableTable::new();
    /// let seg = CompoundSegment::compile("foo{x}bar", false, &mut SegmentContext::new("foo{x}bar", &mut vars)).unwrap();
    ///
    /// let mut bindings: HashMap<String, String> = HashMap::new();
    /// assert!(seg.matches("fooXXbar", Some(&mut bindings)));
    /// assert_eq!(bindings["x"], "XX");
    /// assert!(!seg.matches("foobar", None));
    /// ```
    pub fn matches(&self, candidate: &str, sink: Option<&mut dyn BindingSink>) -> bool {
        match sink {
            None => self.scan(candidate, |_, _| {}),
            Some(sink) => {
                self.scan(candidate, |_, _| {})
                    && self.scan(candidate, |name, value| sink.bind(name, value))
            }
        }
    }

    /// Walks the candidate, reporting each `(name, value)` as it is found
    ///
    /// Returns `false` on the first violation; values reported before that
    /// point are not a match.
    fn scan<'c>(&self, candidate: &'c str, mut emit: impl FnMut(&str, &'c str)) -> bool {
        let Some(mut rest) = candidate.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let Some((last, leading)) = self.pairs.split_last() else {
            return false;
        };

        for pair in leading {
            // the literal must start strictly after the cursor
            let Some(first) = rest.chars().next() else {
                return false;
            };
            let skip = first.len_utf8();
            let Some(found) = rest[skip..].find(pair.literal.as_str()) else {
                return false;
            };
            let end = skip + found;
            emit(&pair.name, &rest[..end]);
            rest = &rest[end + pair.literal.len()..];
        }

        let value = if last.literal.is_empty() {
            rest
        } else {
            match rest.strip_suffix(last.literal.as_str()) {
                Some(value) => value,
                None => return false,
            }
        };
        if value.is_empty() {
            return false;
        }
        emit(&last.name, value);
        true
    }
}
