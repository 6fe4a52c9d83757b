//! Destinations for values extracted during matching

use std::collections::HashMap;

/// Receives `(variable, value)` pairs as a segment is matched
///
/// Matching only writes into a sink after the whole segment is known to
/// match, so a failed match leaves the sink untouched.
pub trait BindingSink {
    fn bind(&mut self, name: &str, value: &str);
}

/// Map sink: a repeated name keeps the last value bound
impl BindingSink for HashMap<String, String> {
    fn bind(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

/// Ordered sink: keeps every binding, repeats included
impl BindingSink for Vec<(String, String)> {
    fn bind(&mut self, name: &str, value: &str) {
        self.push((name.to_string(), value.to_string()));
    }
}
