//! Path utilities for normalization and segment splitting
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// **Pure function**: No side effects, deterministic output.
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not be empty
///
/// A single trailing `/` is canonical: templates record it per segment.
///
/// # Examples
///
/// ```
/// use uri_template::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/about"));
/// assert!(is_valid_path("/users/{id}/"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about")); // Missing leading /
/// assert!(!is_valid_path("/about//page")); // Double //
/// assert!(!is_valid_path("/about\\page")); // Backslash
/// ```
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.starts_with('/') && !path.contains("//") && !path.contains('\\')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
///
/// - Missing leading slash: `users/{id}` → `/users/{id}`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Trailing slash is kept (collapsed to one): `/path//` → `/path/`
///
/// # Examples
///
/// ```
/// use uri_template::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about");
/// assert!(matches!(path, Cow::Borrowed("/about")));
///
/// assert_eq!(normalize_path("users\\{id}"), "/users/{id}");
/// assert_eq!(normalize_path("/path//to///page//"), "/path/to/page/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let unified = path.replace('\\', "/");
    let trailing_slash = unified.ends_with('/');
    let joined = unified
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    match (joined.is_empty(), trailing_slash) {
        (true, _) => Cow::Borrowed("/"),
        (false, true) => Cow::Owned(format!("/{}/", joined)),
        (false, false) => Cow::Owned(format!("/{}", joined)),
    }
}

/// Whether a normalized path ends with a slash after at least one segment
pub fn has_trailing_slash(normalized: &str) -> bool {
    normalized.len() > 1 && normalized.ends_with('/')
}

/// Lazily yields `(offset, segment)` for each non-empty segment
///
/// Offsets are byte positions into `normalized`, used for error context.
///
/// ```
/// use uri_template::path::segments;
///
/// let found: Vec<(usize, &str)> = segments("/a/{b}/c/").collect();
/// assert_eq!(found, vec![(1, "a"), (3, "{b}"), (7, "c")]);
/// ```
pub fn segments(normalized: &str) -> impl Iterator<Item = (usize, &str)> {
    normalized
        .split('/')
        .scan(0usize, |offset, segment| {
            let start = *offset;
            *offset += segment.len() + 1;
            Some((start, segment))
        })
        .filter(|(_, segment)| !segment.is_empty())
}

/// Splits an incoming request path and percent-decodes each segment
///
/// Returns `None` when a segment does not decode to valid UTF-8; such a
/// path cannot match any template.
///
/// ```
/// use uri_template::path::decode_segments;
///
/// let decoded = decode_segments("/files/a%20b//c.txt").unwrap();
/// assert_eq!(decoded, vec!["files", "a b", "c.txt"]);
/// ```
pub fn decode_segments(path: &str) -> Option<Vec<Cow<'_, str>>> {
    path.split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .map(|segment| urlencoding::decode(segment).ok())
        .collect()
}
