//! Integration tests for uri-template
//!
//! Organized by feature area:
//! - Compound segment compilation and matching
//! - Preference order between compound segments
//! - Whole templates: render then match
//! - Template table registration and lookup

use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cmp::Ordering;
use std::collections::HashMap;
use uri_template::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn compound(text: &str) -> CompoundSegment {
    let mut vars = VariableTable::new();
    CompoundSegment::compile(text, false, &mut SegmentContext::new(text, &mut vars)).unwrap()
}

fn bindings(items: &[(&str, &str)]) -> HashMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Compound Segments
// ============================================================================

#[test]
fn test_compile_prefix_and_suffix() {
    let seg = compound("foo{x}bar");
    assert_eq!(seg.prefix(), "foo");
    assert_eq!(seg.suffix(), "bar");
    assert_eq!(seg.class(), ShapeClass::PrefixAndSuffix);

    let pairs: Vec<(&str, &str)> = seg.pairs().iter().map(|p| (p.name(), p.literal())).collect();
    assert_eq!(pairs, vec![("x", "bar")]);
}

#[test]
fn test_match_prefix_and_suffix() {
    let seg = compound("foo{x}bar");
    let mut found: HashMap<String, String> = HashMap::new();
    assert!(seg.matches("fooXXbar", Some(&mut found)));
    assert_eq!(found, bindings(&[("x", "XX")]));

    let mut empty: HashMap<String, String> = HashMap::new();
    assert!(!seg.matches("foobar", Some(&mut empty)));
    assert!(empty.is_empty());
}

#[test]
fn test_compile_and_match_separated_variables() {
    let seg = compound("{x}.{y}.{z}");
    assert_eq!(seg.prefix(), "");
    assert_eq!(seg.class(), ShapeClass::Neither);

    let pairs: Vec<(&str, &str)> = seg.pairs().iter().map(|p| (p.name(), p.literal())).collect();
    assert_eq!(pairs, vec![("x", "."), ("y", "."), ("z", "")]);

    let mut found: HashMap<String, String> = HashMap::new();
    assert!(seg.matches("a.b.c", Some(&mut found)));
    assert_eq!(found, bindings(&[("x", "a"), ("y", "b"), ("z", "c")]));
}

#[test]
fn test_ordered_sink_keeps_declaration_order() {
    let seg = compound("{y}-{x}");
    let mut found: Vec<(String, String)> = Vec::new();
    assert!(seg.matches("1-2", Some(&mut found)));
    assert_eq!(
        found,
        vec![
            ("y".to_string(), "1".to_string()),
            ("x".to_string(), "2".to_string())
        ]
    );
}

#[rstest]
#[case("abc", FormatReason::NoVariables)]
#[case("a{}", FormatReason::EmptyVariable)]
#[case("a{x", FormatReason::UnterminatedVariable)]
#[case("a{x}{y}", FormatReason::AdjacentVariables("x".to_string()))]
fn test_compile_rejects_malformed(#[case] text: &str, #[case] reason: FormatReason) {
    let mut vars = VariableTable::new();
    let result = CompoundSegment::compile(text, false, &mut SegmentContext::new(text, &mut vars));
    assert_eq!(result.unwrap_err().format_reason(), Some(&reason));
}

// ============================================================================
// Preference Order
// ============================================================================

const SHAPES: [(&str, ShapeClass); 4] = [
    ("a{x}b", ShapeClass::PrefixAndSuffix),
    ("a{x}", ShapeClass::PrefixOnly),
    ("{x}b", ShapeClass::SuffixOnly),
    ("{x}-{y}", ShapeClass::Neither),
];

#[rstest]
fn test_class_precedence(
    #[values(0, 1, 2, 3)] left: usize,
    #[values(0, 1, 2, 3)] right: usize,
) {
    let (a_text, a_class) = SHAPES[left];
    let (b_text, b_class) = SHAPES[right];
    let a = compound(a_text);
    let b = compound(b_text);

    assert_eq!(a.class(), a_class);
    assert_eq!(b.class(), b_class);
    assert_eq!(a.cmp(&b), left.cmp(&right));
    assert_eq!(a_class.precedence(b_class), left.cmp(&right));
}

#[test]
fn test_greater_prefix_sorts_first() {
    let food = compound("food{x}ar");
    let foo = compound("foo{x}bar");
    assert_eq!(food.cmp(&foo), Ordering::Less);
    assert_eq!(foo.cmp(&food), Ordering::Greater);
}

#[test]
fn test_more_variables_sort_first() {
    let three = compound("{x}.{y}.{z}");
    let two = compound("{x}.{y}");
    assert_eq!(three.compare_preference(&two), Ordering::Less);
    assert_eq!(two.compare_preference(&three), Ordering::Greater);
}

#[test]
fn test_order_is_total_and_transitive() {
    let patterns: Vec<CompoundSegment> = [
        "food{x}ar",
        "foo{x}bar",
        "FOO{x}bar",
        "foo{x}",
        "fo{x}",
        "{x}bar",
        "{x}ar",
        "{x}.tar.gz",
        "{x}.gz",
        "{x}.{y}",
        "{x}-{y}",
        "{x}.{y}.{z}",
        "a{x}.{y}",
        "a{x}-{y}",
        "é{x}",
        "É{x}z",
    ]
    .into_iter()
    .map(compound)
    .collect();

    for a in &patterns {
        assert_eq!(a.cmp(a), Ordering::Equal);
        for b in &patterns {
            assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{} vs {}", a.original(), b.original());
            assert_eq!(a.cmp(b) == Ordering::Equal, a.is_equivalent_to(b, false));
            for c in &patterns {
                if a <= b && b <= c {
                    assert!(
                        a <= c,
                        "{} <= {} <= {} but not {0} <= {2}",
                        a.original(),
                        b.original(),
                        c.original()
                    );
                }
            }
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

#[rstest]
#[case("/files/{name}.{ext}", &["report", "pdf"], "/files/report.pdf")]
#[case("/v{major}.{minor}/users/{id}", &["1", "2", "alice"], "/v1.2/users/alice")]
#[case("/search/{term}/page-{n}", &["a b", "3"], "/search/a%20b/page-3")]
#[case("/docs/{*path}", &["guide/intro"], "/docs/guide/intro")]
fn test_render_then_match(#[case] text: &str, #[case] values: &[&str], #[case] expected: &str) {
    init_tracing();
    let template = UriTemplate::parse(text).unwrap();

    let rendered = template.bind_by_position(values).unwrap();
    assert_eq!(rendered, expected);

    let matched = template.match_path(&rendered).unwrap();
    let names: Vec<&str> = template.path_variable_names().collect();
    let expected: HashMap<String, String> = names
        .iter()
        .zip(values)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    assert_eq!(matched, expected);
}

#[test]
fn test_render_contract_violations() {
    let template = UriTemplate::parse("/a/{x}.{y}").unwrap();
    assert!(matches!(
        template.bind_by_position(&["1"]),
        Err(ContractViolation::ValueCountMismatch { expected: 2, supplied: 1 })
    ));

    let values: HashMap<String, &str> = [("x".to_string(), "1")].into_iter().collect();
    assert_eq!(
        template.bind_by_name(&values),
        Err(ContractViolation::MissingVariable("y".to_string()))
    );
}

#[test]
fn test_template_errors_carry_context() {
    let err = UriTemplate::parse("/files/{name}{ext}").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/files/{name}{ext}"), "{message}");
    assert_eq!(
        err.format_reason(),
        Some(&FormatReason::AdjacentVariables("name".to_string()))
    );
}

// ============================================================================
// Template Table
// ============================================================================

#[test]
fn test_table_routes_to_most_specific() {
    init_tracing();
    let mut table = TemplateTable::new();
    table.insert_str("/{*rest}", "fallback").unwrap();
    table.insert_str("/files/{name}", "file").unwrap();
    table.insert_str("/files/{name}.{ext}", "typed").unwrap();
    table.insert_str("/files/{name}.json", "json").unwrap();
    table.insert_str("/files/index.html", "index").unwrap();

    let route = |path: &str| table.match_path(path).map(|m| *m.value);
    assert_eq!(route("/files/index.html"), Some("index"));
    assert_eq!(route("/files/data.json"), Some("json"));
    assert_eq!(route("/files/data.csv"), Some("typed"));
    assert_eq!(route("/files/README"), Some("file"));
    assert_eq!(route("/other/thing"), Some("fallback"));

    let m = table.match_path("/other/thing").unwrap();
    assert_eq!(m.bindings, bindings(&[("rest", "other/thing")]));
}

#[test]
fn test_table_rejects_equivalent_templates() {
    let mut table = TemplateTable::new();
    table.insert_str("/api/v{major}.{minor}", 1).unwrap();

    match table.insert_str("/API/V{a}.{b}", 2) {
        Err(TemplateError::Duplicate { template, existing }) => {
            assert_eq!(template, "/API/V{a}.{b}");
            assert_eq!(existing, "/api/v{major}.{minor}");
        }
        other => panic!("expected duplicate error, got {other:?}"),
    }

    // a different inner literal is not a duplicate
    table.insert_str("/api/v{major}-{minor}", 3).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_table_options_from_toml() {
    let options = TableOptions::from_toml_str(
        r#"
        allow_duplicates = true
        ignore_trailing_slash = false
        "#,
    )
    .unwrap();

    let mut table = TemplateTable::with_options(options);
    table.insert_str("/a/{x}", 1).unwrap();
    table.insert_str("/a/{y}", 2).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_compiled_types_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompoundSegment>();
    assert_send_sync::<PathSegment>();
    assert_send_sync::<UriTemplate>();
    assert_send_sync::<TemplateTable<String>>();
}
