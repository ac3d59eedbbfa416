//! Domain-specific assertion macros for liita harnesses.
//!
//! Failure messages print the whole query text so it is clear which clause
//! went missing or moved.

/// Assert that `needle` occurs in the query text.
///
/// ```rust
/// assert_has_clause!(query, "FILTER regex(?wrp, \"^am\", \"i\")");
/// ```
#[macro_export]
macro_rules! assert_has_clause {
    ($query:expr, $needle:expr) => {{
        let query = &$query;
        let text: &str = query.as_ref();
        let needle: &str = $needle;
        if !text.contains(needle) {
            panic!(
                "assert_has_clause! failed:\n  missing: {:?}\n  query:\n{}",
                needle, text
            );
        }
    }};
}

/// Assert that `needle` does not occur in the query text.
#[macro_export]
macro_rules! assert_no_clause {
    ($query:expr, $needle:expr) => {{
        let query = &$query;
        let text: &str = query.as_ref();
        let needle: &str = $needle;
        if text.contains(needle) {
            panic!(
                "assert_no_clause! failed:\n  unexpected: {:?}\n  query:\n{}",
                needle, text
            );
        }
    }};
}

/// Assert that `first` occurs in the query text before `second`.
///
/// ```rust
/// assert_clause_before!(query, "hasGender", "hasPOS");
/// ```
#[macro_export]
macro_rules! assert_clause_before {
    ($query:expr, $first:expr, $second:expr) => {{
        let query = &$query;
        let text: &str = query.as_ref();
        let first: &str = $first;
        let second: &str = $second;
        match (text.find(first), text.find(second)) {
            (Some(a), Some(b)) if a < b => {}
            (Some(a), Some(b)) => panic!(
                "assert_clause_before! failed: {:?} at {} is not before {:?} at {}\n  query:\n{}",
                first, a, second, b, text
            ),
            (a, b) => panic!(
                "assert_clause_before! failed: {:?} found={} {:?} found={}\n  query:\n{}",
                first,
                a.is_some(),
                second,
                b.is_some(),
                text
            ),
        }
    }};
}

/// Assert the written representations of a list of records, in order.
///
/// ```rust
/// assert_forms!(records, ["amare", "ambire"]);
/// ```
#[macro_export]
macro_rules! assert_forms {
    ($records:expr, [$($form:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.wrs.as_str()).collect();
        let expected: Vec<&str> = vec![$($form),*];
        pretty_assertions::assert_eq!(actual, expected, "written representations differ");
    }};
}
