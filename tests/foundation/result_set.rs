//! Integration tests for the eager result set
//!
//! Tests the aggregation policy shared by every fallible operation.

use nasin_foundation::{Collector, Error, ErrorKind, ResultSet};

fn evens_only(n: i32) -> nasin_foundation::Result<i32> {
    if n % 2 == 0 {
        Ok(n)
    } else {
        Err(Error::filtered(format!("{n} is odd")))
    }
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn empty_values_become_placeholder() {
    let set: ResultSet<i32> = ResultSet::from_values(Vec::new());
    assert!(set.is_error());
    assert!(set.errors()[0].is_placeholder());
}

#[test]
fn values_and_errors_are_exclusive() {
    let values = ResultSet::from_values(vec![1, 2]);
    assert!(values.has_values());
    assert!(values.errors().is_empty());

    let errors: ResultSet<i32> = ResultSet::error(Error::filtered("nope"));
    assert!(errors.is_error());
    assert!(errors.values().is_empty());
}

// =============================================================================
// Aggregation Policy
// =============================================================================

#[test]
fn success_suppresses_sibling_errors() {
    let set = ResultSet::from_values(vec![1, 2, 3, 4]).try_map(evens_only);
    assert_eq!(set.values(), &[2, 4]);
}

#[test]
fn all_failures_are_unioned() {
    let set = ResultSet::from_values(vec![1, 3]).try_map(evens_only);
    let messages: Vec<String> = set.errors().iter().map(ToString::to_string).collect();
    assert_eq!(messages, vec!["1 is odd".to_string(), "3 is odd".to_string()]);
}

#[test]
fn filter_can_explain_rejection() {
    let set = ResultSet::from_values(vec![1, 2]).filter(|n| {
        if *n > 5 {
            Err(Error::filtered("too big"))
        } else {
            Ok(*n == 2)
        }
    });
    assert_eq!(set.values(), &[2]);

    let rejected = ResultSet::from_values(vec![9]).filter(|_| Err(Error::filtered("too big")));
    assert!(matches!(rejected.errors()[0].kind, ErrorKind::FilteredOut(_)));
}

#[test]
fn silent_rejection_of_everything_is_placeholder() {
    let set = ResultSet::from_values(vec![1, 2]).filter(|_| Ok(false));
    assert!(set.errors()[0].is_placeholder());
}

#[test]
fn flat_map_keeps_order() {
    let set = ResultSet::from_values(vec![1, 2]).flat_map(|n| ResultSet::from_values(vec![n, n * 10]));
    assert_eq!(set.values(), &[1, 10, 2, 20]);
}

#[test]
fn concat_prefers_values() {
    let set = ResultSet::concat(vec![
        ResultSet::error(Error::filtered("a")),
        ResultSet::single(7),
        ResultSet::error(Error::filtered("b")),
    ]);
    assert_eq!(set.values(), &[7]);
}

#[test]
fn deduplicate_errors_by_message() {
    let set: ResultSet<i32> = ResultSet::from_errors(vec![
        Error::filtered("same").with_rule("first"),
        Error::filtered("same").with_rule("second"),
        Error::filtered("other"),
    ])
    .deduplicate_errors();
    assert_eq!(set.errors().len(), 2);
}

// =============================================================================
// Products
// =============================================================================

#[test]
fn combine_all_is_cartesian() {
    let set = ResultSet::combine_all(vec![
        ResultSet::from_values(vec![1, 2]),
        ResultSet::from_values(vec![3, 4, 5]),
    ]);
    assert_eq!(set.values().len(), 6);
    assert_eq!(set.values()[0], vec![1, 3]);
    assert_eq!(set.values()[5], vec![2, 5]);
}

#[test]
fn combine_reports_failing_side() {
    let left: ResultSet<i32> = ResultSet::single(1);
    let right: ResultSet<i32> = ResultSet::error(Error::filtered("right failed"));
    let set = left.combine(right);
    assert_eq!(set.errors()[0].to_string(), "right failed");
}

#[test]
fn combine_all_of_nothing_is_one_empty_combination() {
    let set: ResultSet<Vec<i32>> = ResultSet::combine_all(Vec::<ResultSet<i32>>::new());
    assert_eq!(set.values(), &[Vec::<i32>::new()]);
}

// =============================================================================
// Collector
// =============================================================================

#[test]
fn collector_drops_errors_once_a_value_arrives() {
    let mut collector = Collector::new();
    collector.push_error(Error::filtered("early"));
    collector.push_value(1);
    collector.push_error(Error::filtered("late"));
    assert!(collector.has_values());
    assert_eq!(collector.finish().values(), &[1]);
}

#[test]
fn empty_collector_finishes_with_placeholder() {
    let collector: Collector<i32> = Collector::new();
    assert!(collector.finish().errors()[0].is_placeholder());
}
