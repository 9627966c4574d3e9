//! Integration tests for the lazy result set
//!
//! Tests on-demand production, memoized replay and lazy products.

use std::cell::Cell;
use std::rc::Rc;

use nasin_foundation::{Error, LazyResultSet, ResultSet};

/// A set of `0..n` that counts how many items were produced.
fn counted(n: i32, produced: &Rc<Cell<usize>>) -> LazyResultSet<i32> {
    let produced = Rc::clone(produced);
    LazyResultSet::new((0..n).map(move |value| {
        produced.set(produced.get() + 1);
        Ok(value)
    }))
}

// =============================================================================
// On-Demand Production
// =============================================================================

#[test]
fn first_value_produces_one_item() {
    let produced = Rc::new(Cell::new(0));
    let set = counted(100, &produced);
    assert_eq!(set.first_value(), Some(0));
    assert_eq!(produced.get(), 1);
}

#[test]
fn replay_does_not_rerun_producer() {
    let produced = Rc::new(Cell::new(0));
    let set = counted(5, &produced);
    let first: Vec<i32> = set.values().collect();
    let clone = set.clone();
    let second: Vec<i32> = clone.values().collect();
    assert_eq!(first, second);
    assert_eq!(produced.get(), 5);
}

#[test]
fn map_and_filter_stay_lazy() {
    let produced = Rc::new(Cell::new(0));
    let set = counted(100, &produced)
        .map(|n| n * 3)
        .filter(|n| Ok(n % 2 == 0));
    assert_eq!(set.values().take(2).collect::<Vec<_>>(), vec![0, 6]);
    assert_eq!(produced.get(), 3);
}

#[test]
fn defer_waits_for_first_pull() {
    let built = Rc::new(Cell::new(false));
    let flag = Rc::clone(&built);
    let set = LazyResultSet::defer(move || {
        flag.set(true);
        LazyResultSet::from_values(vec![1, 2])
    });
    assert!(!built.get());
    assert!(set.has_values());
    assert!(built.get());
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn collect_matches_eager_policy() {
    let set = LazyResultSet::new(
        vec![Err(Error::filtered("bad")), Ok(1), Err(Error::filtered("worse"))].into_iter(),
    );
    assert_eq!(set.collect(), ResultSet::single(1));

    let failing: LazyResultSet<i32> = LazyResultSet::new(
        vec![Err(Error::filtered("bad")), Err(Error::filtered("bad"))].into_iter(),
    );
    assert_eq!(failing.deduplicate_errors().collect().errors().len(), 1);
}

#[test]
fn empty_producer_collects_to_placeholder() {
    let set: LazyResultSet<i32> = LazyResultSet::from_values(Vec::new());
    assert!(set.is_empty());
    assert!(set.collect().errors()[0].is_placeholder());
}

#[test]
fn from_eager_set() {
    let set = LazyResultSet::from(ResultSet::from_values(vec![1, 2, 3]));
    assert_eq!(set.values().collect::<Vec<_>>(), vec![1, 2, 3]);
}

// =============================================================================
// Products
// =============================================================================

#[test]
fn combine_all_is_odometer_ordered() {
    let set = LazyResultSet::combine_all(vec![
        LazyResultSet::from_values(vec![1, 2]),
        LazyResultSet::from_values(vec![3, 4]),
    ]);
    let combinations: Vec<Vec<i32>> = set.values().collect();
    assert_eq!(
        combinations,
        vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]
    );
}

#[test]
fn combine_all_reports_first_failing_input() {
    let set = LazyResultSet::combine_all(vec![
        LazyResultSet::from_values(vec![1]),
        LazyResultSet::error(Error::filtered("second failed")),
        LazyResultSet::error(Error::filtered("third failed")),
    ]);
    let errors = set.collect();
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(errors.errors()[0].to_string(), "second failed");
}

#[test]
fn combine_first_pair_is_cheap() {
    let produced = Rc::new(Cell::new(0));
    let left = counted(50, &produced);
    let right = LazyResultSet::from_values(vec!['a', 'b']);
    assert_eq!(left.combine(&right).first_value(), Some((0, 'a')));
    assert!(produced.get() <= 2);
}
