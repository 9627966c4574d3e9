//! The eager result set: every simultaneously valid value, or every error.
//!
//! A [`ResultSet`] never holds values and errors at the same time. Operations
//! that run a fallible step per value follow one aggregation policy: if at
//! least one value survives, the errors raised by its siblings are dropped;
//! only when every value fails does the set become the union of their errors.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::non_empty::NonEmpty;

/// Zero, one or many successful values, or a non-empty set of errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultSet<T> {
    /// Every value that is valid so far, in derivation order.
    Values(NonEmpty<T>),
    /// Every error raised by the attempted derivations.
    Errors(NonEmpty<Error>),
}

impl<T> ResultSet<T> {
    /// Creates a set holding one value.
    #[must_use]
    pub fn single(value: T) -> Self {
        Self::Values(NonEmpty::new(value))
    }

    /// Creates a set from a list of values.
    ///
    /// An empty list becomes an error set holding the "no error provided"
    /// placeholder.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        match NonEmpty::from_vec(values) {
            Some(values) => Self::Values(values),
            None => Self::error(Error::no_error_provided()),
        }
    }

    /// Creates a set holding one error.
    #[must_use]
    pub fn error(error: Error) -> Self {
        Self::Errors(NonEmpty::new(error))
    }

    /// Creates a set from a list of errors; an empty list becomes the
    /// placeholder.
    #[must_use]
    pub fn from_errors(errors: Vec<Error>) -> Self {
        match NonEmpty::from_vec(errors) {
            Some(errors) => Self::Errors(errors),
            None => Self::error(Error::no_error_provided()),
        }
    }

    /// Returns true if every derivation failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Errors(_))
    }

    /// Returns true if at least one derivation succeeded.
    #[must_use]
    pub fn has_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Returns the values, or an empty slice for an error set.
    #[must_use]
    pub fn values(&self) -> &[T] {
        match self {
            Self::Values(values) => values,
            Self::Errors(_) => &[],
        }
    }

    /// Returns the errors, or an empty slice for a value set.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Values(_) => &[],
            Self::Errors(errors) => errors,
        }
    }

    /// Consumes the set, returning its values (empty for an error set).
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        match self {
            Self::Values(values) => values.into_vec(),
            Self::Errors(_) => Vec::new(),
        }
    }

    /// Converts into a plain `Result`.
    ///
    /// # Errors
    /// Returns the error list when every derivation failed.
    pub fn into_result(self) -> std::result::Result<NonEmpty<T>, NonEmpty<Error>> {
        match self {
            Self::Values(values) => Ok(values),
            Self::Errors(errors) => Err(errors),
        }
    }

    /// Applies an infallible function to every value.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultSet<U> {
        match self {
            Self::Values(values) => ResultSet::Values(values.map(f)),
            Self::Errors(errors) => ResultSet::Errors(errors),
        }
    }

    /// Applies a fallible function to every value.
    ///
    /// Failing values are dropped when any value succeeds; if all fail the
    /// result is the union of their errors.
    #[must_use]
    pub fn try_map<U>(self, mut f: impl FnMut(T) -> Result<U>) -> ResultSet<U> {
        match self {
            Self::Values(values) => {
                let mut collector = Collector::new();
                for value in values {
                    collector.push_result(f(value));
                }
                collector.finish()
            }
            Self::Errors(errors) => ResultSet::Errors(errors),
        }
    }

    /// Keeps the values accepted by `predicate`, which may reject a value
    /// with a descriptive error instead of `false`.
    #[must_use]
    pub fn filter(self, mut predicate: impl FnMut(&T) -> Result<bool>) -> Self {
        match self {
            Self::Values(values) => {
                let mut collector = Collector::new();
                for value in values {
                    match predicate(&value) {
                        Ok(true) => collector.push_value(value),
                        Ok(false) => {}
                        Err(error) => collector.push_error(error),
                    }
                }
                collector.finish()
            }
            Self::Errors(errors) => Self::Errors(errors),
        }
    }

    /// Runs `f` on every value and flattens the resulting sets.
    #[must_use]
    pub fn flat_map<U>(self, mut f: impl FnMut(T) -> ResultSet<U>) -> ResultSet<U> {
        match self {
            Self::Values(values) => {
                let mut collector = Collector::new();
                for value in values {
                    collector.absorb(f(value));
                }
                collector.finish()
            }
            Self::Errors(errors) => ResultSet::Errors(errors),
        }
    }

    /// Unions several sets: all values if any set has values, otherwise all
    /// errors.
    #[must_use]
    pub fn concat(sets: impl IntoIterator<Item = Self>) -> Self {
        let mut collector = Collector::new();
        for set in sets {
            collector.absorb(set);
        }
        collector.finish()
    }

    /// Stable sort of the values; an error set is returned unchanged.
    #[must_use]
    pub fn sort_by(self, compare: impl FnMut(&T, &T) -> Ordering) -> Self {
        match self {
            Self::Values(mut values) => {
                values.sort_by(compare);
                Self::Values(values)
            }
            errors @ Self::Errors(_) => errors,
        }
    }

    /// Stable sort of the values by a derived key.
    #[must_use]
    pub fn sort_by_key<K: Ord>(self, mut key: impl FnMut(&T) -> K) -> Self {
        self.sort_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Removes errors whose message was already reported.
    #[must_use]
    pub fn deduplicate_errors(self) -> Self {
        match self {
            Self::Errors(errors) => {
                let first = errors.first().clone();
                let mut seen = HashSet::new();
                let unique = errors.retain(|error| seen.insert(error.to_string()));
                Self::Errors(unique.unwrap_or_else(|| NonEmpty::new(first)))
            }
            values @ Self::Values(_) => values,
        }
    }

    /// Cartesian product with another set.
    ///
    /// If either side is an error set the result is that side's errors, the
    /// left side taking precedence: a missing component is reported as-is
    /// rather than merged with unrelated failures.
    #[must_use]
    pub fn combine<U>(self, other: ResultSet<U>) -> ResultSet<(T, U)>
    where
        T: Clone,
        U: Clone,
    {
        match (self, other) {
            (Self::Errors(errors), _) | (_, ResultSet::Errors(errors)) => ResultSet::Errors(errors),
            (Self::Values(left), ResultSet::Values(right)) => {
                let mut pairs = Vec::with_capacity(left.len() * right.len());
                for l in &left {
                    for r in &right {
                        pairs.push((l.clone(), r.clone()));
                    }
                }
                ResultSet::from_values(pairs)
            }
        }
    }

    /// Cartesian product of any number of sets.
    ///
    /// The first wholly failing input decides the errors. An empty input
    /// yields a single empty combination.
    #[must_use]
    pub fn combine_all(sets: impl IntoIterator<Item = Self>) -> ResultSet<Vec<T>>
    where
        T: Clone,
    {
        let mut combinations: Vec<Vec<T>> = vec![Vec::new()];
        for set in sets {
            match set {
                Self::Errors(errors) => return ResultSet::Errors(errors),
                Self::Values(values) => {
                    let mut next = Vec::with_capacity(combinations.len() * values.len());
                    for prefix in &combinations {
                        for value in &values {
                            let mut combination = prefix.clone();
                            combination.push(value.clone());
                            next.push(combination);
                        }
                    }
                    combinations = next;
                }
            }
        }
        ResultSet::from_values(combinations)
    }
}

impl<T> From<Result<T>> for ResultSet<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::single(value),
            Err(error) => Self::error(error),
        }
    }
}

impl<T> FromIterator<Result<T>> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = Result<T>>>(iter: I) -> Self {
        let mut collector = Collector::new();
        for item in iter {
            collector.push_result(item);
        }
        collector.finish()
    }
}

/// Accumulates values and errors under the result-set aggregation policy.
#[derive(Debug)]
pub struct Collector<T> {
    values: Vec<T>,
    errors: Vec<Error>,
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collector<T> {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Records a successful value.
    pub fn push_value(&mut self, value: T) {
        self.values.push(value);
        self.errors.clear();
    }

    /// Records an error. Ignored once a value has been recorded.
    pub fn push_error(&mut self, error: Error) {
        if self.values.is_empty() {
            self.errors.push(error);
        }
    }

    /// Records either outcome.
    pub fn push_result(&mut self, result: Result<T>) {
        match result {
            Ok(value) => self.push_value(value),
            Err(error) => self.push_error(error),
        }
    }

    /// Records every value or error of a set.
    pub fn absorb(&mut self, set: ResultSet<T>) {
        match set {
            ResultSet::Values(values) => {
                self.errors.clear();
                self.values.extend(values);
            }
            ResultSet::Errors(errors) => {
                if self.values.is_empty() {
                    self.errors.extend(errors);
                }
            }
        }
    }

    /// Returns true if a value has been recorded.
    #[must_use]
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Builds the final set.
    #[must_use]
    pub fn finish(self) -> ResultSet<T> {
        match NonEmpty::from_vec(self.values) {
            Some(values) => ResultSet::Values(values),
            None => ResultSet::from_errors(self.errors),
        }
    }
}
