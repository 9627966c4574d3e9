//! The lazy result set.
//!
//! A [`LazyResultSet`] wraps a finite producer of `Result<T>` items behind a
//! shared buffer. Items are produced on demand and kept, so iterating twice
//! (or through a clone) never reruns the producer. Errors and values may be
//! interleaved in the stream; [`LazyResultSet::collect`] applies the same
//! aggregation policy as the eager [`ResultSet`].

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::result_set::{Collector, ResultSet};

type Source<T> = Box<dyn Iterator<Item = Result<T>>>;

struct Producer<T> {
    buffer: Vec<Result<T>>,
    source: Option<Source<T>>,
}

/// A result set whose items are produced on demand.
pub struct LazyResultSet<T> {
    producer: Rc<RefCell<Producer<T>>>,
}

impl<T> Clone for LazyResultSet<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyResultSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let producer = self.producer.borrow();
        f.debug_struct("LazyResultSet")
            .field("buffered", &producer.buffer)
            .field("exhausted", &producer.source.is_none())
            .finish()
    }
}

impl<T: Clone + 'static> LazyResultSet<T> {
    /// Wraps a producer. Nothing is pulled until the set is inspected.
    pub fn new(source: impl Iterator<Item = Result<T>> + 'static) -> Self {
        Self {
            producer: Rc::new(RefCell::new(Producer {
                buffer: Vec::new(),
                source: Some(Box::new(source)),
            })),
        }
    }

    /// Creates a set holding one value.
    #[must_use]
    pub fn single(value: T) -> Self {
        Self::new(std::iter::once(Ok(value)))
    }

    /// Creates a set holding one error.
    #[must_use]
    pub fn error(error: Error) -> Self {
        Self::new(std::iter::once(Err(error)))
    }

    /// Creates a set from a list of values.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        Self::new(values.into_iter().map(Ok))
    }

    /// Defers building the set until its first item is needed.
    pub fn defer(build: impl FnOnce() -> Self + 'static) -> Self {
        Self::new(std::iter::once_with(build).flat_map(|set| set.iter()))
    }

    /// Returns the item at `index`, producing items up to it if needed.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Result<T>> {
        loop {
            if let Some(item) = self.producer.borrow().buffer.get(index) {
                return Some(item.clone());
            }
            if !self.pull() {
                return None;
            }
        }
    }

    /// Produces one more item into the buffer. Returns false once the
    /// producer is exhausted.
    fn pull(&self) -> bool {
        // The source is taken out of the cell so it may inspect other sets
        // sharing this producer's buffer while it runs.
        let Some(mut source) = self.producer.borrow_mut().source.take() else {
            return false;
        };
        let next = source.next();
        let mut producer = self.producer.borrow_mut();
        match next {
            Some(item) => {
                producer.buffer.push(item);
                producer.source = Some(source);
                true
            }
            None => false,
        }
    }

    /// Iterates over every item, values and errors alike.
    #[must_use]
    pub fn iter(&self) -> LazyIter<T> {
        LazyIter {
            set: self.clone(),
            index: 0,
        }
    }

    /// Iterates over the successful values only.
    pub fn values(&self) -> impl Iterator<Item = T> + use<T> {
        self.iter().filter_map(std::result::Result::ok)
    }

    /// Returns true if the producer yields nothing at all. Produces at most
    /// one item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get(0).is_none()
    }

    /// Returns true if at least one value exists. Produces items up to the
    /// first value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.iter().any(|item| item.is_ok())
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<T> {
        self.values().next()
    }

    /// Materializes every item into an eager set.
    #[must_use]
    pub fn collect(&self) -> ResultSet<T> {
        let mut collector = Collector::new();
        for item in self.iter() {
            collector.push_result(item);
        }
        collector.finish()
    }

    /// Applies an infallible function to every value.
    #[must_use]
    pub fn map<U: Clone + 'static>(&self, mut f: impl FnMut(T) -> U + 'static) -> LazyResultSet<U> {
        LazyResultSet::new(self.iter().map(move |item| item.map(&mut f)))
    }

    /// Applies a fallible function to every value.
    #[must_use]
    pub fn try_map<U: Clone + 'static>(
        &self,
        mut f: impl FnMut(T) -> Result<U> + 'static,
    ) -> LazyResultSet<U> {
        LazyResultSet::new(self.iter().map(move |item| item.and_then(&mut f)))
    }

    /// Keeps the values accepted by `predicate`; a predicate error replaces
    /// the value in the stream.
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> Result<bool> + 'static) -> Self {
        Self::new(self.iter().filter_map(move |item| match item {
            Ok(value) => match predicate(&value) {
                Ok(true) => Some(Ok(value)),
                Ok(false) => None,
                Err(error) => Some(Err(error)),
            },
            Err(error) => Some(Err(error)),
        }))
    }

    /// Runs `f` on every value and flattens the resulting sets, in order.
    #[must_use]
    pub fn flat_map<U: Clone + 'static>(
        &self,
        mut f: impl FnMut(T) -> LazyResultSet<U> + 'static,
    ) -> LazyResultSet<U> {
        LazyResultSet::new(self.iter().flat_map(move |item| -> Source<U> {
            match item {
                Ok(value) => Box::new(f(value).iter()),
                Err(error) => Box::new(std::iter::once(Err(error))),
            }
        }))
    }

    /// Chains several sets one after another.
    #[must_use]
    pub fn concat(sets: Vec<Self>) -> Self {
        Self::new(sets.into_iter().flat_map(|set| set.iter()))
    }

    /// Removes errors whose message was already produced.
    #[must_use]
    pub fn deduplicate_errors(&self) -> Self {
        let mut seen = HashSet::new();
        Self::new(self.iter().filter(move |item| match item {
            Ok(_) => true,
            Err(error) => seen.insert(error.to_string()),
        }))
    }

    /// Stable sort of the values. Forces the whole producer on first use.
    #[must_use]
    pub fn sort_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering + 'static) -> Self {
        let set = self.clone();
        let mut sorted: Option<std::vec::IntoIter<Result<T>>> = None;
        Self::new(std::iter::from_fn(move || {
            sorted
                .get_or_insert_with(|| match set.collect() {
                    ResultSet::Values(mut values) => {
                        values.sort_by(&mut compare);
                        values.into_iter().map(Ok).collect::<Vec<_>>().into_iter()
                    }
                    ResultSet::Errors(errors) => {
                        errors.into_iter().map(Err).collect::<Vec<_>>().into_iter()
                    }
                })
                .next()
        }))
    }

    /// Cartesian product with another set.
    ///
    /// If either side has no values, the result is that side's errors, the
    /// left side taking precedence.
    #[must_use]
    pub fn combine<U: Clone + 'static>(&self, other: &LazyResultSet<U>) -> LazyResultSet<(T, U)> {
        let left = self.clone();
        let right = other.clone();
        let mut inner: Option<Source<(T, U)>> = None;
        LazyResultSet::new(std::iter::from_fn(move || {
            inner
                .get_or_insert_with(|| -> Source<(T, U)> {
                    if !left.has_values() {
                        return Box::new(errors_of(&left).map(Err));
                    }
                    if !right.has_values() {
                        return Box::new(errors_of(&right).map(Err));
                    }
                    let right = right.clone();
                    Box::new(left.values().flat_map(move |l| {
                        right.values().map(move |r| Ok((l.clone(), r)))
                    }))
                })
                .next()
        }))
    }

    /// Cartesian product of any number of sets, produced in odometer order
    /// (the last set varies fastest).
    ///
    /// The first input with no values decides the errors. An empty input
    /// yields a single empty combination.
    #[must_use]
    pub fn combine_all(sets: Vec<Self>) -> LazyResultSet<Vec<T>> {
        LazyResultSet::new(CombineAll {
            sets,
            state: CombineState::Pending,
        })
    }
}

impl<T: Clone + 'static> From<ResultSet<T>> for LazyResultSet<T> {
    fn from(set: ResultSet<T>) -> Self {
        match set {
            ResultSet::Values(values) => Self::new(values.into_iter().map(Ok)),
            ResultSet::Errors(errors) => Self::new(errors.into_iter().map(Err)),
        }
    }
}

fn errors_of<T: Clone + 'static>(set: &LazyResultSet<T>) -> impl Iterator<Item = Error> + use<T> {
    set.iter().filter_map(std::result::Result::err)
}

/// Iterator over the items of a [`LazyResultSet`], served from its buffer.
pub struct LazyIter<T> {
    set: LazyResultSet<T>,
    index: usize,
}

impl<T: Clone + 'static> Iterator for LazyIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.set.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

enum CombineState<T> {
    Pending,
    Failed(Source<Vec<T>>),
    Running {
        iters: Vec<Box<dyn Iterator<Item = T>>>,
        current: Vec<T>,
    },
    Done,
}

struct CombineAll<T> {
    sets: Vec<LazyResultSet<T>>,
    state: CombineState<T>,
}

impl<T: Clone + 'static> CombineAll<T> {
    fn start(&mut self) -> CombineState<T> {
        let mut iters: Vec<Box<dyn Iterator<Item = T>>> = Vec::with_capacity(self.sets.len());
        let mut current = Vec::with_capacity(self.sets.len());
        for set in &self.sets {
            let mut values = set.values();
            match values.next() {
                Some(first) => {
                    current.push(first);
                    iters.push(Box::new(values));
                }
                None => return CombineState::Failed(Box::new(errors_of(set).map(Err))),
            }
        }
        CombineState::Running { iters, current }
    }
}

impl<T: Clone + 'static> Iterator for CombineAll<T> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, CombineState::Pending) {
            self.state = self.start();
        }
        match &mut self.state {
            CombineState::Pending | CombineState::Done => None,
            CombineState::Failed(errors) => errors.next(),
            CombineState::Running { iters, current } => {
                let combination = current.clone();
                // Advance the odometer, restarting exhausted digits.
                let mut digit = iters.len();
                let mut finished = true;
                while digit > 0 {
                    digit -= 1;
                    if let Some(value) = iters[digit].next() {
                        current[digit] = value;
                        finished = false;
                        break;
                    }
                    let mut restarted = self.sets[digit].values();
                    if let Some(first) = restarted.next() {
                        current[digit] = first;
                    }
                    iters[digit] = Box::new(restarted);
                }
                if finished {
                    self.state = CombineState::Done;
                }
                Some(Ok(combination))
            }
        }
    }
}
