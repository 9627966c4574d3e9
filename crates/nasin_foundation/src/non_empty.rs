//! A vector that always holds at least one element.

use std::ops::Deref;

/// A `Vec` with at least one element.
///
/// The invariant is enforced by every constructor, so code holding a
/// `NonEmpty` never needs to handle the empty case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// Creates a collection holding a single element.
    #[must_use]
    pub fn new(first: T) -> Self {
        Self(vec![first])
    }

    /// Wraps a vector, returning `None` if it is empty.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    /// Returns the first element.
    #[must_use]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    /// Appends an element.
    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    /// Appends every element of another collection.
    pub fn append(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Unwraps into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Sorts the elements in place, keeping equal elements in order.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> std::cmp::Ordering) {
        self.0.sort_by(compare);
    }

    /// Keeps the elements for which `keep` returns true, as long as at least
    /// one remains. Returns `None` when nothing would be left.
    #[must_use]
    pub fn retain(self, keep: impl FnMut(&T) -> bool) -> Option<Self> {
        let mut items = self.0;
        let mut keep = keep;
        items.retain(|item| keep(item));
        Self::from_vec(items)
    }

    /// Applies `f` to every element.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> NonEmpty<U> {
        NonEmpty(self.0.into_iter().map(f).collect())
    }
}

impl<T> Deref for NonEmpty<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
