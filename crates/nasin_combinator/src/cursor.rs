//! Immutable positions into a parser's input.
//!
//! A [`Cursor`] pairs a borrowed source with an offset: a byte offset for
//! text, an index for token slices. Cursors are `Copy`; advancing one
//! produces a new cursor and never touches the original.

use std::fmt;

use nasin_foundation::Error;

/// An input a parser can run over.
pub trait Source {
    /// Length of the input in positions.
    fn source_len(&self) -> usize;

    /// Describes what is found at `position`, for error messages.
    fn describe_at(&self, position: usize) -> String;
}

/// Text sources describe the nearest run of non-space characters.
impl Source for str {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn describe_at(&self, position: usize) -> String {
        let rest = self.get(position..).unwrap_or_default();
        match rest.split_whitespace().next() {
            Some(run) => format!("\"{run}\""),
            None => "end of text".to_string(),
        }
    }
}

/// Token sources describe the token at the position.
impl<T: fmt::Display> Source for [T] {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn describe_at(&self, position: usize) -> String {
        match self.get(position) {
            Some(item) => item.to_string(),
            None => "end of text".to_string(),
        }
    }
}

/// A position within a borrowed source.
pub struct Cursor<'a, S: ?Sized> {
    source: &'a S,
    position: usize,
}

impl<S: ?Sized> Clone for Cursor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Cursor<'_, S> {}

impl<S: ?Sized> PartialEq for Cursor<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.source, other.source) && self.position == other.position
    }
}

impl<S: ?Sized> Eq for Cursor<'_, S> {}

impl<S: ?Sized> fmt::Debug for Cursor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Source + ?Sized> Cursor<'a, S> {
    /// Creates a cursor at the start of `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the whole source.
    #[must_use]
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns a cursor over the same source at `position`.
    #[must_use]
    pub fn at(&self, position: usize) -> Self {
        debug_assert!(position <= self.source.source_len());
        Self {
            source: self.source,
            position,
        }
    }

    /// Returns a cursor moved forward by `amount`.
    #[must_use]
    pub fn advance(&self, amount: usize) -> Self {
        self.at(self.position + amount)
    }

    /// Returns true if nothing is left.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position >= self.source.source_len()
    }

    /// Describes what the cursor points at.
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe_at(self.position)
    }

    /// An unexpected-token error for what the cursor points at, located at
    /// the cursor.
    #[must_use]
    pub fn unexpected(&self, expected: impl Into<String>) -> Error {
        Error::unexpected(self.describe(), expected).with_position(self.position)
    }
}

impl<'a> Cursor<'a, str> {
    /// Returns the unread text.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        self.source.get(self.position..).unwrap_or_default()
    }
}

impl<'a, T> Cursor<'a, [T]> {
    /// Returns the unread tokens.
    #[must_use]
    pub fn rest(&self) -> &'a [T] {
        self.source.get(self.position..).unwrap_or_default()
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a T> {
        self.source.get(self.position)
    }
}
