//! The parser type.
//!
//! A [`Parser`] is a pure function from a cursor to a [`ResultSet`] of
//! `(value, cursor)` pairs, one per derivation. It carries a [`ParserId`] so
//! that [`Parser::parse`] can memoize its results per position.

use std::fmt;
use std::rc::Rc;

use nasin_foundation::{Error, Result, ResultSet};

use crate::cursor::{Cursor, Source};
use crate::memo::{Memo, ParserId};

type RunFn<S, T> = dyn for<'a> Fn(Cursor<'a, S>, &Memo) -> ResultSet<(T, Cursor<'a, S>)>;

/// A memoized, ambiguity-preserving parser over a source `S`.
pub struct Parser<S: ?Sized + 'static, T: 'static> {
    id: ParserId,
    run: Rc<RunFn<S, T>>,
}

impl<S: ?Sized, T> Clone for Parser<S, T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            run: Rc::clone(&self.run),
        }
    }
}

impl<S: ?Sized, T> fmt::Debug for Parser<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("id", &self.id).finish()
    }
}

impl<S: Source + ?Sized + 'static, T: Clone + 'static> Parser<S, T> {
    /// Wraps a parsing function under a fresh id.
    pub fn new<F>(run: F) -> Self
    where
        F: for<'a> Fn(Cursor<'a, S>, &Memo) -> ResultSet<(T, Cursor<'a, S>)> + 'static,
    {
        Self::with_id(ParserId::fresh(), run)
    }

    /// Wraps a parsing function under a given id.
    pub fn with_id<F>(id: ParserId, run: F) -> Self
    where
        F: for<'a> Fn(Cursor<'a, S>, &Memo) -> ResultSet<(T, Cursor<'a, S>)> + 'static,
    {
        Self {
            id,
            run: Rc::new(run),
        }
    }

    /// Returns this parser's id.
    #[must_use]
    pub fn id(&self) -> ParserId {
        self.id
    }

    /// Runs the parser at `cursor`, consulting and filling `memo`.
    pub fn parse<'a>(&self, cursor: Cursor<'a, S>, memo: &Memo) -> ResultSet<(T, Cursor<'a, S>)> {
        let key = (self.id, cursor.position());
        if let Some(stored) = memo.get::<ResultSet<(T, usize)>>(key) {
            return stored.map(|(value, position)| (value, cursor.at(position)));
        }
        let result = (self.run)(cursor, memo);
        memo.put(
            key,
            result
                .clone()
                .map(|(value, next)| (value, next.position())),
        );
        result
    }

    /// Runs the parser without touching the memo for this parser's own key.
    pub(crate) fn run<'a>(&self, cursor: Cursor<'a, S>, memo: &Memo) -> ResultSet<(T, Cursor<'a, S>)> {
        (self.run)(cursor, memo)
    }

    /// Transforms every derived value.
    #[must_use]
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(T) -> U + 'static) -> Parser<S, U> {
        let inner = self.clone();
        Parser::new(move |cursor, memo| {
            inner
                .parse(cursor, memo)
                .map(|(value, next)| (f(value), next))
        })
    }

    /// Transforms every derived value, dropping the ones `f` rejects.
    #[must_use]
    pub fn try_map<U: Clone + 'static>(&self, f: impl Fn(T) -> Result<U> + 'static) -> Parser<S, U> {
        let inner = self.clone();
        Parser::new(move |cursor, memo| {
            inner
                .parse(cursor, memo)
                .try_map(|(value, next)| f(value).map(|mapped| (mapped, next)))
        })
    }

    /// Keeps the derivations `predicate` accepts.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> Result<bool> + 'static) -> Self {
        let inner = self.clone();
        Parser::new(move |cursor, memo| {
            inner
                .parse(cursor, memo)
                .filter(|(value, _)| predicate(value))
        })
    }

    /// Replaces every derived value by the set `f` returns for it, keeping
    /// the cursor where this parser left it.
    #[must_use]
    pub fn and_then<U: Clone + 'static>(
        &self,
        f: impl Fn(T) -> ResultSet<U> + 'static,
    ) -> Parser<S, U> {
        let inner = self.clone();
        Parser::new(move |cursor, memo| {
            inner
                .parse(cursor, memo)
                .flat_map(|(value, next)| f(value).map(|mapped| (mapped, next)))
        })
    }

    /// Continues with a parser chosen from each derived value.
    ///
    /// The continuation is built per derivation, so it is run without
    /// memoizing its own entry.
    #[must_use]
    pub fn then<U: Clone + 'static>(&self, f: impl Fn(&T) -> Parser<S, U> + 'static) -> Parser<S, U> {
        let inner = self.clone();
        Parser::new(move |cursor, memo| {
            inner
                .parse(cursor, memo)
                .flat_map(|(value, next)| f(&value).run(next, memo))
        })
    }

    /// Runs `other` after this parser and keeps only this parser's value.
    #[must_use]
    pub fn skip<U: Clone + 'static>(&self, other: &Parser<S, U>) -> Self {
        let inner = self.clone();
        let other = other.clone();
        Parser::new(move |cursor, memo| {
            inner.parse(cursor, memo).flat_map(|(value, next)| {
                other
                    .parse(next, memo)
                    .map(|(_, after)| (value.clone(), after))
            })
        })
    }

    /// Replaces a total failure by one error naming what was found and what
    /// was expected.
    #[must_use]
    pub fn expecting(&self, description: &'static str) -> Self {
        let inner = self.clone();
        Parser::new(move |cursor, memo| match inner.parse(cursor, memo) {
            ResultSet::Errors(_) => ResultSet::error(cursor.unexpected(description)),
            values @ ResultSet::Values(_) => values,
        })
    }
}
