//! Combinators building parsers out of parsers.
//!
//! Every combinator keeps all derivations: sequencing takes the Cartesian
//! combination of continuations and repetition yields each repetition count
//! as its own derivation, unless the combinator is documented as greedy.

use std::cell::OnceCell;
use std::cmp::Reverse;
use std::fmt;
use std::rc::{Rc, Weak};

use nasin_foundation::{Collector, Error, ResultSet};

use crate::cursor::{Cursor, Source};
use crate::memo::{Memo, ParserId};
use crate::parser::Parser;

/// Succeeds once without consuming input.
#[must_use]
pub fn nothing<S: Source + ?Sized + 'static>() -> Parser<S, ()> {
    Parser::new(|cursor, _| ResultSet::single(((), cursor)))
}

/// Succeeds only at the end of the input.
#[must_use]
pub fn end<S: Source + ?Sized + 'static>() -> Parser<S, ()> {
    Parser::new(|cursor, _| {
        if cursor.is_end() {
            ResultSet::single(((), cursor))
        } else {
            ResultSet::error(cursor.unexpected("end of text"))
        }
    })
}

/// Always fails with `error`.
#[must_use]
pub fn fail<S: Source + ?Sized + 'static, T: Clone + 'static>(error: Error) -> Parser<S, T> {
    Parser::new(move |_, _| ResultSet::error(error.clone()))
}

/// Tries every alternative and unions their derivations.
#[must_use]
pub fn choice<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parsers: Vec<Parser<S, T>>,
) -> Parser<S, T> {
    Parser::new(move |cursor, memo| {
        ResultSet::concat(parsers.iter().map(|parser| parser.parse(cursor, memo)))
    })
}

/// Tries alternatives in order; the first one with any derivation wins.
#[must_use]
pub fn choice_only_one<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parsers: Vec<Parser<S, T>>,
) -> Parser<S, T> {
    Parser::new(move |cursor, memo| {
        let mut collector = Collector::new();
        for parser in &parsers {
            collector.absorb(parser.parse(cursor, memo));
            if collector.has_values() {
                break;
            }
        }
        collector.finish()
    })
}

/// Both readings: with `parser` and without it.
#[must_use]
pub fn optional<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Option<T>> {
    choice(vec![parser.map(Some), nothing().map(|()| None)])
}

/// Greedy optional: the empty reading only when `parser` fails.
#[must_use]
pub fn optional_all<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Option<T>> {
    choice_only_one(vec![parser.map(Some), nothing().map(|()| None)])
}

/// Sequences two parsers.
#[must_use]
pub fn sequence2<S, A, B>(a: &Parser<S, A>, b: &Parser<S, B>) -> Parser<S, (A, B)>
where
    S: Source + ?Sized + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
{
    let (a, b) = (a.clone(), b.clone());
    Parser::new(move |cursor, memo| {
        a.parse(cursor, memo).flat_map(|(first, next)| {
            b.parse(next, memo)
                .map(|(second, after)| ((first.clone(), second), after))
        })
    })
}

/// Sequences three parsers.
#[must_use]
pub fn sequence3<S, A, B, C>(
    a: &Parser<S, A>,
    b: &Parser<S, B>,
    c: &Parser<S, C>,
) -> Parser<S, (A, B, C)>
where
    S: Source + ?Sized + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    sequence2(&sequence2(a, b), c).map(|((a, b), c)| (a, b, c))
}

/// Sequences four parsers.
#[must_use]
pub fn sequence4<S, A, B, C, D>(
    a: &Parser<S, A>,
    b: &Parser<S, B>,
    c: &Parser<S, C>,
    d: &Parser<S, D>,
) -> Parser<S, (A, B, C, D)>
where
    S: Source + ?Sized + 'static,
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    D: Clone + 'static,
{
    sequence2(&sequence3(a, b, c), d).map(|((a, b, c), d)| (a, b, c, d))
}

/// Every number of repetitions, longest first, ending with zero.
///
/// `parser` must consume input whenever it succeeds; otherwise the
/// recursion never ends.
#[must_use]
pub fn many<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Vec<T>> {
    let id = ParserId::fresh();
    let parser = parser.clone();
    Parser::with_id(id, move |cursor, memo| many_from(id, &parser, cursor, memo))
}

fn many_from<'a, S: Source + ?Sized + 'static, T: Clone + 'static>(
    id: ParserId,
    parser: &Parser<S, T>,
    cursor: Cursor<'a, S>,
    memo: &Memo,
) -> ResultSet<(Vec<T>, Cursor<'a, S>)> {
    let positions = memo.memoized((id, cursor.position()), || {
        let mut collector = Collector::new();
        if let ResultSet::Values(heads) = parser.parse(cursor, memo) {
            for (head, next) in heads {
                for (tail, end) in many_from(id, parser, next, memo).into_values() {
                    collector.push_value((prepend(head.clone(), tail), end.position()));
                }
            }
        }
        collector.push_value((Vec::new(), cursor.position()));
        collector.finish().sort_by_key(|(_, end)| Reverse(*end))
    });
    positions.map(|(items, end)| (items, cursor.at(end)))
}

/// Greedy repetition: repeats until `parser` fails, yielding only the
/// maximal run of each derivation path.
///
/// `parser` must consume input whenever it succeeds.
#[must_use]
pub fn all<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Vec<T>> {
    let id = ParserId::fresh();
    let parser = parser.clone();
    Parser::with_id(id, move |cursor, memo| all_from(id, &parser, cursor, memo))
}

fn all_from<'a, S: Source + ?Sized + 'static, T: Clone + 'static>(
    id: ParserId,
    parser: &Parser<S, T>,
    cursor: Cursor<'a, S>,
    memo: &Memo,
) -> ResultSet<(Vec<T>, Cursor<'a, S>)> {
    let positions = memo.memoized((id, cursor.position()), || {
        match parser.parse(cursor, memo) {
            ResultSet::Values(heads) => {
                let mut collector = Collector::new();
                for (head, next) in heads {
                    for (tail, end) in all_from(id, parser, next, memo).into_values() {
                        collector.push_value((prepend(head.clone(), tail), end.position()));
                    }
                }
                collector.finish()
            }
            ResultSet::Errors(_) => ResultSet::single((Vec::new(), cursor.position())),
        }
    });
    positions.map(|(items, end)| (items, cursor.at(end)))
}

/// [`many`] with at least one repetition.
#[must_use]
pub fn many_at_least_one<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Vec<T>> {
    sequence2(parser, &many(parser)).map(|(head, tail)| prepend(head, tail))
}

/// [`all`] with at least one repetition.
#[must_use]
pub fn all_at_least_one<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, Vec<T>> {
    sequence2(parser, &all(parser)).map(|(head, tail)| prepend(head, tail))
}

fn prepend<T>(head: T, tail: Vec<T>) -> Vec<T> {
    let mut items = Vec::with_capacity(tail.len() + 1);
    items.push(head);
    items.extend(tail);
    items
}

/// Replaces a list result by its length.
#[must_use]
pub fn count<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, Vec<T>>,
) -> Parser<S, usize> {
    parser.map(|items| items.len())
}

/// Builds the parser on first use.
#[must_use]
pub fn lazy<S, T, F>(thunk: F) -> Parser<S, T>
where
    S: Source + ?Sized + 'static,
    T: Clone + 'static,
    F: Fn() -> Parser<S, T> + 'static,
{
    let cell = OnceCell::new();
    Parser::new(move |cursor, memo| cell.get_or_init(&thunk).parse(cursor, memo))
}

/// Same derivations as `parser`, without consuming anything.
#[must_use]
pub fn look_ahead<S: Source + ?Sized + 'static, T: Clone + 'static>(
    parser: &Parser<S, T>,
) -> Parser<S, T> {
    let parser = parser.clone();
    Parser::new(move |cursor, memo| {
        parser
            .parse(cursor, memo)
            .map(|(value, _)| (value, cursor))
    })
}

/// A named parser declared before it is defined, for mutual recursion.
///
/// The rule owns its definition; the parsers handed out by
/// [`Rule::parser`] only hold a weak reference to it, so a rule whose
/// definition refers back to itself does not leak.
pub struct Rule<S: ?Sized + 'static, T: 'static> {
    name: &'static str,
    slot: Rc<OnceCell<Parser<S, T>>>,
}

impl<S: ?Sized, T> fmt::Debug for Rule<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("defined", &self.slot.get().is_some())
            .finish()
    }
}

impl<S: Source + ?Sized + 'static, T: Clone + 'static> Rule<S, T> {
    /// Declares a rule.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Rc::new(OnceCell::new()),
        }
    }

    /// Returns the rule name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a parser that runs the rule's definition.
    ///
    /// # Panics
    /// The returned parser panics if run before [`Rule::define`] or after
    /// the rule was dropped.
    #[must_use]
    pub fn parser(&self) -> Parser<S, T> {
        let slot: Weak<OnceCell<Parser<S, T>>> = Rc::downgrade(&self.slot);
        let name = self.name;
        Parser::new(move |cursor, memo| {
            let Some(slot) = slot.upgrade() else {
                panic!("rule `{name}` used after its grammar was dropped");
            };
            let Some(parser) = slot.get() else {
                panic!("rule `{name}` used before it was defined");
            };
            parser.parse(cursor, memo)
        })
    }

    /// Supplies the rule's definition.
    ///
    /// # Panics
    /// Panics if the rule was already defined.
    pub fn define(&self, parser: Parser<S, T>) {
        assert!(
            self.slot.set(parser).is_ok(),
            "rule `{}` defined twice",
            self.name
        );
    }
}

/// Consumes one token for which `f` returns a value.
#[must_use]
pub fn satisfy<T, U>(
    description: &'static str,
    f: impl Fn(&T) -> Option<U> + 'static,
) -> Parser<[T], U>
where
    T: fmt::Display + 'static,
    U: Clone + 'static,
{
    Parser::<[T], U>::new(move |cursor, _| match cursor.peek().and_then(&f) {
        Some(value) => ResultSet::single((value, cursor.advance(1))),
        None => ResultSet::error(cursor.unexpected(description)),
    })
}

/// Consumes any one token.
#[must_use]
pub fn any_token<T: fmt::Display + Clone + 'static>() -> Parser<[T], T> {
    satisfy("a token", |token: &T| Some(token.clone()))
}
