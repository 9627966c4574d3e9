//! Memoized parser combinators that keep every derivation.
//!
//! This crate provides:
//! - [`Cursor`] - Immutable positions into text or token slices
//! - [`Parser`] - A parser returning a [`ResultSet`](nasin_foundation::ResultSet)
//!   of `(value, cursor)` pairs
//! - Combinators ([`choice`], [`choice_only_one`], [`many`], [`all`],
//!   [`sequence2`], [`lazy`], [`look_ahead`], [`Rule`], ...)
//! - Text parsers ([`match_regex`], [`literal`], [`char_where`])
//! - [`Memo`] and [`CacheRegistry`] - Packrat tables and bulk cache clearing
//!
//! # Example
//!
//! ```
//! use nasin_combinator::{Cursor, Memo, many, satisfy};
//!
//! let one = satisfy("a one", |n: &u8| (*n == 1).then_some(*n));
//! let ones = many(&one);
//! let input = [1u8, 1];
//! let result = ones.parse(Cursor::new(&input[..]), &Memo::new());
//!
//! // Two, one and zero repetitions, longest first.
//! assert_eq!(result.values().len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinator;
pub mod cursor;
pub mod memo;
pub mod parser;
pub mod text;


pub use combinator::{
    Rule, all, all_at_least_one, any_token, choice, choice_only_one, count, end, fail, lazy,
    look_ahead, many, many_at_least_one, nothing, optional, optional_all, satisfy, sequence2,
    sequence3, sequence4,
};
pub use cursor::{Cursor, Source};
pub use memo::{Cache, CacheRegistry, Clearable, Memo, MemoKey, MemoStats, ParserId};
pub use parser::Parser;
pub use text::{char_where, literal, match_regex};
