//! Parsers over text.

use regex::Regex;

use nasin_foundation::ResultSet;

use crate::parser::Parser;

/// Matches `regex` at the cursor and yields its capture groups, group 0
/// first. Groups that did not participate are empty strings.
///
/// The pattern must be anchored with `^`; it is run against the unread
/// text. An empty match counts as a failure.
#[must_use]
pub fn match_regex(regex: &'static Regex, description: &'static str) -> Parser<str, Vec<String>> {
    Parser::<str, Vec<String>>::new(move |cursor, _| {
        match regex.captures(cursor.rest()) {
            Some(captures) if captures.get(0).is_some_and(|m| !m.is_empty()) => {
                let consumed = captures.get(0).map_or(0, |m| m.end());
                let groups = captures
                    .iter()
                    .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
                    .collect();
                ResultSet::single((groups, cursor.advance(consumed)))
            }
            _ => ResultSet::error(cursor.unexpected(description)),
        }
    })
}

/// Matches an exact string.
#[must_use]
pub fn literal(expected: &'static str) -> Parser<str, &'static str> {
    Parser::<str, &'static str>::new(move |cursor, _| {
        if cursor.rest().starts_with(expected) {
            ResultSet::single((expected, cursor.advance(expected.len())))
        } else {
            ResultSet::error(cursor.unexpected(format!("\"{expected}\"")))
        }
    })
}

/// Matches one character accepted by `accept`.
#[must_use]
pub fn char_where(description: &'static str, accept: impl Fn(char) -> bool + 'static) -> Parser<str, char> {
    Parser::<str, char>::new(move |cursor, _| match cursor.rest().chars().next() {
        Some(c) if accept(c) => ResultSet::single((c, cursor.advance(c.len_utf8()))),
        _ => ResultSet::error(cursor.unexpected(description)),
    })
}
