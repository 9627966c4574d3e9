//! Text to tokens.
//!
//! The tokenizer is a single [`choice_only_one`] over the token forms, tried
//! from the most to the least specific. Each token parser consumes the
//! horizontal whitespace after it; punctuation also consumes line breaks,
//! while a bare line break becomes a `"\n"` punctuation token that ends a
//! sentence.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use nasin_combinator::{Cursor, Memo, Parser, all, choice_only_one, match_regex};
use nasin_foundation::{Error, Result, ResultSet};

use crate::token::{ProperWordKind, Token};
use crate::ucsur::{cartouche_name, glyph_word, glyph_words, normalize_punctuation};

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|error| panic!("invalid token pattern {pattern:?}: {error}"))
}

/// Any sitelen pona word glyph.
const GLYPH: &str = r"[\U000F1900-\U000F1988]";
/// Any of the glyph joiners.
const JOINER: &str = r"[\U0000200D\U000F1995\U000F1996]";

fn glyph_run() -> String {
    format!("{GLYPH}(?:{JOINER}{GLYPH})*")
}

static X_ALA_X: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^([a-z]+)[^\S\n]+ala[^\S\n]+([a-z]+)\b[^\S\n]*"));
static MULTIPLE_A: LazyLock<Regex> = LazyLock::new(|| regex(r"^a(?:[^\S\n]+a)+\b[^\S\n]*"));
static LONG_WORD: LazyLock<Regex> = LazyLock::new(|| regex(r"^(a{2,}|n{2,})\b[^\S\n]*"));
static WORD: LazyLock<Regex> = LazyLock::new(|| regex(r"^([a-z]+)\b[^\S\n]*"));
static PROPER_WORDS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^([A-Z][a-zA-Z]*(?:[^\S\n]+[A-Z][a-zA-Z]*)*)\b[^\S\n]*"));
static CARTOUCHE: LazyLock<Regex> = LazyLock::new(|| {
    regex(&format!(r"^\U000F1990((?:{GLYPH}|{JOINER})+)\U000F1991[^\S\n]*"))
});
static SPACE_LONG_GLYPH: LazyLock<Regex> = LazyLock::new(|| {
    regex(&format!(
        r"^({})\U000F1997([ \U00003000]+)\U000F1998[^\S\n]*",
        glyph_run()
    ))
});
static INSIDE_LONG_GLYPH: LazyLock<Regex> = LazyLock::new(|| {
    regex(&format!(r"^\U000F1998({})\U000F1997[^\S\n]*", glyph_run()))
});
static HEADED_LONG_GLYPH_START: LazyLock<Regex> =
    LazyLock::new(|| regex(&format!(r"^({})\U000F1997[^\S\n]*", glyph_run())));
static HEADED_LONG_GLYPH_END: LazyLock<Regex> = LazyLock::new(|| regex(r"^\U000F1998[^\S\n]*"));
static COMBINED_GLYPHS: LazyLock<Regex> = LazyLock::new(|| {
    regex(&format!(r"^({GLYPH}(?:{JOINER}{GLYPH})+)[^\S\n]*"))
});
static GLYPH_TOKEN: LazyLock<Regex> = LazyLock::new(|| regex(&format!(r"^({GLYPH})[^\S\n]*")));
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"^([.,:;?!。｡，、：；？！…\U000F199C\U000F199D]+)\s*")
});
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| regex(r"^\n\s*"));
static LEADING_SPACE: LazyLock<Regex> = LazyLock::new(|| regex(r"^\s*"));

fn group(groups: &[String], index: usize) -> &str {
    groups.get(index).map_or("", String::as_str)
}

fn glyph_token(
    pattern: &'static Regex,
    description: &'static str,
    build: impl Fn(Vec<String>, &[String]) -> Token + 'static,
) -> Parser<str, Token> {
    match_regex(pattern, description).try_map(move |groups| {
        let words = glyph_words(group(&groups, 1))
            .ok_or_else(|| Error::unrecognized(format!("\"{}\" is not a known glyph", group(&groups, 1))))?;
        Ok(build(words, &groups))
    })
}

/// Matches a word repeated at least twice, consuming every repetition.
fn reduplication() -> Parser<str, Token> {
    Parser::<str, Token>::new(|cursor, _| {
        let Some(first) = WORD.captures(cursor.rest()) else {
            return ResultSet::error(cursor.unexpected("a word"));
        };
        let word = first.get(1).map_or("", |m| m.as_str());
        let mut consumed = first.get(0).map_or(0, |m| m.end());
        let mut count = 1;
        while let Some(next) = WORD.captures(&cursor.rest()[consumed..]) {
            if next.get(1).map_or("", |m| m.as_str()) != word {
                break;
            }
            consumed += next.get(0).map_or(0, |m| m.end());
            count += 1;
        }
        if count < 2 {
            return ResultSet::error(cursor.advance(consumed).unexpected(format!("\"{word}\"")));
        }
        let token = Token::Reduplication {
            word: word.to_string(),
            count,
        };
        ResultSet::single((token, cursor.advance(consumed)))
    })
}

/// Builds the token parsers once and runs them over any number of inputs.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    token: Parser<str, Token>,
    tokens: Parser<str, Vec<Token>>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer.
    #[must_use]
    pub fn new() -> Self {
        let x_ala_x = match_regex(&X_ALA_X, "a word, \"ala\" and the same word").try_map(|groups| {
            let (first, second) = (group(&groups, 1), group(&groups, 2));
            if first == second {
                Ok(Token::XAlaX {
                    word: first.to_string(),
                })
            } else {
                Err(Error::unexpected(
                    format!("\"{first} ala {second}\""),
                    "the same word on both sides of \"ala\"",
                ))
            }
        });

        let multiple_a = match_regex(&MULTIPLE_A, "repeated \"a\"").map(|groups| Token::MultipleA {
            count: group(&groups, 0).split_whitespace().count(),
        });

        let word_text = match_regex(&WORD, "a word").map(|groups| group(&groups, 1).to_string());

        let reduplication = reduplication();

        let long_word = match_regex(&LONG_WORD, "a long word").map(|groups| {
            let letters = group(&groups, 1);
            Token::LongWord {
                word: letters.chars().take(1).collect(),
                length: letters.chars().count(),
            }
        });

        let word = word_text.map(Token::Word);

        let proper_words = match_regex(&PROPER_WORDS, "a proper word").map(|groups| Token::ProperWord {
            words: group(&groups, 1).split_whitespace().collect::<Vec<_>>().join(" "),
            kind: ProperWordKind::Latin,
        });

        let cartouche = glyph_token(&CARTOUCHE, "a cartouche", |words, _| Token::ProperWord {
            words: cartouche_name(&words),
            kind: ProperWordKind::Cartouche,
        });

        let space_long_glyph = glyph_token(&SPACE_LONG_GLYPH, "a long glyph", |words, groups| {
            Token::SpaceLongGlyph {
                words,
                space_length: group(groups, 2).chars().count(),
            }
        });

        let inside_long_glyph = glyph_token(&INSIDE_LONG_GLYPH, "a long glyph", |words, _| {
            Token::InsideLongGlyph { words }
        });

        let headed_long_glyph_start = glyph_token(&HEADED_LONG_GLYPH_START, "a long glyph", |words, _| {
            Token::HeadedLongGlyphStart { words }
        });

        let headed_long_glyph_end =
            match_regex(&HEADED_LONG_GLYPH_END, "the end of a long glyph").map(|_| Token::HeadedLongGlyphEnd);

        let combined_glyphs = glyph_token(&COMBINED_GLYPHS, "combined glyphs", |words, _| {
            Token::CombinedGlyphs { words }
        });

        let glyph = match_regex(&GLYPH_TOKEN, "a glyph").try_map(|groups| {
            let text = group(&groups, 1);
            text.chars()
                .next()
                .and_then(glyph_word)
                .map(Token::word)
                .ok_or_else(|| Error::unrecognized(format!("\"{text}\" is not a known glyph")))
        });

        let punctuation = match_regex(&PUNCTUATION, "punctuation")
            .map(|groups| Token::Punctuation(normalize_punctuation(group(&groups, 1))));

        let line_break = match_regex(&LINE_BREAK, "a line break").map(|_| Token::punctuation("\n"));

        let token = choice_only_one(vec![
            x_ala_x,
            multiple_a,
            reduplication,
            long_word,
            word,
            proper_words,
            cartouche,
            space_long_glyph,
            inside_long_glyph,
            headed_long_glyph_start,
            headed_long_glyph_end,
            combined_glyphs,
            glyph,
            punctuation,
            line_break,
        ])
        .expecting("a token");

        let tokens = all(&token);
        Self { token, tokens }
    }

    /// The parser for a single token.
    #[must_use]
    pub fn token(&self) -> &Parser<str, Token> {
        &self.token
    }

    /// Splits `text` into tokens.
    ///
    /// # Errors
    /// Returns the error of the first position where no token form matches.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let memo = Memo::new();
        let leading = LEADING_SPACE.find(text).map_or(0, |m| m.end());
        let start = Cursor::new(text).at(leading);

        let (tokens, stop) = match self.tokens.parse(start, &memo) {
            ResultSet::Values(values) => values.first().clone(),
            ResultSet::Errors(errors) => return Err(errors.first().clone()),
        };
        if stop.is_end() {
            debug!(count = tokens.len(), "tokenized input");
            return Ok(tokens);
        }
        let error = self
            .token
            .parse(stop, &memo)
            .errors()
            .first()
            .cloned()
            .unwrap_or_else(|| stop.unexpected("a token"));
        Err(error)
    }
}
