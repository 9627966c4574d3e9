//! Integration tests for the tokenizer

use nasin_combinator::ParserId;
use nasin_foundation::ErrorKind;
use nasin_parser::{Token, Tokenizer};

fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(text).unwrap()
}

fn words(list: &[&str]) -> Vec<Token> {
    list.iter().map(|w| Token::word(w)).collect()
}

// =============================================================================
// Basic Forms
// =============================================================================

#[test]
fn words_and_terminators() {
    let tokens = tokenize("  mi moku! sina moku?");
    assert_eq!(
        tokens,
        vec![
            Token::word("mi"),
            Token::word("moku"),
            Token::punctuation("!"),
            Token::word("sina"),
            Token::word("moku"),
            Token::punctuation("?"),
        ]
    );
}

#[test]
fn polar_question_is_one_token() {
    assert_eq!(
        tokenize("sina pona ala pona"),
        vec![
            Token::word("sina"),
            Token::XAlaX {
                word: "pona".to_string()
            }
        ]
    );
}

#[test]
fn glyphs_read_as_words() {
    assert_eq!(tokenize("\u{F196C} \u{F1954}"), words(&["toki", "pona"]));
    assert_eq!(tokenize("\u{F196C} li \u{F1954}"), words(&["toki", "li", "pona"]));
}

// =============================================================================
// Concatenation
// =============================================================================

#[test]
fn tokenizing_pieces_matches_tokenizing_the_whole() {
    let pieces = ["toki pona", "mi moku", "jan Sonja li pona."];
    let mut joined_tokens = Vec::new();
    for piece in pieces {
        joined_tokens.extend(tokenize(piece));
    }
    assert_eq!(tokenize(&pieces.join(" ")), joined_tokens);
}

#[test]
fn joining_pieces_can_form_a_reduplication() {
    let mut joined_tokens = tokenize("mute");
    joined_tokens.extend(tokenize("mute ijo"));
    let whole = tokenize("mute mute ijo");
    assert_ne!(whole, joined_tokens);
    assert_eq!(
        whole,
        vec![
            Token::Reduplication {
                word: "mute".to_string(),
                count: 2
            },
            Token::word("ijo"),
        ]
    );
}

// =============================================================================
// Reduplication
// =============================================================================

#[test]
fn repeated_words_are_counted() {
    assert_eq!(
        tokenize("mute mute mute"),
        vec![Token::Reduplication {
            word: "mute".to_string(),
            count: 3
        }]
    );
    assert_eq!(tokenize("mute muteki"), words(&["mute", "muteki"]));
}

#[test]
fn tokenizing_allocates_no_parsers() {
    let tokenizer = Tokenizer::new();
    let before = ParserId::fresh();
    for _ in 0..10 {
        assert!(tokenizer.tokenize("mute mute mute li pona pona").is_ok());
    }
    assert_eq!(ParserId::fresh().as_u64(), before.as_u64() + 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_characters_fail() {
    let error = Tokenizer::new().tokenize("toki # pona").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnexpectedToken { .. }));
    assert_eq!(error.context.and_then(|ctx| ctx.position), Some(5));
}

#[test]
fn empty_text_has_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t ").is_empty());
}
