//! Integration tests for combinators
//!
//! Tests that sequencing and repetition keep every derivation.

use std::sync::LazyLock;

use regex::Regex;

use nasin_combinator::{
    Cursor, Memo, Parser, Rule, all, choice, choice_only_one, end, literal, look_ahead,
    many, match_regex, nothing, optional, optional_all, sequence2, sequence3,
};

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)(?:\.([0-9]+))?").unwrap());

fn complete<T: Clone + 'static>(parser: &Parser<str, T>, input: &str) -> Vec<T> {
    sequence2(parser, &end())
        .parse(Cursor::new(input), &Memo::new())
        .into_values()
        .into_iter()
        .map(|((value, ()), _)| value)
        .collect()
}

fn segment() -> Parser<str, &'static str> {
    choice(vec![literal("ab"), literal("a"), literal("b")])
}

// =============================================================================
// Ambiguity
// =============================================================================

#[test]
fn segmentations_are_all_kept() {
    let readings = complete(&many(&segment()), "abab");
    assert_eq!(readings.len(), 4);
    assert!(readings.contains(&vec!["ab", "ab"]));
    assert!(readings.contains(&vec!["a", "b", "a", "b"]));
}

#[test]
fn greedy_repetition_keeps_paths_but_not_prefixes() {
    // Each path through the choice runs to its own maximal end.
    let readings = complete(&all(&segment()), "abab");
    assert_eq!(readings.len(), 4);

    let prefixes = all(&literal("a")).parse(Cursor::new("aaab"), &Memo::new());
    assert_eq!(prefixes.values().len(), 1);
}

#[test]
fn optional_keeps_both_readings() {
    let parser = sequence2(&optional(&literal("a")), &many(&literal("a")));
    assert_eq!(complete(&parser, "aa").len(), 2);
}

#[test]
fn optional_all_is_greedy() {
    let parser = sequence2(&optional_all(&literal("a")), &many(&literal("a")));
    let readings = complete(&parser, "aa");
    assert_eq!(readings, vec![(Some("a"), vec!["a"])]);
}

#[test]
fn choice_only_one_stops_at_first_success() {
    let parser = choice_only_one(vec![literal("ab"), literal("a")]);
    let result = parser.parse(Cursor::new("abc"), &Memo::new());
    assert_eq!(result.values().len(), 1);
    assert_eq!(result.values()[0].1.position(), 2);
}

#[test]
fn errors_name_found_and_expected() {
    let result = sequence3(&literal("a"), &literal("b"), &end()).parse(Cursor::new("ac d"), &Memo::new());
    assert!(result.is_error());
    assert_eq!(result.errors()[0].to_string(), "unexpected \"c\", expected \"b\"");
}

#[test]
fn look_ahead_consumes_nothing() {
    let result = look_ahead(&literal("ab")).parse(Cursor::new("ab"), &Memo::new());
    assert_eq!(result.values()[0].1.position(), 0);
}

// =============================================================================
// Recursive Rules
// =============================================================================

fn nesting() -> (Rule<str, usize>, Parser<str, usize>) {
    let rule = Rule::new("nesting");
    let inner = rule.parser();
    rule.define(choice(vec![
        sequence3(&literal("("), &inner, &literal(")")).map(|(_, depth, _)| depth + 1),
        nothing().map(|()| 0),
    ]));
    let parser = rule.parser();
    (rule, parser)
}

#[test]
fn rule_supports_recursion() {
    let (_rule, parser) = nesting();
    assert_eq!(complete(&parser, "((()))"), vec![3]);
    assert!(complete(&parser, "(()").is_empty());
}

#[test]
#[should_panic(expected = "used before it was defined")]
fn rule_used_before_definition_panics() {
    let rule: Rule<str, usize> = Rule::new("undefined");
    let _ = rule.parser().parse(Cursor::new(""), &Memo::new());
}

#[test]
#[should_panic(expected = "defined twice")]
fn rule_defined_twice_panics() {
    let rule: Rule<str, ()> = Rule::new("twice");
    rule.define(nothing());
    rule.define(nothing());
}

// =============================================================================
// Text Parsers
// =============================================================================

#[test]
fn regex_yields_capture_groups() {
    let parser = match_regex(&NUMBER, "a number");
    let result = parser.parse(Cursor::new("12.5 rest"), &Memo::new());
    let (groups, next) = &result.values()[0];
    assert_eq!(groups, &vec!["12.5".to_string(), "12".to_string(), "5".to_string()]);
    assert_eq!(next.rest(), " rest");

    let whole = parser.parse(Cursor::new("7"), &Memo::new());
    assert_eq!(whole.values()[0].0[2], "");
}

#[test]
fn regex_failure_describes_input() {
    let result = match_regex(&NUMBER, "a number").parse(Cursor::new("x1"), &Memo::new());
    assert_eq!(result.errors()[0].to_string(), "unexpected \"x1\", expected a number");
}
