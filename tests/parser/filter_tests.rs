//! Integration tests for filter rules
//!
//! Tests the standard rules through the engine and custom rule books.

use nasin_foundation::{Error, ErrorKind, Result};
use nasin_parser::{
    Context, Engine, FilterRule, ParserConfig, RuleBatch, RuleBook, Sentence, WordUnits,
};

fn engine(rules: RuleBook) -> Engine {
    Engine::with_rules(
        Context::default().with_config(ParserConfig::default().with_cache_results(false)),
        rules,
    )
}

fn messages(engine: &Engine, text: &str) -> Vec<String> {
    engine
        .parse(text)
        .errors()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn no_ike(sentence: &Sentence, _: &Context) -> Result<()> {
    if sentence.word_units().iter().any(|unit| unit.head_word() == "ike") {
        Err(Error::filtered("\"ike\" is not welcome here"))
    } else {
        Ok(())
    }
}

// =============================================================================
// Standard Rules
// =============================================================================

#[test]
fn seme_ala_seme_is_filtered() {
    let result = engine(RuleBook::standard()).parse("ona li seme ala seme");
    assert!(result.is_error());
    assert!(result.errors().iter().any(|error| {
        matches!(error.kind, ErrorKind::FilteredOut(_))
            && error.to_string() == "\"seme ala seme\" is not allowed"
    }));
}

#[test]
fn filter_errors_survive_lazy_parsing() {
    let readings = engine(RuleBook::standard()).parse_lazy("ona li seme ala seme");
    assert!(!readings.has_values());
    assert!(readings.iter().any(|item| {
        item.is_err_and(|error| matches!(error.kind, ErrorKind::FilteredOut(_)))
    }));
}

#[test]
fn mi_li_is_filtered() {
    let messages = messages(&engine(RuleBook::standard()), "mi li pona");
    assert!(messages.contains(&"\"mi li\" is not allowed".to_string()));
}

#[test]
fn filter_errors_name_their_rule() {
    let result = engine(RuleBook::standard()).parse("mi li pona");
    let rule = result
        .errors()
        .iter()
        .find_map(|error| error.context.as_ref().and_then(|context| context.rule));
    assert_eq!(rule, Some("mi-li"));
}

#[test]
fn empty_rule_book_filters_nothing() {
    assert!(engine(RuleBook::new()).parse("mi li pona").has_values());
}

#[test]
fn standard_rules_are_named() {
    let rules = RuleBook::standard();
    assert!(rules.clause.names().any(|name| name == "mi-li"));
    assert!(rules.word_unit.names().any(|name| name == "seme-ala-seme"));
}

// =============================================================================
// Custom Rules
// =============================================================================

#[test]
fn custom_sentence_rule() {
    let mut rules = RuleBook::standard();
    rules.sentence.push(FilterRule::soft("no-ike", no_ike));
    let engine = engine(rules);

    assert!(engine.parse("ona li pona").has_values());
    let messages = messages(&engine, "ona li ike");
    assert!(messages.contains(&"\"ike\" is not welcome here".to_string()));
}

#[test]
fn replacing_rules_rebuilds_grammar() {
    let mut engine = engine(RuleBook::standard());
    assert!(engine.parse("mi li pona").is_error());

    engine.set_rules(RuleBook {
        sentence: RuleBatch::new().with_rule(FilterRule::soft("no-ike", no_ike)),
        ..RuleBook::new()
    });
    assert!(engine.parse("mi li pona").has_values());
    assert!(engine.parse("mi li ike").is_error());
}
