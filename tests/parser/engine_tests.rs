//! Integration tests for the engine
//!
//! Tests whole-text parsing, laziness and cache invalidation.

use std::collections::HashSet;

use nasin_combinator::ParserId;
use nasin_foundation::ErrorKind;
use nasin_parser::{Context, Dictionary, Engine, Interrogative, ParserConfig, Sentence, parse};

const LA_EXAMPLE: &str = "sina ken ala toki pona e ijo la, sina sona ala e ijo.";

// =============================================================================
// Readings
// =============================================================================

#[test]
fn every_reading_is_kept() {
    let result = Engine::default().parse(LA_EXAMPLE);
    // Three readings of "ken ala toki pona" times two of "sona ala".
    assert_eq!(result.values().len(), 6);
}

#[test]
fn readings_are_distinct() {
    let result = Engine::default().parse(LA_EXAMPLE);
    let unique: HashSet<&Vec<Sentence>> = result.values().iter().collect();
    assert_eq!(unique.len(), result.values().len());
}

#[test]
fn valid_texts_parse() {
    let engine = Engine::default();
    for text in [
        "toki li pona",
        "mi lukin e jan ni: ona li tawa tomo",
        "jan Sonja li pana e toki pona tawa mi.",
        "o kama!",
        "a!",
    ] {
        let result = engine.parse(text);
        assert!(result.has_values(), "{text}: {:?}", result.errors());
    }
}

#[test]
fn free_function_matches_engine() {
    let context = Context::default();
    assert_eq!(
        parse("toki li pona", &context),
        Engine::new(context).parse("toki li pona")
    );
}

#[test]
fn free_function_reuses_its_engine() {
    let context =
        Context::default().with_config(ParserConfig::default().with_cache_results(false));
    assert!(parse("mi moku e kili", &context).has_values());

    let before = ParserId::fresh();
    for _ in 0..5 {
        assert!(parse("mi moku e kili", &context).has_values());
        assert!(parse("mi moku e kili", &context.clone()).has_values());
    }
    assert_eq!(ParserId::fresh().as_u64(), before.as_u64() + 1);
}

#[test]
fn free_function_follows_context_changes() {
    let context = Context::default();
    assert!(parse("toki li pona", &context).has_values());

    let mut dictionary = Dictionary::toki_pona();
    dictionary.remove("pona");
    let changed = Context::new(dictionary, ParserConfig::default());
    assert!(parse("toki li pona", &changed).is_error());
    assert!(parse("toki li pona", &context).has_values());
}

fn asks_polar_question(engine: &Engine, text: &str) -> bool {
    engine.parse(text).values().iter().any(|reading| {
        matches!(
            reading.first(),
            Some(Sentence::Default {
                interrogative: Some(Interrogative::XAlaX),
                ..
            })
        )
    })
}

#[test]
fn partial_polar_questions_are_opt_in() {
    let strict = Engine::default();
    assert!(!asks_polar_question(&strict, "ona li pona ala?"));

    let lenient = Engine::new(
        Context::default().with_config(ParserConfig::default().with_x_ala_x_partial_parsing(true)),
    );
    assert!(asks_polar_question(&lenient, "ona li pona ala?"));
    let extra = lenient.parse("ona li pona ala?").values().len();
    assert!(extra > strict.parse("ona li pona ala?").values().len());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn long_input_is_rejected_before_parsing() {
    let config = ParserConfig::default().with_max_input_length(10);
    let engine = Engine::new(Context::default().with_config(config));
    let result = engine.parse("toki li pona mute");
    assert_eq!(result.errors().len(), 1);
    assert!(matches!(
        result.errors()[0].kind,
        ErrorKind::InputTooLong {
            length: 17,
            limit: 10
        }
    ));
}

#[test]
fn errors_are_deduplicated() {
    let result = Engine::default().parse("li li li");
    assert!(result.is_error());
    let messages: Vec<String> = result.errors().iter().map(ToString::to_string).collect();
    let unique: HashSet<&String> = messages.iter().collect();
    assert_eq!(unique.len(), messages.len());
}

#[test]
fn unknown_words_are_reported_with_their_position() {
    let result = Engine::default().parse("mi moku e xyz");
    let error = result
        .errors()
        .iter()
        .find(|error| error.to_string() == "\"xyz\" is not a known word")
        .expect("unknown word error");
    assert!(matches!(error.kind, ErrorKind::UnrecognizedElement(_)));
    assert_eq!(error.context.as_ref().and_then(|ctx| ctx.position), Some(3));
}

#[test]
fn rejections_are_not_reported_when_a_reading_exists() {
    let result = Engine::default().parse("mi moku");
    assert!(result.has_values());
    assert!(result.errors().is_empty());
}

#[test]
fn unsupported_glyph_forms_are_reported() {
    let result = Engine::default().parse("\u{F196C}\u{200D}\u{F1954} li pona");
    assert!(
        result
            .errors()
            .iter()
            .any(|error| matches!(error.kind, ErrorKind::NotYetSupported(_)))
    );
}

// =============================================================================
// Laziness
// =============================================================================

#[test]
fn lazy_readings_match_eager_ones() {
    let engine = Engine::new(
        Context::default().with_config(ParserConfig::default().with_cache_results(false)),
    );
    let lazy: Vec<Vec<Sentence>> = engine.parse_lazy(LA_EXAMPLE).values().collect();
    let eager = engine.parse(LA_EXAMPLE).into_values();
    assert_eq!(lazy.len(), eager.len());
    for reading in &lazy {
        assert!(eager.contains(reading));
    }
}

#[test]
fn lazy_failure_runs_length_guard_immediately() {
    let engine = Engine::new(
        Context::default().with_config(ParserConfig::default().with_max_input_length(3)),
    );
    let readings = engine.parse_lazy("toki li pona");
    assert!(!readings.has_values());
}

// =============================================================================
// Caches
// =============================================================================

#[test]
fn dictionary_change_invalidates_results() {
    let mut engine = Engine::default();
    assert!(engine.parse("toki li pona").has_values());
    assert_eq!(engine.cached_results(), 1);

    let mut dictionary = Dictionary::toki_pona();
    dictionary.remove("pona");
    engine.set_dictionary(dictionary);
    assert_eq!(engine.cached_results(), 0);

    let result = engine.parse("toki li pona");
    assert!(result.is_error());
    assert!(
        result
            .errors()
            .iter()
            .any(|error| error.to_string() == "\"pona\" is not a known word")
    );
}

#[test]
fn config_change_clears_results() {
    let mut engine = Engine::default();
    let _ = engine.parse("mi moku");
    engine.set_config(ParserConfig::default().with_max_input_length(3));
    assert_eq!(engine.cached_results(), 0);
    assert!(engine.parse("mi moku").is_error());
}

#[test]
fn result_cache_stays_within_capacity() {
    let config = ParserConfig::default().with_result_cache_capacity(2);
    let engine = Engine::new(Context::default().with_config(config));
    for text in ["mi moku", "sina lape", "ona li pona", "mi moku"] {
        let _ = engine.parse(text);
        assert!(engine.cached_results() <= 2);
    }
}

#[test]
fn uncached_engine_stores_nothing() {
    let engine = Engine::new(Context::default().with_config(ParserConfig::interactive()));
    let _ = engine.parse("mi moku");
    assert_eq!(engine.cached_results(), 0);
}
