//! Integration tests for the grammar
//!
//! Tests the trees built for whole sentences and single phrases.

use nasin_combinator::{Cursor, Memo, end, sequence2};
use nasin_parser::{
    Clause, Grammar, Interrogative, Modifier, MultiplePhrases, MultiplePredicates, Phrase,
    Sentence, Token, Tokenizer, WordUnit,
};

fn tokens(text: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(text).unwrap()
}

fn sentences(text: &str) -> Vec<Vec<Sentence>> {
    Grammar::standard()
        .parse_tokens(&tokens(text), &Memo::new())
        .into_values()
}

fn whole_phrases(grammar: &Grammar, text: &str) -> Vec<Phrase> {
    let tokens = tokens(text);
    sequence2(&grammar.phrase(), &end())
        .parse(Cursor::new(&tokens[..]), &Memo::new())
        .into_values()
        .into_iter()
        .map(|((phrase, ()), _)| phrase)
        .collect()
}

fn bare(word: &str) -> Phrase {
    Phrase::head(WordUnit::word(word))
}

// =============================================================================
// Sentences
// =============================================================================

#[test]
fn simple_li_sentence() {
    let readings = sentences("toki li pona");
    assert_eq!(
        readings,
        vec![vec![Sentence::Default {
            starting_particle: None,
            la_clauses: Vec::new(),
            final_clause: Clause::Li {
                subjects: MultiplePhrases::Single(bare("toki")),
                predicates: MultiplePredicates::Single(bare("pona")),
                explicit_li: true,
            },
            anu_seme: false,
            emphasis: None,
            punctuation: String::new(),
            interrogative: None,
        }]]
    );
}

#[test]
fn la_context_is_kept_apart() {
    let readings = sentences("tenpo ni la, toki li pona.");
    assert!(!readings.is_empty());
    for reading in &readings {
        let Sentence::Default {
            la_clauses,
            punctuation,
            ..
        } = &reading[0]
        else {
            panic!("expected a default sentence");
        };
        assert_eq!(la_clauses.len(), 1);
        assert_eq!(punctuation, ".");
    }
}

#[test]
fn several_sentences() {
    let readings = sentences("mi moku. sina lape.");
    assert!(!readings.is_empty());
    assert!(readings.iter().all(|reading| reading.len() == 2));
}

#[test]
fn polar_question_is_interrogative() {
    let readings = sentences("ona li pona ala pona?");
    assert_eq!(readings.len(), 1);
    let Sentence::Default { interrogative, .. } = &readings[0][0] else {
        panic!("expected a default sentence");
    };
    assert_eq!(*interrogative, Some(Interrogative::XAlaX));
}

// =============================================================================
// Phrases
// =============================================================================

#[test]
fn pi_groups_its_phrase() {
    let grammar = Grammar::standard();
    assert_eq!(
        whole_phrases(&grammar, "jan pi kulupu suli"),
        vec![Phrase::Default {
            head: WordUnit::word("jan"),
            modifiers: vec![Modifier::Pi(Phrase::Default {
                head: WordUnit::word("kulupu"),
                modifiers: vec![Modifier::Default(WordUnit::word("suli"))],
            })],
        }]
    );
}

#[test]
fn pi_needs_a_modified_phrase() {
    let grammar = Grammar::standard();
    assert!(whole_phrases(&grammar, "jan pi kulupu").is_empty());
}

#[test]
fn phrase_parser_reads_a_single_word() {
    let grammar = Grammar::standard();
    let phrase = grammar.phrase();
    let tokens = tokens("soweli");
    let result = phrase.parse(Cursor::new(&tokens[..]), &Memo::new());
    assert_eq!(result.values()[0].0, bare("soweli"));
}
