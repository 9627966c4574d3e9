//! The toki pona grammar over tokens.
//!
//! The grammar is built once per [`Context`] and [`RuleBook`]: dictionary
//! lookups and settings are captured by the parsers when they are created,
//! and every node constructor runs its rule batch right after building the
//! node. Phrases recurse through pi, nanpa, preverbs and prepositions, so
//! the phrase parser is a [`Rule`] declared first and defined last.
//!
//! Coordination is parsed by nesting: given a list of coordinators such as
//! `["en", "anu"]`, the first one joins operands that are themselves parsed
//! with the rest of the list. `jan anu soweli en waso` therefore reads as
//! `(jan anu soweli) en waso`.

use std::rc::Rc;

use nasin_combinator::{
    Cursor, Memo, Parser, Rule, all_at_least_one, choice, end, many, many_at_least_one, optional,
    optional_all, satisfy, sequence2, sequence3, sequence4,
};
use nasin_foundation::{Error, ResultSet};

use crate::ast::{
    Clause, Emphasis, Interrogative, Modifier, MultiplePhrases, MultiplePredicates, Phrase,
    Preposition, Sentence, WordUnit, clause_interrogative,
};
use crate::config::Context;
use crate::dictionary::Dictionary;
use crate::filter::{FilterRules, RuleBook};
use crate::token::Token;

type TokenParser<T> = Parser<[Token], T>;

/// The compiled grammar.
#[derive(Debug)]
pub struct Grammar {
    context: Context,
    phrase: Rule<[Token], Phrase>,
    sentence: TokenParser<Sentence>,
    document: TokenParser<Vec<Sentence>>,
}

impl Grammar {
    /// Builds the grammar against a dictionary, settings and rules.
    #[must_use]
    pub fn new(context: &Context, rules: &RuleBook) -> Self {
        let builder = Builder {
            context: context.clone(),
            rules,
        };
        let phrase_rule = Rule::new("phrase");
        let phrase = phrase_rule.parser();

        let content = builder.word_unit(WordKind::Content);
        let modifiers = builder.modifiers(&content, &phrase);
        let preposition = builder.preposition(&modifiers, &phrase);
        phrase_rule.define(builder.phrase(&content, &modifiers, &preposition, &phrase));

        let clause = builder.clause(&phrase, &preposition);
        let sentence = builder.sentence(&clause);
        let document = sequence2(&many_at_least_one(&sentence), &end()).map(|(sentences, ())| sentences);

        Self {
            context: context.clone(),
            phrase: phrase_rule,
            sentence,
            document,
        }
    }

    /// The grammar for the built-in dictionary, default settings and the
    /// standard rules.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(&Context::default(), &RuleBook::standard())
    }

    /// The context the grammar was built against.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Parses one phrase.
    #[must_use]
    pub fn phrase(&self) -> TokenParser<Phrase> {
        self.phrase.parser()
    }

    /// Parses one sentence, including its terminator.
    #[must_use]
    pub fn sentence(&self) -> &TokenParser<Sentence> {
        &self.sentence
    }

    /// Parses one or more sentences up to the end of the tokens.
    #[must_use]
    pub fn document(&self) -> &TokenParser<Vec<Sentence>> {
        &self.document
    }

    /// Every reading of `tokens` as a list of sentences.
    ///
    /// Without a reading, the rejections logged in `memo` follow the
    /// structural errors.
    pub fn parse_tokens(&self, tokens: &[Token], memo: &Memo) -> ResultSet<Vec<Sentence>> {
        match self.document.parse(Cursor::new(tokens), memo) {
            ResultSet::Values(values) => ResultSet::Values(values).map(|(sentences, _)| sentences),
            ResultSet::Errors(errors) => {
                let mut all = errors.into_vec();
                all.extend(memo.violations());
                ResultSet::from_errors(all).deduplicate_errors()
            }
        }
    }
}

// =============================================================================
// Token-level parsers
// =============================================================================

/// Which dictionary role a word unit is read in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WordKind {
    Content,
    Preverb,
    Preposition,
}

impl WordKind {
    fn accepts(self, dictionary: &Dictionary, word: &str) -> bool {
        match self {
            Self::Content => dictionary.is_content_word(word),
            Self::Preverb => dictionary.is_preverb(word),
            Self::Preposition => dictionary.is_preposition(word),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Content => "a content word",
            Self::Preverb => "a preverb",
            Self::Preposition => "a preposition",
        }
    }
}

/// The plain word `word`.
fn particle(word: &'static str) -> TokenParser<()> {
    Parser::<[Token], ()>::new(move |cursor, _| match cursor.peek() {
        Some(token) if token.is_word(word) => ResultSet::single(((), cursor.advance(1))),
        _ => ResultSet::error(cursor.unexpected(format!("\"{word}\""))),
    })
}

fn comma() -> TokenParser<()> {
    satisfy("\",\"", |token: &Token| (token.as_punctuation() == Some(",")).then_some(()))
}

/// Sentence-ending punctuation, or the end of the tokens as `""`.
fn terminator() -> TokenParser<String> {
    let mark = satisfy("a sentence end", |token: &Token| {
        token
            .as_punctuation()
            .filter(|mark| *mark != ",")
            .map(str::to_string)
    });
    choice(vec![mark, end().map(|()| String::new())])
}

fn emphasis() -> TokenParser<Emphasis> {
    satisfy("emphasis", |token: &Token| match token {
        Token::Word(word) if word == "a" || word == "n" => Some(Emphasis::Word(word.clone())),
        Token::LongWord { word, length } => Some(Emphasis::LongWord {
            word: word.clone(),
            length: *length,
        }),
        Token::MultipleA { count } => Some(Emphasis::MultipleA { count: *count }),
        _ => None,
    })
}

fn proper_words() -> TokenParser<String> {
    satisfy("a proper word", |token: &Token| match token {
        Token::ProperWord { words, .. } => Some(words.clone()),
        _ => None,
    })
}

fn long_glyph_pi() -> TokenParser<()> {
    satisfy("a long \"pi\"", |token: &Token| match token {
        Token::HeadedLongGlyphStart { words } if words.len() == 1 && words[0] == "pi" => Some(()),
        _ => None,
    })
}

fn long_glyph_end() -> TokenParser<()> {
    satisfy("end of long glyph", |token: &Token| {
        matches!(token, Token::HeadedLongGlyphEnd).then_some(())
    })
}

/// Glyph structures the grammar recognizes but does not read.
fn unsupported() -> TokenParser<WordUnit> {
    Parser::<[Token], WordUnit>::new(|cursor, memo| {
        let construct = match cursor.peek() {
            Some(Token::CombinedGlyphs { .. }) => "combined glyphs",
            Some(Token::SpaceLongGlyph { words, .. }) if words.len() > 1 => {
                "long glyphs over several words"
            }
            Some(Token::HeadedLongGlyphStart { words }) if words.len() != 1 || words[0] != "pi" => {
                "headed long glyphs"
            }
            Some(Token::InsideLongGlyph { .. }) => "glyphs inside a long glyph",
            _ => return ResultSet::error(cursor.unexpected("a word")),
        };
        let error = Error::not_yet_supported(construct).with_position(cursor.position());
        memo.record_violation(error.clone());
        ResultSet::error(error)
    })
}

fn join_phrases(coordinator: &'static str, items: Vec<MultiplePhrases>) -> MultiplePhrases {
    if coordinator == "anu" {
        MultiplePhrases::Anu(items)
    } else {
        MultiplePhrases::And(items)
    }
}

fn join_predicates(coordinator: &'static str, items: Vec<MultiplePredicates>) -> MultiplePredicates {
    if coordinator == "anu" {
        MultiplePredicates::Anu(items)
    } else {
        MultiplePredicates::And(items)
    }
}

/// Operands joined by the first coordinator, each parsed with the rest of
/// the list; a lone operand falls through to the next level.
fn coordinated<T: Clone + 'static>(
    coordinators: &[&'static str],
    leaf: &TokenParser<T>,
    join: fn(&'static str, Vec<T>) -> T,
) -> TokenParser<T> {
    let Some((&coordinator, rest)) = coordinators.split_first() else {
        return leaf.clone();
    };
    let operand = coordinated(rest, leaf, join);
    let more = many_at_least_one(&sequence2(&particle(coordinator), &operand).map(|((), item)| item));
    let joined = sequence2(&operand, &more).map(move |(first, others)| {
        let mut items = Vec::with_capacity(others.len() + 1);
        items.push(first);
        items.extend(others);
        join(coordinator, items)
    });
    choice(vec![joined, operand])
}

// =============================================================================
// Node builders
// =============================================================================

struct Builder<'r> {
    context: Context,
    rules: &'r RuleBook,
}

impl Builder<'_> {
    /// A word of the given role, reporting unknown words.
    fn word(&self, kind: WordKind) -> TokenParser<String> {
        let dictionary = Rc::clone(&self.context.dictionary);
        Parser::<[Token], String>::new(move |cursor, memo| match cursor.peek().and_then(Token::as_word) {
            Some(word) if kind.accepts(&dictionary, word) => {
                ResultSet::single((word.to_string(), cursor.advance(1)))
            }
            Some(word) if !dictionary.contains(word) => {
                let error = Error::unrecognized(format!("\"{word}\" is not a known word"))
                    .with_position(cursor.position());
                memo.record_violation(error.clone());
                ResultSet::error(error)
            }
            _ => ResultSet::error(cursor.unexpected(kind.description())),
        })
    }

    fn numbers(&self) -> TokenParser<WordUnit> {
        let dictionary = Rc::clone(&self.context.dictionary);
        let number = satisfy("a number", move |token: &Token| {
            token
                .as_word()
                .filter(|word| dictionary.number_value(word).is_some())
                .map(str::to_string)
        });
        all_at_least_one(&number)
            .filter(|words| Ok(words.len() >= 2))
            .map(WordUnit::Numbers)
    }

    fn word_unit(&self, kind: WordKind) -> TokenParser<WordUnit> {
        let word = self.word(kind);
        let dictionary = Rc::clone(&self.context.dictionary);
        let marked = satisfy(kind.description(), move |token: &Token| match token {
            Token::XAlaX { word } if kind == WordKind::Content || kind.accepts(&dictionary, word) => {
                Some(WordUnit::XAlaX { word: word.clone() })
            }
            Token::SpaceLongGlyph { words, .. }
                if words.len() == 1 && kind.accepts(&dictionary, &words[0]) =>
            {
                Some(WordUnit::Default {
                    word: words[0].clone(),
                    emphasis: Some(Emphasis::LongGlyph),
                })
            }
            _ => None,
        });

        let mut alternatives = vec![
            word.map(|word| WordUnit::Default {
                word,
                emphasis: None,
            }),
            marked,
        ];
        if kind == WordKind::Content {
            alternatives.push(satisfy("a content word", |token: &Token| match token {
                Token::Reduplication { word, count } => Some(WordUnit::Reduplication {
                    word: word.clone(),
                    count: *count,
                }),
                _ => None,
            }));
            alternatives.push(self.numbers());
            alternatives.push(unsupported());
        }
        if self.context.config.x_ala_x_partial_parsing {
            alternatives.push(
                sequence2(&word, &particle("ala")).map(|(word, ())| WordUnit::XAlaX { word }),
            );
        }
        choice(alternatives).filter_rules(&self.rules.word_unit, &self.context)
    }

    fn modifiers(
        &self,
        content: &TokenParser<WordUnit>,
        phrase: &TokenParser<Phrase>,
    ) -> TokenParser<Vec<Modifier>> {
        let nanpa = particle("nanpa").map(|()| WordUnit::word("nanpa"));
        let modifier = choice(vec![
            content.map(Modifier::Default),
            proper_words().map(Modifier::ProperWords),
            sequence2(&particle("pi"), phrase).map(|((), phrase)| Modifier::Pi(phrase)),
            sequence3(&long_glyph_pi(), phrase, &long_glyph_end())
                .map(|((), phrase, ())| Modifier::Pi(phrase)),
            sequence2(&nanpa, phrase).map(|(nanpa, phrase)| Modifier::Nanpa { nanpa, phrase }),
        ])
        .filter_rules(&self.rules.modifier, &self.context);
        many(&modifier).filter_rules(&self.rules.modifiers, &self.context)
    }

    fn preposition(
        &self,
        modifiers: &TokenParser<Vec<Modifier>>,
        phrase: &TokenParser<Phrase>,
    ) -> TokenParser<Preposition> {
        let objects = coordinated(&["anu"], &phrase.map(MultiplePhrases::Single), join_phrases);
        sequence3(&self.word_unit(WordKind::Preposition), modifiers, &objects)
            .map(|(preposition, modifiers, phrases)| Preposition {
                preposition,
                modifiers,
                phrases,
            })
            .filter_rules(&self.rules.preposition, &self.context)
    }

    fn phrase(
        &self,
        content: &TokenParser<WordUnit>,
        modifiers: &TokenParser<Vec<Modifier>>,
        preposition: &TokenParser<Preposition>,
        phrase: &TokenParser<Phrase>,
    ) -> TokenParser<Phrase> {
        choice(vec![
            sequence2(content, modifiers).map(|(head, modifiers)| Phrase::Default { head, modifiers }),
            sequence3(&self.word_unit(WordKind::Preverb), modifiers, phrase).map(
                |(preverb, modifiers, phrase)| Phrase::Preverb {
                    preverb,
                    modifiers,
                    phrase: Box::new(phrase),
                },
            ),
            preposition.map(|preposition| Phrase::Preposition(Box::new(preposition))),
        ])
        .filter_rules(&self.rules.phrase, &self.context)
    }

    /// One predicate: a lone phrase, or verb phrases with objects and
    /// prepositions.
    fn predicate(
        phrase: &TokenParser<Phrase>,
        preposition: &TokenParser<Preposition>,
    ) -> TokenParser<MultiplePredicates> {
        let objects = sequence2(
            &particle("e"),
            &coordinated(&["e", "anu"], &phrase.map(MultiplePhrases::Single), join_phrases),
        )
        .map(|((), objects)| objects);
        let verbs = coordinated(&["anu"], &phrase.map(MultiplePhrases::Single), join_phrases);
        let associated = sequence3(&verbs, &optional(&objects), &many(preposition))
            .filter(|(_, objects, prepositions)| Ok(objects.is_some() || !prepositions.is_empty()))
            .map(|(predicates, objects, prepositions)| MultiplePredicates::Associated {
                predicates,
                objects,
                prepositions,
            });
        choice(vec![phrase.map(MultiplePredicates::Single), associated])
    }

    fn clause(
        &self,
        phrase: &TokenParser<Phrase>,
        preposition: &TokenParser<Preposition>,
    ) -> TokenParser<Clause> {
        let subjects = coordinated(&["en", "anu"], &phrase.map(MultiplePhrases::Single), join_phrases);
        let predicate = Self::predicate(phrase, preposition);
        let li_predicates = coordinated(&["li", "anu"], &predicate, join_predicates);
        let o_predicates = coordinated(&["o", "anu"], &predicate, join_predicates);
        let mi_sina = satisfy("\"mi\" or \"sina\"", |token: &Token| {
            token
                .as_word()
                .filter(|word| matches!(*word, "mi" | "sina"))
                .map(|word| MultiplePhrases::Single(Phrase::head(WordUnit::word(word))))
        });

        choice(vec![
            subjects.map(Clause::Phrases),
            sequence2(&subjects, &particle("o")).map(|(subjects, ())| Clause::Vocative(subjects)),
            sequence3(&subjects, &particle("li"), &li_predicates).map(|(subjects, (), predicates)| {
                Clause::Li {
                    subjects,
                    predicates,
                    explicit_li: true,
                }
            }),
            sequence2(&mi_sina, &li_predicates).map(|(subjects, predicates)| Clause::Li {
                subjects,
                predicates,
                explicit_li: false,
            }),
            sequence3(&optional(&subjects), &particle("o"), &o_predicates).map(
                |(subjects, (), predicates)| Clause::O {
                    subjects,
                    predicates,
                },
            ),
        ])
        .filter_rules(&self.rules.clause, &self.context)
    }

    fn sentence(&self, clause: &TokenParser<Clause>) -> TokenParser<Sentence> {
        let taso = particle("taso").map(|()| WordUnit::word("taso"));
        let la_context = sequence3(clause, &particle("la"), &optional_all(&comma())).map(|(clause, (), _)| clause);
        let anu_seme = sequence2(&particle("anu"), &particle("seme")).map(|((), ())| ());
        let opening = sequence3(&optional(&taso), &many(&la_context), clause);

        let default = sequence4(
            &opening,
            &optional_all(&anu_seme),
            &optional_all(&emphasis()),
            &terminator(),
        )
        .map(
            |((starting_particle, la_clauses, final_clause), anu_seme, emphasis, punctuation)| {
                let anu_seme = anu_seme.is_some();
                let interrogative = clause_interrogative(la_clauses.iter().chain([&final_clause]))
                    .or(anu_seme.then_some(Interrogative::XAlaX));
                Sentence::Default {
                    starting_particle,
                    la_clauses,
                    final_clause,
                    anu_seme,
                    emphasis,
                    punctuation,
                    interrogative,
                }
            },
        );
        let filler = sequence2(&emphasis(), &terminator())
            .map(|(emphasis, punctuation)| Sentence::Filler {
                emphasis,
                punctuation,
            });

        choice(vec![default, filler]).filter_rules(&self.rules.sentence, &self.context)
    }
}
