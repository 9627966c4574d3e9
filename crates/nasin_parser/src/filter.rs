//! Filter rules pruning grammatical but unwanted derivations.
//!
//! A [`FilterRule`] is a named pure check on one node. Rules for the same
//! node type are grouped in a [`RuleBatch`], and a [`RuleBook`] holds one
//! batch per node type. The grammar runs a batch right after building each
//! node through [`FilterRules::filter_rules`].

use std::borrow::Borrow;
use std::fmt;

use nasin_combinator::{Parser, Source};
use nasin_foundation::{Error, NonEmpty, Result, ResultSet};
use tracing::trace;

use crate::ast::{
    Clause, Modifier, MultiplePhrases, Phrase, Preposition, Sentence, WordUnit,
    clause_interrogative,
};
use crate::config::Context;

/// Signature of a rule check.
pub type CheckFn<N> = fn(&N, &Context) -> Result<()>;

/// A named check on one node.
pub struct FilterRule<N: ?Sized> {
    /// Name recorded on the errors this rule raises.
    pub name: &'static str,
    /// A hard rule stops the batch at its first violation.
    pub hard: bool,
    /// The check itself.
    pub check: CheckFn<N>,
}

impl<N: ?Sized> Clone for FilterRule<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: ?Sized> Copy for FilterRule<N> {}

impl<N: ?Sized> fmt::Debug for FilterRule<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRule")
            .field("name", &self.name)
            .field("hard", &self.hard)
            .finish_non_exhaustive()
    }
}

impl<N: ?Sized> FilterRule<N> {
    /// A rule whose violations are collected with the others.
    #[must_use]
    pub const fn soft(name: &'static str, check: CheckFn<N>) -> Self {
        Self {
            name,
            hard: false,
            check,
        }
    }

    /// A rule whose violation rejects the node immediately.
    #[must_use]
    pub const fn hard(name: &'static str, check: CheckFn<N>) -> Self {
        Self {
            name,
            hard: true,
            check,
        }
    }
}

/// The rules applied to one node type, in order.
pub struct RuleBatch<N: ?Sized> {
    rules: Vec<FilterRule<N>>,
}

impl<N: ?Sized> Clone for RuleBatch<N> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<N: ?Sized> Default for RuleBatch<N> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<N: ?Sized> fmt::Debug for RuleBatch<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name))
            .finish()
    }
}

impl<N: ?Sized> RuleBatch<N> {
    /// Creates an empty batch that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: FilterRule<N>) {
        self.rules.push(rule);
    }

    /// Builder method to append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: FilterRule<N>) -> Self {
        self.push(rule);
        self
    }

    /// Names of the rules, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the batch has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule on `node`.
    ///
    /// # Errors
    /// Returns the violations, each tagged with its rule name. A violated
    /// hard rule is returned alone and stops the batch.
    pub fn check(&self, node: &N, context: &Context) -> std::result::Result<(), NonEmpty<Error>> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            if let Err(error) = (rule.check)(node, context) {
                let error = error.with_rule(rule.name);
                trace!(rule = rule.name, hard = rule.hard, %error, "filter rule rejected node");
                if rule.hard {
                    return Err(NonEmpty::new(error));
                }
                violations.push(error);
            }
        }
        NonEmpty::from_vec(violations).map_or(Ok(()), Err)
    }
}

/// One batch per node type.
#[derive(Clone, Debug, Default)]
pub struct RuleBook {
    /// Rules on word units.
    pub word_unit: RuleBatch<WordUnit>,
    /// Rules on single modifiers.
    pub modifier: RuleBatch<Modifier>,
    /// Rules on the modifier list of a phrase.
    pub modifiers: RuleBatch<[Modifier]>,
    /// Rules on phrases.
    pub phrase: RuleBatch<Phrase>,
    /// Rules on prepositional phrases.
    pub preposition: RuleBatch<Preposition>,
    /// Rules on clauses.
    pub clause: RuleBatch<Clause>,
    /// Rules on sentences.
    pub sentence: RuleBatch<Sentence>,
}

impl RuleBook {
    /// A rule book with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard toki pona rules.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            word_unit: RuleBatch::new()
                .with_rule(FilterRule::hard("seme-ala-seme", seme_ala_seme))
                .with_rule(FilterRule::soft("numbers-descending", numbers_descending))
                .with_rule(FilterRule::soft(
                    "repeated-content-word",
                    repeated_content_word,
                )),
            modifier: RuleBatch::new()
                .with_rule(FilterRule::soft("pi-modified-phrase", pi_modified_phrase))
                .with_rule(FilterRule::soft("embedded-phrase-kind", embedded_phrase_kind)),
            modifiers: RuleBatch::new()
                .with_rule(FilterRule::soft("single-nanpa", single_nanpa))
                .with_rule(FilterRule::soft("single-proper-words", single_proper_words))
                .with_rule(FilterRule::soft("grouped-numbers", grouped_number_modifiers))
                .with_rule(FilterRule::soft("nanpa-ordinal", nanpa_ordinal)),
            phrase: RuleBatch::new()
                .with_rule(FilterRule::soft("preverb-modifiers", preverb_modifiers))
                .with_rule(FilterRule::soft("grouped-numbers", grouped_number_head)),
            preposition: RuleBatch::new().with_rule(FilterRule::soft(
                "preposition-modifiers",
                preposition_modifiers,
            )),
            clause: RuleBatch::new()
                .with_rule(FilterRule::hard("mi-li", mi_li))
                .with_rule(FilterRule::soft("subject-phrase-kind", subject_phrase_kind)),
            sentence: RuleBatch::new()
                .with_rule(FilterRule::soft("vocative-la", vocative_la))
                .with_rule(FilterRule::soft("anu-seme-question", anu_seme_question)),
        }
    }
}

/// Runs a rule batch on every node a parser builds.
pub trait FilterRules<T> {
    /// Keeps the derivations whose node passes `batch`; the others become
    /// the batch's errors, which are also logged in the memo.
    #[must_use]
    fn filter_rules<N: ?Sized + 'static>(&self, batch: &RuleBatch<N>, context: &Context) -> Self
    where
        T: Borrow<N>;
}

impl<S: Source + ?Sized + 'static, T: Clone + 'static> FilterRules<T> for Parser<S, T> {
    fn filter_rules<N: ?Sized + 'static>(&self, batch: &RuleBatch<N>, context: &Context) -> Self
    where
        T: Borrow<N>,
    {
        if batch.is_empty() {
            return self.clone();
        }
        let inner = self.clone();
        let batch = batch.clone();
        let context = context.clone();
        Parser::new(move |cursor, memo| {
            inner.parse(cursor, memo).flat_map(|(node, next)| {
                match batch.check(<T as Borrow<N>>::borrow(&node), &context) {
                    Ok(()) => ResultSet::single((node, next)),
                    Err(errors) => {
                        for error in &errors {
                            memo.record_violation(error.clone());
                        }
                        ResultSet::Errors(errors)
                    }
                }
            })
        })
    }
}

// =============================================================================
// Word unit rules
// =============================================================================

fn seme_ala_seme(unit: &WordUnit, _: &Context) -> Result<()> {
    match unit {
        WordUnit::XAlaX { word } if word == "seme" => {
            Err(Error::filtered("\"seme ala seme\" is not allowed"))
        }
        _ => Ok(()),
    }
}

fn numbers_descending(unit: &WordUnit, context: &Context) -> Result<()> {
    let WordUnit::Numbers(words) = unit else {
        return Ok(());
    };
    let values: Vec<u32> = words
        .iter()
        .filter_map(|word| context.dictionary.number_value(word))
        .collect();
    if values.windows(2).all(|pair| pair[0] >= pair[1]) {
        Ok(())
    } else {
        Err(Error::filtered("numbers should be in descending order"))
    }
}

fn repeated_content_word(unit: &WordUnit, context: &Context) -> Result<()> {
    match unit {
        WordUnit::XAlaX { word } | WordUnit::Reduplication { word, .. }
            if !context.dictionary.is_content_word(word) =>
        {
            Err(Error::unrecognized(format!("\"{word}\" is not a content word")))
        }
        _ => Ok(()),
    }
}

fn is_number_unit(unit: &WordUnit, context: &Context) -> bool {
    match unit {
        WordUnit::Numbers(_) => true,
        WordUnit::Default { word, .. } => context.dictionary.number_value(word).is_some(),
        _ => false,
    }
}

fn is_number_modifier(modifier: &Modifier, context: &Context) -> bool {
    matches!(modifier, Modifier::Default(unit) if is_number_unit(unit, context))
}

fn only_ala(modifiers: &[Modifier]) -> bool {
    modifiers
        .iter()
        .all(|modifier| matches!(modifier, Modifier::Default(unit) if unit.is_word("ala")))
}

// =============================================================================
// Modifier rules
// =============================================================================

fn pi_modified_phrase(modifier: &Modifier, _: &Context) -> Result<()> {
    match modifier {
        Modifier::Pi(phrase) if phrase.is_bare() => Err(Error::filtered(
            "\"pi\" must be followed by a phrase with a modifier",
        )),
        _ => Ok(()),
    }
}

fn embedded_phrase_kind(modifier: &Modifier, _: &Context) -> Result<()> {
    let (particle, phrase) = match modifier {
        Modifier::Pi(phrase) => ("pi", phrase),
        Modifier::Nanpa { phrase, .. } => ("nanpa", phrase),
        _ => return Ok(()),
    };
    if phrase.is_default() {
        Ok(())
    } else {
        Err(Error::filtered(format!(
            "a \"{particle}\" phrase cannot be a preverb or preposition phrase"
        )))
    }
}

fn single_nanpa(modifiers: &[Modifier], _: &Context) -> Result<()> {
    let count = modifiers
        .iter()
        .filter(|modifier| matches!(modifier, Modifier::Nanpa { .. }))
        .count();
    if count > 1 {
        Err(Error::filtered("only one \"nanpa\" modifier is allowed"))
    } else {
        Ok(())
    }
}

fn single_proper_words(modifiers: &[Modifier], _: &Context) -> Result<()> {
    let count = modifiers
        .iter()
        .filter(|modifier| matches!(modifier, Modifier::ProperWords(_)))
        .count();
    if count > 1 {
        Err(Error::filtered("only one proper word modifier is allowed"))
    } else {
        Ok(())
    }
}

fn grouped_number_modifiers(modifiers: &[Modifier], context: &Context) -> Result<()> {
    let split = modifiers.windows(2).any(|pair| {
        is_number_modifier(&pair[0], context) && is_number_modifier(&pair[1], context)
    });
    if split {
        Err(Error::filtered("number words should be read as one number"))
    } else {
        Ok(())
    }
}

fn nanpa_ordinal(modifiers: &[Modifier], _: &Context) -> Result<()> {
    let Some(position) = modifiers
        .iter()
        .position(|modifier| matches!(modifier, Modifier::Default(unit) if unit.is_word("nanpa")))
    else {
        return Ok(());
    };
    if position + 1 < modifiers.len() {
        Err(Error::filtered(
            "\"nanpa\" followed by a modifier is an ordinal",
        ))
    } else {
        Ok(())
    }
}

// =============================================================================
// Phrase rules
// =============================================================================

fn preverb_modifiers(phrase: &Phrase, _: &Context) -> Result<()> {
    match phrase {
        Phrase::Preverb { modifiers, .. } if !only_ala(modifiers) => Err(Error::filtered(
            "preverb modifiers other than \"ala\" are not allowed",
        )),
        _ => Ok(()),
    }
}

fn grouped_number_head(phrase: &Phrase, context: &Context) -> Result<()> {
    match phrase {
        Phrase::Default { head, modifiers }
            if is_number_unit(head, context)
                && modifiers
                    .first()
                    .is_some_and(|first| is_number_modifier(first, context)) =>
        {
            Err(Error::filtered("number words should be read as one number"))
        }
        _ => Ok(()),
    }
}

fn preposition_modifiers(preposition: &Preposition, _: &Context) -> Result<()> {
    if only_ala(&preposition.modifiers) {
        Ok(())
    } else {
        Err(Error::filtered(
            "preposition modifiers other than \"ala\" are not allowed",
        ))
    }
}

// =============================================================================
// Clause and sentence rules
// =============================================================================

fn mi_li(clause: &Clause, _: &Context) -> Result<()> {
    let Clause::Li {
        subjects: MultiplePhrases::Single(Phrase::Default { head, modifiers }),
        explicit_li: true,
        ..
    } = clause
    else {
        return Ok(());
    };
    match head.as_word() {
        Some(word @ ("mi" | "sina")) if modifiers.is_empty() => {
            Err(Error::filtered(format!("\"{word} li\" is not allowed")))
        }
        _ => Ok(()),
    }
}

fn subject_phrase_kind(clause: &Clause, _: &Context) -> Result<()> {
    let subjects = match clause {
        Clause::Li { subjects, .. }
        | Clause::O {
            subjects: Some(subjects),
            ..
        } => subjects,
        _ => return Ok(()),
    };
    if subjects.phrases().iter().all(|phrase| phrase.is_default()) {
        Ok(())
    } else {
        Err(Error::filtered(
            "subjects cannot be preverb or preposition phrases",
        ))
    }
}

fn vocative_la(sentence: &Sentence, _: &Context) -> Result<()> {
    match sentence {
        Sentence::Default { la_clauses, .. }
            if la_clauses
                .iter()
                .any(|clause| matches!(clause, Clause::Vocative(_))) =>
        {
            Err(Error::filtered("a vocative cannot be a \"la\" context"))
        }
        _ => Ok(()),
    }
}

fn anu_seme_question(sentence: &Sentence, _: &Context) -> Result<()> {
    match sentence {
        Sentence::Default {
            la_clauses,
            final_clause,
            anu_seme: true,
            ..
        } if clause_interrogative(la_clauses.iter().chain([final_clause])).is_some() => Err(
            Error::filtered("\"anu seme\" cannot be combined with another question"),
        ),
        _ => Ok(()),
    }
}
