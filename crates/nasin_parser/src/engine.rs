//! The parse entry points.
//!
//! An [`Engine`] owns a tokenizer, a grammar built against its [`Context`]
//! and [`RuleBook`], and the caches that go stale when either changes. Every
//! cache is registered in one [`CacheRegistry`], so swapping the dictionary
//! or the settings clears them all at once.
//!
//! The result cache is bounded by
//! [`ParserConfig::result_cache_capacity`]: once full it is emptied before
//! the next insert.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use nasin_combinator::{Cache, CacheRegistry, Clearable, Cursor, Memo};
use nasin_foundation::{Error, LazyResultSet, ResultSet};
use tracing::debug;

use crate::ast::Sentence;
use crate::config::{Context, ParserConfig};
use crate::dictionary::Dictionary;
use crate::filter::RuleBook;
use crate::grammar::Grammar;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

type Results = Cache<String, ResultSet<Vec<Sentence>>>;

/// Parses text into every reading the grammar allows.
pub struct Engine {
    context: Context,
    rules: RuleBook,
    tokenizer: Tokenizer,
    grammar: Rc<Grammar>,
    registry: CacheRegistry,
    results: Rc<Results>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.context.config)
            .field("words", &self.context.dictionary.len())
            .field("cached", &self.results.len())
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Context::default())
    }
}

impl Engine {
    /// Creates an engine with the standard rules.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self::with_rules(context, RuleBook::standard())
    }

    /// Creates an engine with a custom rule book.
    #[must_use]
    pub fn with_rules(context: Context, rules: RuleBook) -> Self {
        let registry = CacheRegistry::new();
        let results = Rc::new(Cache::new("results"));
        registry.register(&results);
        let grammar = Rc::new(Grammar::new(&context, &rules));
        Self {
            context,
            rules,
            tokenizer: Tokenizer::new(),
            grammar,
            registry,
            results,
        }
    }

    /// The dictionary and settings in use.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The rules in use.
    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// The registry holding every cache this engine fills.
    #[must_use]
    pub fn registry(&self) -> &CacheRegistry {
        &self.registry
    }

    /// Number of inputs whose results are cached.
    #[must_use]
    pub fn cached_results(&self) -> usize {
        self.results.len()
    }

    /// Replaces the dictionary, rebuilding the grammar.
    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        debug!(words = dictionary.len(), "replacing dictionary");
        self.context.dictionary = Rc::new(dictionary);
        self.rebuild();
    }

    /// Replaces the settings, rebuilding the grammar.
    pub fn set_config(&mut self, config: ParserConfig) {
        debug!(?config, "replacing parser settings");
        self.context.config = config;
        self.rebuild();
    }

    /// Replaces the rules, rebuilding the grammar.
    pub fn set_rules(&mut self, rules: RuleBook) {
        self.rules = rules;
        self.rebuild();
    }

    /// Clears every registered cache, returning how many were live.
    pub fn clear_caches(&self) -> usize {
        self.registry.clear_all()
    }

    fn rebuild(&mut self) {
        self.grammar = Rc::new(Grammar::new(&self.context, &self.rules));
        self.clear_caches();
    }

    /// Parses `text` into every distinct reading.
    ///
    /// On failure the errors are deduplicated by message; if nothing more
    /// specific than "no error provided" was collected, a single
    /// [`Error::exhausted`] naming the input is returned instead.
    pub fn parse(&self, text: &str) -> ResultSet<Vec<Sentence>> {
        let cache = self.context.config.cache_results;
        if cache {
            if let Some(cached) = self.results.get(&text.to_string()) {
                debug!(length = text.len(), "served parse from result cache");
                return cached;
            }
        }

        let result = summarize(text, self.parse_lazy(text).collect());
        match &result {
            ResultSet::Values(values) => debug!(derivations = values.len(), "parse succeeded"),
            ResultSet::Errors(errors) => debug!(errors = errors.len(), "parse failed"),
        }
        if cache {
            if self.results.len() >= self.context.config.result_cache_capacity {
                debug!(entries = self.results.len(), "result cache full, clearing");
                self.results.clear();
            }
            self.results.insert(text.to_string(), result.clone());
        }
        result
    }

    /// Parses `text` on demand: each pulled item is one full reading.
    ///
    /// The length guard and the tokenizer run immediately; sentences are
    /// parsed only as readings are pulled. Readings are distinct. If no
    /// reading exists, the filter and lexicon rejections met along the way
    /// follow the structural errors, including those raised in branches a
    /// sibling completed locally.
    pub fn parse_lazy(&self, text: &str) -> LazyResultSet<Vec<Sentence>> {
        let length = text.chars().count();
        let limit = self.context.config.max_input_length;
        if length > limit {
            return LazyResultSet::error(Error::input_too_long(length, limit));
        }
        let tokens = match self.tokenizer.tokenize(text) {
            Ok(tokens) => tokens,
            Err(error) => return LazyResultSet::error(error),
        };
        if tokens.is_empty() {
            return LazyResultSet::error(Error::unexpected("end of text", "a sentence"));
        }
        debug!(length, tokens = tokens.len(), "parsing");

        let memo = self.registry.memo();
        let mut seen = HashSet::new();
        let readings = sentences_from(Rc::clone(&self.grammar), tokens.into(), 0, memo.clone())
            .filter(move |sentences| Ok(seen.insert(sentences.clone())));
        let finished = readings.clone();
        let violations = LazyResultSet::defer(move || {
            if finished.has_values() {
                LazyResultSet::from_values(Vec::new())
            } else {
                LazyResultSet::new(memo.violations().into_iter().map(Err))
            }
        });
        LazyResultSet::concat(vec![readings, violations])
    }
}

/// Every way to read `tokens[position..]` as sentences.
fn sentences_from(
    grammar: Rc<Grammar>,
    tokens: Rc<[Token]>,
    position: usize,
    memo: Memo,
) -> LazyResultSet<Vec<Sentence>> {
    if position == tokens.len() {
        return LazyResultSet::single(Vec::new());
    }
    LazyResultSet::defer(move || {
        let parsed = grammar
            .sentence()
            .parse(Cursor::new(&tokens[..]).at(position), &memo)
            .map(|(sentence, next)| (sentence, next.position()));
        LazyResultSet::from(parsed).flat_map(move |(sentence, next)| {
            sentences_from(Rc::clone(&grammar), Rc::clone(&tokens), next, memo.clone()).map(
                move |rest| {
                    let mut sentences = Vec::with_capacity(rest.len() + 1);
                    sentences.push(sentence.clone());
                    sentences.extend(rest);
                    sentences
                },
            )
        })
    })
}

/// Deduplicates errors and replaces a bare placeholder by a summary.
fn summarize(text: &str, result: ResultSet<Vec<Sentence>>) -> ResultSet<Vec<Sentence>> {
    match result.deduplicate_errors() {
        ResultSet::Errors(errors) => match errors.retain(|error| !error.is_placeholder()) {
            Some(errors) => ResultSet::Errors(errors),
            None => ResultSet::error(Error::exhausted(format!("\"{text}\""))),
        },
        values @ ResultSet::Values(_) => values,
    }
}

thread_local! {
    static SHARED: RefCell<Option<Engine>> = const { RefCell::new(None) };
}

/// Parses `text` with an engine built for `context`.
///
/// The engine is kept per thread and reused while the dictionary and
/// settings stay the same, so repeated calls build the grammar only once.
pub fn parse(text: &str, context: &Context) -> ResultSet<Vec<Sentence>> {
    let reusable = |engine: &Engine| {
        engine.context.config == context.config
            && (Rc::ptr_eq(&engine.context.dictionary, &context.dictionary)
                || engine.context.dictionary == context.dictionary)
    };
    let engine = match SHARED.with(|shared| shared.borrow_mut().take()) {
        Some(engine) if reusable(&engine) => engine,
        _ => {
            debug!("building shared engine");
            Engine::new(context.clone())
        }
    };
    let result = engine.parse(text);
    SHARED.with(|shared| *shared.borrow_mut() = Some(engine));
    result
}
