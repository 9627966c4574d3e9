//! Parser settings and the context threaded through grammar construction.

use std::rc::Rc;

use crate::dictionary::Dictionary;

/// Settings read when the grammar is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Longest accepted input, in characters.
    pub max_input_length: usize,

    /// Also read `x ala` (without the repeated word) as a polar question.
    pub x_ala_x_partial_parsing: bool,

    /// Keep whole-input results in the engine's result cache.
    pub cache_results: bool,

    /// Most inputs the result cache holds; reaching it empties the cache.
    pub result_cache_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_length: 500,
            x_ala_x_partial_parsing: false,
            cache_results: true,
            result_cache_capacity: 256,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for editors that parse while the user is typing: partial
    /// `x ala` questions are accepted and nothing is cached.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            x_ala_x_partial_parsing: true,
            cache_results: false,
            ..Self::default()
        }
    }

    /// Builder method to set the input length limit.
    #[must_use]
    pub fn with_max_input_length(mut self, limit: usize) -> Self {
        self.max_input_length = limit;
        self
    }

    /// Builder method to toggle partial `x ala x` parsing.
    #[must_use]
    pub fn with_x_ala_x_partial_parsing(mut self, enabled: bool) -> Self {
        self.x_ala_x_partial_parsing = enabled;
        self
    }

    /// Builder method to toggle the result cache.
    #[must_use]
    pub fn with_cache_results(mut self, enabled: bool) -> Self {
        self.cache_results = enabled;
        self
    }

    /// Builder method to bound the result cache.
    #[must_use]
    pub fn with_result_cache_capacity(mut self, capacity: usize) -> Self {
        self.result_cache_capacity = capacity;
        self
    }
}

/// The dictionary and settings a grammar is built against.
#[derive(Clone, Debug)]
pub struct Context {
    /// Word definitions.
    pub dictionary: Rc<Dictionary>,
    /// Parser settings.
    pub config: ParserConfig,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Dictionary::toki_pona(), ParserConfig::default())
    }
}

impl Context {
    /// Bundles a dictionary and settings.
    #[must_use]
    pub fn new(dictionary: Dictionary, config: ParserConfig) -> Self {
        Self {
            dictionary: Rc::new(dictionary),
            config,
        }
    }

    /// Builder method to replace the settings.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }
}
