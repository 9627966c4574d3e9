//! Ambiguity-preserving toki pona parser.
//!
//! This crate turns toki pona text into every syntax tree the grammar
//! allows, or into the deduplicated list of reasons no tree was found.
//!
//! # Architecture
//!
//! ```text
//! "sina ken ala toki pona e ijo la, sina sona ala e ijo."
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ LENGTH GUARD    │  → InputTooLong past `max_input_length`
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TOKENIZER       │  → [Word(sina), Word(ken), ..., Punctuation(",") ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ GRAMMAR         │  → word units, modifiers, phrases, clauses, sentences
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FILTER RULES    │  → drops readings such as `seme ala seme`
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESULT SET      │  → 6 distinct Vec<Sentence>, or the errors
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`dictionary`] - Word roles (content, preverb, preposition, number)
//! - [`config`] - Parser settings and the [`Context`] passed to the grammar
//! - [`token`] - Token forms
//! - [`ucsur`] - sitelen pona code points
//! - [`tokenizer`] - Text to tokens
//! - [`ast`] - Syntax trees
//! - [`filter`] - Named rules pruning unwanted readings
//! - [`grammar`] - The grammar over tokens
//! - [`engine`] - Entry points and caches
//!
//! # Example
//!
//! ```
//! use nasin_parser::{Context, parse};
//!
//! let result = parse("toki li pona", &Context::default());
//! assert_eq!(result.values().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod filter;
pub mod grammar;
pub mod token;
pub mod tokenizer;
pub mod ucsur;


pub use ast::{
    Clause, Emphasis, Interrogative, Modifier, MultiplePhrases, MultiplePredicates, Phrase,
    Preposition, Sentence, WordUnit, WordUnits,
};
pub use config::{Context, ParserConfig};
pub use dictionary::{Category, Definition, Dictionary};
pub use engine::{Engine, parse};
pub use filter::{FilterRule, FilterRules, RuleBatch, RuleBook};
pub use grammar::Grammar;
pub use token::{ProperWordKind, Token};
pub use tokenizer::Tokenizer;
