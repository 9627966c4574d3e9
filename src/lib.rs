//! nasin - Ambiguity-preserving toki pona parser
//!
//! This crate re-exports all layers of the nasin system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: nasin_parser      Tokenizer, grammar, filter rules, engine
//! Layer 1: nasin_combinator  Memoized parser combinators, cache registry
//! Layer 0: nasin_foundation  Errors, eager and lazy result sets
//! ```

pub use nasin_combinator as combinator;
pub use nasin_foundation as foundation;
pub use nasin_parser as parser;

pub use nasin_parser::{Context, Engine, ParserConfig, parse};
