//! Integration tests for Layer 2: Parser
//!
//! Tests for the toki pona pipeline:
//! - Tokenization
//! - Grammar
//! - Filter rules
//! - Engine entry points and caches

mod engine_tests;
mod filter_tests;
mod grammar_tests;
mod tokenizer_tests;
