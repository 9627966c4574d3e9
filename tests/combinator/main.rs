//! Integration tests for Layer 1: Combinators
//!
//! Tests for ambiguity-preserving combinators, recursive rules, text
//! parsers and the packrat memo.

mod combinators;
mod memo;
