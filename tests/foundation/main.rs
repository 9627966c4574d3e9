//! Integration tests for Layer 0: Foundation
//!
//! Tests for the error taxonomy and the eager and lazy result sets.

mod errors;
mod lazy;
mod result_set;
