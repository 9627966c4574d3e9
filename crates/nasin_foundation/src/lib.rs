//! Error taxonomy and result sets for nasin.
//!
//! This crate provides:
//! - [`Error`] - Typed parse errors with optional context
//! - [`NonEmpty`] - A vector that always holds at least one element
//! - [`ResultSet`] - Every valid value, or every error, never both
//! - [`LazyResultSet`] - The same algebra over an on-demand producer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod lazy;
pub mod non_empty;
pub mod result_set;


pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use lazy::{LazyIter, LazyResultSet};
pub use non_empty::NonEmpty;
pub use result_set::{Collector, ResultSet};
