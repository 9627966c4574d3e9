//! Error types for the nasin system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! The display text of an [`Error`] is exactly the display text of its
//! [`ErrorKind`]; context never takes part in it, so two errors raised by
//! different branches of the search space compare equal by message.

use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for nasin operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records the filter rule that raised this error, keeping any position
    /// already attached.
    #[must_use]
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_rule(rule));
        self
    }

    /// Records where this error was raised, keeping any rule already
    /// attached.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_position(position));
        self
    }

    /// Creates an unexpected-token error.
    #[must_use]
    pub fn unexpected(found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
        })
    }

    /// Creates an unrecognized-element error.
    #[must_use]
    pub fn unrecognized(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedElement(description.into()))
    }

    /// Creates a filtered-out error.
    #[must_use]
    pub fn filtered(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::FilteredOut(description.into()))
    }

    /// Creates an exhausted error summarising a failed search.
    #[must_use]
    pub fn exhausted(what: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Exhausted(format!("no derivation found for {what}")))
    }

    /// Creates the placeholder used when a result set ends up empty without
    /// any error having been raised.
    #[must_use]
    pub fn no_error_provided() -> Self {
        Self::new(ErrorKind::Exhausted(NO_ERROR_PROVIDED.to_string()))
    }

    /// Creates a not-yet-supported error.
    #[must_use]
    pub fn not_yet_supported(construct: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotYetSupported(construct.into()))
    }

    /// Creates an input-too-long error.
    #[must_use]
    pub fn input_too_long(length: usize, limit: usize) -> Self {
        Self::new(ErrorKind::InputTooLong { length, limit })
    }

    /// Returns true if this is the "no error provided" placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(&self.kind, ErrorKind::Exhausted(message) if message == NO_ERROR_PROVIDED)
    }
}

const NO_ERROR_PROVIDED: &str = "no error provided";

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A specific construct was required and something else was found.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        /// Description of what was actually found.
        found: String,
        /// Description of what the parser needed.
        expected: String,
    },

    /// The construct parsed but is not licensed by the grammar or lexicon.
    #[error("{0}")]
    UnrecognizedElement(String),

    /// The node is well formed but violates a filter rule.
    #[error("{0}")]
    FilteredOut(String),

    /// Every alternative at an aggregation boundary failed.
    #[error("{0}")]
    Exhausted(String),

    /// A construct the grammar deliberately does not handle yet.
    #[error("{0} is not yet supported")]
    NotYetSupported(String),

    /// The input exceeds the configured length guard.
    #[error("input is too long ({length} characters, the limit is {limit})")]
    InputTooLong {
        /// Length of the rejected input in characters.
        length: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Name of the filter rule that raised the error.
    pub rule: Option<&'static str>,
    /// Position in the input (byte offset for text, index for tokens).
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule name.
    #[must_use]
    pub fn with_rule(mut self, rule: &'static str) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rule) = self.rule {
            write!(f, "in rule {rule}")?;
        }
        if let Some(position) = self.position {
            if self.rule.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at {position}")?;
        }
        Ok(())
    }
}
