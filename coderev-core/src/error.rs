//! Error types for the suggestion model.

use thiserror::Error;

/// Rejections raised while building or parsing a [`crate::Suggestion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// The message was empty or only whitespace.
    #[error("suggestion message must not be empty")]
    EmptyMessage,
    /// Line references are 1-based; zero is not a line.
    #[error("suggestion line must be a positive number, got 0")]
    ZeroLine,
    /// The category string is not one of `improvement`, `warning`, `error`.
    #[error("unknown suggestion category '{value}': expected 'improvement', 'warning' or 'error'")]
    UnknownCategory {
        /// The rejected input.
        value: String,
    },
}
