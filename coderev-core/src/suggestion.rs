//! Suggestion records produced by an analyzer.
//!
//! A suggestion is one unit of feedback about the submitted code: a category
//! tag, a human-readable message, and an optional 1-based line reference.
//! Construction validates the message and line so every `Suggestion` in a
//! session is displayable as-is.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::SuggestionError;

/// Closed set of suggestion categories.
///
/// Display order in the UI is the order suggestions arrive in, not the
/// category order; the variants only drive badge text and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A style or quality improvement.
    Improvement,
    /// Something that is likely a problem.
    Warning,
    /// Something that is definitely a problem.
    Error,
}

impl Category {
    /// All categories, in severity order.
    pub const ALL: [Category; 3] = [Category::Improvement, Category::Warning, Category::Error];

    /// Lowercase tag used for display and parsing.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Improvement => "improvement",
            Category::Warning => "warning",
            Category::Error => "error",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SuggestionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "improvement" => Ok(Category::Improvement),
            "warning" => Ok(Category::Warning),
            "error" => Ok(Category::Error),
            _ => Err(SuggestionError::UnknownCategory {
                value: value.to_owned(),
            }),
        }
    }
}

/// One piece of feedback about the analyzed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    category: Category,
    message: String,
    line: Option<NonZeroU32>,
}

impl Suggestion {
    /// Builds a suggestion, rejecting blank messages and line `0`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::EmptyMessage`] when `message` has no
    /// non-whitespace content and [`SuggestionError::ZeroLine`] for `Some(0)`.
    pub fn new(
        category: Category,
        message: impl Into<String>,
        line: Option<u32>,
    ) -> Result<Self, SuggestionError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(SuggestionError::EmptyMessage);
        }
        let line = match line {
            Some(n) => Some(NonZeroU32::new(n).ok_or(SuggestionError::ZeroLine)?),
            None => None,
        };
        Ok(Self {
            category,
            message,
            line,
        })
    }

    /// Category tag.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Human-readable feedback text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based line in the input, or `None` when not line-specific.
    pub fn line(&self) -> Option<u32> {
        self.line.map(NonZeroU32::get)
    }
}
