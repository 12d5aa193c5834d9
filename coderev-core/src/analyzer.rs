//! The analyzer seam and its mock implementation.
//!
//! Session and UI code only ever see `Arc<dyn Analyzer>`. `MockAnalyzer` is
//! the one implementation shipped today: it waits a fixed latency and returns
//! the same three suggestions whatever the input. A real backend replaces it
//! behind the same trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::suggestion::{Category, Suggestion};

/// Latency of [`MockAnalyzer`] from call to result delivery.
pub const MOCK_LATENCY: Duration = Duration::from_millis(1500);

/// Produces suggestions for a piece of source text.
///
/// Implementations must be cheap to share across tasks; the runner clones the
/// `Arc` into the spawned analysis task.
#[async_trait]
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyzes `input` and returns suggestions in display order.
    async fn analyze(&self, input: &str) -> Vec<Suggestion>;
}

/// Stand-in analyzer with fixed latency and fixed output.
#[derive(Debug, Clone, Copy)]
pub struct MockAnalyzer {
    latency: Duration,
}

impl MockAnalyzer {
    /// Creates the mock with the standard 1.5 s latency.
    pub fn new() -> Self {
        Self {
            latency: MOCK_LATENCY,
        }
    }

    /// The fixed suggestion sequence returned by every call.
    pub fn canned_suggestions() -> Vec<Suggestion> {
        [
            (
                Category::Improvement,
                "Consider using const instead of let for variables that are not reassigned",
                3,
            ),
            (
                Category::Warning,
                "This function could benefit from TypeScript type annotations",
                5,
            ),
            (
                Category::Error,
                "Potential memory leak: useEffect cleanup function missing",
                12,
            ),
        ]
        .into_iter()
        .filter_map(|(category, message, line)| Suggestion::new(category, message, Some(line)).ok())
        .collect()
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, input: &str) -> Vec<Suggestion> {
        tracing::debug!(
            input_len = input.len(),
            latency_ms = self.latency.as_millis() as u64,
            "mock analysis started"
        );
        tokio::time::sleep(self.latency).await;
        Self::canned_suggestions()
    }
}
