//! coderev-core — review session state, suggestion model, and analyzer seam.
//!
//! Everything in this crate is independent of the terminal. The `coderev`
//! binary owns a [`session::ReviewSession`], hands its tickets to an
//! [`runner::AnalysisRunner`], and renders whatever the session reports.

pub mod analyzer;
pub mod error;
pub mod runner;
pub mod session;
pub mod suggestion;

pub use analyzer::{Analyzer, MockAnalyzer, MOCK_LATENCY};
pub use error::SuggestionError;
pub use runner::{AnalysisCompleted, AnalysisRunner};
pub use session::{AnalysisTicket, Phase, ResultsView, ReviewSession, RunId};
pub use suggestion::{Category, Suggestion};
