//! Review session state: input text, the analyzing flag, and current results.
//!
//! `ReviewSession` is a two-state machine:
//!
//! ```text
//! Idle --start_analysis (input not blank)--> Analyzing(run)
//! Analyzing(run) --complete_analysis(run, ..)--> Idle   (results replaced)
//! Analyzing(run) --cancel_analysis--> Idle              (results untouched)
//! ```
//!
//! `start_analysis` does not schedule anything itself. It flips the flag and
//! hands back an [`AnalysisTicket`] carrying the run id and a snapshot of the
//! input; the caller passes the ticket to an [`crate::AnalysisRunner`], which
//! later feeds the completion back through `complete_analysis`. Completions
//! for any run other than the one in flight are dropped.
//!
//! Every mutation bumps a revision counter published on a `watch` channel so
//! observers can re-render on change.

use std::fmt;

use tokio::sync::watch;

use crate::suggestion::Suggestion;

/// Identifies one analysis run within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    /// Numeric value, starting at 1 for the first run of a session.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Current state of the session's state machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No analysis running; the trigger is available if input is present.
    #[default]
    Idle,
    /// An analysis is in flight.
    Analyzing(RunId),
}

/// Handed out by [`ReviewSession::start_analysis`] for the runner to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    /// Run this ticket belongs to; the completion must carry it back.
    pub run: RunId,
    /// Input text as it was when the run started.
    pub input: String,
}

/// What the results panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView<'a> {
    /// Nothing analyzed yet and nothing running.
    Empty,
    /// An analysis is running; shown even if older results exist.
    Analyzing,
    /// The results of the last completed analysis.
    Populated(&'a [Suggestion]),
}

/// The single unit of state for one view instance.
#[derive(Debug)]
pub struct ReviewSession {
    input: String,
    phase: Phase,
    results: Vec<Suggestion>,
    last_run: u64,
    changes: watch::Sender<u64>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// Creates an idle session with empty input and no results.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            input: String::new(),
            phase: Phase::Idle,
            results: Vec::new(),
            last_run: 0,
            changes,
        }
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current state machine phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while an analysis is in flight.
    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing(_))
    }

    /// Results of the last completed analysis, in display order.
    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }

    /// Returns a receiver that observes the revision counter.
    ///
    /// The counter increases by one on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Current revision; starts at 0 for a fresh session.
    pub fn revision(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Replaces the input text. Never touches the flag or the results.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.notify();
    }

    /// Whether the analysis trigger is enabled.
    ///
    /// False while analyzing, and false when the input is empty or contains
    /// only whitespace.
    pub fn can_analyze(&self) -> bool {
        !self.is_analyzing() && !self.input.trim().is_empty()
    }

    /// Starts an analysis if the trigger is enabled.
    ///
    /// Sets the analyzing flag before returning. Returns `None`, changing
    /// nothing, when [`Self::can_analyze`] is false.
    pub fn start_analysis(&mut self) -> Option<AnalysisTicket> {
        if !self.can_analyze() {
            tracing::debug!(analyzing = self.is_analyzing(), "analysis trigger suppressed");
            return None;
        }
        self.last_run += 1;
        let run = RunId(self.last_run);
        self.phase = Phase::Analyzing(run);
        self.notify();
        tracing::debug!(%run, input_len = self.input.len(), "analysis started");
        Some(AnalysisTicket {
            run,
            input: self.input.clone(),
        })
    }

    /// Applies the result of `run`, replacing the results and going idle.
    ///
    /// Returns `false` and changes nothing if `run` is not the run in flight.
    pub fn complete_analysis(&mut self, run: RunId, suggestions: Vec<Suggestion>) -> bool {
        if self.phase != Phase::Analyzing(run) {
            tracing::debug!(%run, phase = ?self.phase, "ignoring stale analysis completion");
            return false;
        }
        self.results = suggestions;
        self.phase = Phase::Idle;
        self.notify();
        tracing::debug!(%run, count = self.results.len(), "analysis completed");
        true
    }

    /// Abandons the run in flight, keeping the previous results.
    ///
    /// Returns the abandoned run, or `None` if the session was idle.
    pub fn cancel_analysis(&mut self) -> Option<RunId> {
        let Phase::Analyzing(run) = self.phase else {
            return None;
        };
        self.phase = Phase::Idle;
        self.notify();
        tracing::debug!(%run, "analysis cancelled");
        Some(run)
    }

    /// Label for the trigger control.
    pub fn trigger_label(&self) -> &'static str {
        if self.is_analyzing() {
            "Analyzing..."
        } else {
            "Analyze"
        }
    }

    /// Which of the three result renderings applies right now.
    pub fn results_view(&self) -> ResultsView<'_> {
        if self.is_analyzing() {
            ResultsView::Analyzing
        } else if self.results.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Populated(&self.results)
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }
}
