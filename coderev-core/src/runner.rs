//! Cancellable one-shot execution of an analysis ticket.
//!
//! `AnalysisRunner` spawns one tokio task per ticket. The task awaits the
//! analyzer and then calls the completion callback exactly once, unless the
//! runner cancels it first. Dropping the runner cancels the pending task, so
//! a torn-down view never receives a late completion.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::analyzer::Analyzer;
use crate::session::{AnalysisTicket, RunId};
use crate::suggestion::Suggestion;

/// Delivered to the completion callback when an analysis finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCompleted {
    /// Run the suggestions belong to.
    pub run: RunId,
    /// Analyzer output in display order.
    pub suggestions: Vec<Suggestion>,
}

/// Owns the task of the analysis in flight, if any.
#[derive(Debug, Default)]
pub struct AnalysisRunner {
    pending: Option<(RunId, JoinHandle<()>)>,
}

impl AnalysisRunner {
    /// Creates a runner with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `ticket` on the current tokio runtime.
    ///
    /// `on_complete` runs on the spawned task once the analyzer returns. Any
    /// task already pending is cancelled first, so at most one completion is
    /// ever outstanding.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<F>(&mut self, analyzer: Arc<dyn Analyzer>, ticket: AnalysisTicket, on_complete: F)
    where
        F: FnOnce(AnalysisCompleted) + Send + 'static,
    {
        self.cancel();
        let AnalysisTicket { run, input } = ticket;
        let handle = tokio::spawn(async move {
            let suggestions = analyzer.analyze(&input).await;
            on_complete(AnalysisCompleted { run, suggestions });
        });
        self.pending = Some((run, handle));
    }

    /// Aborts the pending task so its callback never fires.
    ///
    /// Returns the run that was still outstanding, or `None` when nothing was
    /// pending or the task had already finished.
    pub fn cancel(&mut self) -> Option<RunId> {
        let (run, handle) = self.pending.take()?;
        if handle.is_finished() {
            return None;
        }
        handle.abort();
        tracing::debug!(%run, "pending analysis aborted");
        Some(run)
    }

    /// True while a spawned analysis has not yet finished.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }

    /// Run id of the last started task, finished or not.
    pub fn current_run(&self) -> Option<RunId> {
        self.pending.as_ref().map(|(run, _)| *run)
    }
}

impl Drop for AnalysisRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{MockAnalyzer, MOCK_LATENCY};
    use crate::session::ReviewSession;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn mock() -> Arc<dyn Analyzer> {
        Arc::new(MockAnalyzer::new())
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completion_fires_after_latency() {
        let mut session = ReviewSession::new();
        session.set_input("let x = 1;");
        let ticket = session.start_analysis().unwrap();
        let run = ticket.run;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = AnalysisRunner::new();
        runner.start(mock(), ticket, move |done| {
            let _ = tx.send(done);
        });
        assert!(runner.is_pending());
        assert_eq!(runner.current_run(), Some(run));

        settle().await;
        tokio::time::advance(MOCK_LATENCY - Duration::from_millis(1)).await;
        settle().await;
        assert!(rx.try_recv().is_err());

        let done = rx.recv().await.expect("completion delivered");
        assert_eq!(done.run, run);
        assert_eq!(done.suggestions, MockAnalyzer::canned_suggestions());
        settle().await;
        assert!(!runner.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_callback() {
        let mut session = ReviewSession::new();
        session.set_input("code");
        let ticket = session.start_analysis().unwrap();
        let run = ticket.run;

        let (tx, mut rx) = mpsc::unbounded_channel::<AnalysisCompleted>();
        let mut runner = AnalysisRunner::new();
        runner.start(mock(), ticket, move |done| {
            let _ = tx.send(done);
        });
        assert_eq!(runner.cancel(), Some(run));
        assert!(!runner.is_pending());

        tokio::time::advance(MOCK_LATENCY * 2).await;
        // Sender is dropped with the aborted task, so the channel closes empty.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_runner_cancels_pending_task() {
        let (tx, mut rx) = mpsc::unbounded_channel::<AnalysisCompleted>();
        {
            let mut session = ReviewSession::new();
            session.set_input("code");
            let mut runner = AnalysisRunner::new();
            runner.start(mock(), session.start_analysis().unwrap(), move |done| {
                let _ = tx.send(done);
            });
        }
        tokio::time::advance(MOCK_LATENCY * 2).await;
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_completion_reports_nothing() {
        let mut session = ReviewSession::new();
        session.set_input("code");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = AnalysisRunner::new();
        runner.start(mock(), session.start_analysis().unwrap(), move |done| {
            let _ = tx.send(done);
        });
        rx.recv().await.expect("completion delivered");
        settle().await;
        assert_eq!(runner.cancel(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_pending_task() {
        let mut session = ReviewSession::new();
        session.set_input("code");
        let first = session.start_analysis().unwrap();
        session.cancel_analysis();
        let second = session.start_analysis().unwrap();
        let second_run = second.run;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx2 = tx.clone();
        let mut runner = AnalysisRunner::new();
        runner.start(mock(), first, move |done| {
            let _ = tx.send(done);
        });
        runner.start(mock(), second, move |done| {
            let _ = tx2.send(done);
        });

        let done = rx.recv().await.expect("second run completes");
        assert_eq!(done.run, second_run);
        assert_eq!(rx.recv().await, None);
    }
}
