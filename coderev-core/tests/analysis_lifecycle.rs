//! End-to-end lifecycle of a review session driven by the mock analyzer.
//!
//! Exercises: ReviewSession, AnalysisRunner, MockAnalyzer wired together the
//! way the TUI wires them — completions travel over a channel and are applied
//! by the owner of the session.

use std::sync::Arc;
use std::time::Duration;

use coderev_core::{
    AnalysisCompleted, AnalysisRunner, Analyzer, Category, MockAnalyzer, Phase, ResultsView,
    ReviewSession, MOCK_LATENCY,
};
use tokio::sync::mpsc;

struct Harness {
    session: ReviewSession,
    runner: AnalysisRunner,
    analyzer: Arc<dyn Analyzer>,
    tx: mpsc::UnboundedSender<AnalysisCompleted>,
    rx: mpsc::UnboundedReceiver<AnalysisCompleted>,
}

impl Harness {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session: ReviewSession::new(),
            runner: AnalysisRunner::new(),
            analyzer: Arc::new(MockAnalyzer::new()),
            tx,
            rx,
        }
    }

    /// Mirrors the trigger: a no-op unless the session hands out a ticket.
    fn trigger(&mut self) -> bool {
        let Some(ticket) = self.session.start_analysis() else {
            return false;
        };
        let tx = self.tx.clone();
        self.runner
            .start(Arc::clone(&self.analyzer), ticket, move |done| {
                let _ = tx.send(done);
            });
        true
    }

    async fn apply_next(&mut self) {
        let done = self.rx.recv().await.expect("completion delivered");
        self.session.complete_analysis(done.run, done.suggestions);
    }
}

#[tokio::test(start_paused = true)]
async fn empty_input_never_starts() {
    let mut h = Harness::new();
    assert!(!h.trigger());
    h.session.set_input("   \n");
    assert!(!h.trigger());
    assert_eq!(h.session.phase(), Phase::Idle);
    assert!(!h.runner.is_pending());
    assert_eq!(h.session.results_view(), ResultsView::Empty);
}

#[tokio::test(start_paused = true)]
async fn single_analysis_yields_the_three_fixed_suggestions() {
    let mut h = Harness::new();
    h.session.set_input("let x = 1;");
    assert!(h.trigger());

    // Flag is set before any time passes.
    assert!(h.session.is_analyzing());
    assert!(h.session.results().is_empty());

    let started = tokio::time::Instant::now();
    h.apply_next().await;
    assert!(started.elapsed() >= MOCK_LATENCY);

    assert!(!h.session.is_analyzing());
    let categories: Vec<Category> = h.session.results().iter().map(|s| s.category()).collect();
    assert_eq!(
        categories,
        vec![Category::Improvement, Category::Warning, Category::Error]
    );
    let lines: Vec<Option<u32>> = h.session.results().iter().map(|s| s.line()).collect();
    assert_eq!(lines, vec![Some(3), Some(5), Some(12)]);
}

#[tokio::test(start_paused = true)]
async fn double_trigger_within_delay_completes_once() {
    let mut h = Harness::new();
    h.session.set_input("let x = 1;");
    assert!(h.trigger());

    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(!h.trigger(), "second trigger must be suppressed");

    h.apply_next().await;
    assert_eq!(h.session.results().len(), 3);

    // Nothing else is outstanding.
    tokio::time::advance(MOCK_LATENCY * 2).await;
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn second_run_replaces_rather_than_appends() {
    let mut h = Harness::new();
    h.session.set_input("let x = 1;");
    assert!(h.trigger());
    h.apply_next().await;
    assert!(h.trigger());
    assert_eq!(h.session.results_view(), ResultsView::Analyzing);
    h.apply_next().await;
    assert_eq!(h.session.results().len(), 3);
    assert_eq!(h.session.results(), MockAnalyzer::canned_suggestions().as_slice());
}

#[tokio::test(start_paused = true)]
async fn edits_during_analysis_do_not_affect_the_run() {
    let mut h = Harness::new();
    h.session.set_input("let x = 1;");
    assert!(h.trigger());
    h.session.set_input("");
    assert!(h.session.is_analyzing());
    h.apply_next().await;
    assert_eq!(h.session.results().len(), 3);
    assert!(!h.session.can_analyze());
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_completion() {
    let mut h = Harness::new();
    h.session.set_input("let x = 1;");
    assert!(h.trigger());
    h.runner.cancel();
    h.session.cancel_analysis();
    drop(h.tx);

    tokio::time::advance(MOCK_LATENCY * 2).await;
    assert!(h.rx.recv().await.is_none());
    assert_eq!(h.session.results_view(), ResultsView::Empty);
}
