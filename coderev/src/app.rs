//! Central application state for coderev.
//!
//! `AppState` owns the review session, the editor buffer, the analysis runner,
//! and the UI bookkeeping (mode, focus, scroll offsets, cached panel geometry).
//! No ratatui rendering logic lives here — the render module reads this state
//! and the keybinding dispatcher mutates it.

use std::sync::Arc;

use coderev_core::{AnalysisCompleted, AnalysisRunner, Analyzer, ReviewSession};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::editor::Editor;
use crate::event::AppEvent;
use crate::ui::highlight::Highlighter;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation mode (default).
    #[default]
    Normal,
    /// Keystrokes edit the code buffer.
    Insert,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
}

/// Which panel currently has keyboard focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left (or top) panel holding the code editor.
    #[default]
    Editor,
    /// Right (or bottom) panel listing suggestions.
    Suggestions,
}

impl PanelFocus {
    /// The other panel; with two panels next and previous coincide.
    pub fn toggle(self) -> Self {
        match self {
            PanelFocus::Editor => PanelFocus::Suggestions,
            PanelFocus::Suggestions => PanelFocus::Editor,
        }
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    /// Current editor mode governing which keybindings are active.
    pub mode: Mode,
    /// Which panel currently receives keyboard scroll/navigation events.
    pub focus: PanelFocus,

    /// Input, analyzing flag and results.
    pub session: ReviewSession,
    /// Text buffer backing the editor panel.
    pub editor: Editor,
    /// Syntax-highlighted editor lines, recomputed when the buffer changes.
    pub highlighter: Highlighter,

    /// Vertical scroll offset of the suggestions panel.
    pub suggestions_scroll: u16,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,
    /// Inner height of the editor panel after borders, cached after each render.
    pub editor_viewport_height: u16,
    /// Inner height of the suggestions panel after borders, cached after each render.
    pub suggestions_viewport_height: u16,
    /// Outer rects of [editor, suggestions], cached for mouse hit-testing.
    pub panel_rects: [Rect; 2],

    /// Advanced on every logic tick while analyzing.
    pub spinner_frame: usize,

    analyzer: Arc<dyn Analyzer>,
    runner: AnalysisRunner,
    event_tx: UnboundedSender<AppEvent>,
}

impl AppState {
    /// Creates the state for a fresh view.
    ///
    /// Completions from `analyzer` are delivered as
    /// [`AppEvent::AnalysisCompleted`] on `event_tx`.
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        event_tx: UnboundedSender<AppEvent>,
        syntax: &str,
    ) -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            session: ReviewSession::new(),
            editor: Editor::default(),
            highlighter: Highlighter::new(syntax),
            suggestions_scroll: 0,
            help_scroll: 0,
            editor_viewport_height: 0,
            suggestions_viewport_height: 0,
            panel_rects: [Rect::default(); 2],
            spinner_frame: 0,
            analyzer,
            runner: AnalysisRunner::new(),
            event_tx,
        }
    }

    /// Applies `edit` to the buffer and pushes changed text into the session.
    pub fn edit(&mut self, edit: impl FnOnce(&mut Editor)) {
        let before = self.editor.version();
        edit(&mut self.editor);
        if self.editor.version() != before {
            self.session.set_input(self.editor.text());
        }
        self.editor
            .keep_cursor_visible(usize::from(self.editor_viewport_height));
    }

    /// Inserts pasted text at the cursor.
    ///
    /// Paste always targets the editor, switching focus and entering Insert
    /// mode so the user can keep typing.
    pub fn paste(&mut self, text: &str) {
        if self.mode == Mode::HelpOverlay {
            return;
        }
        self.focus = PanelFocus::Editor;
        self.mode = Mode::Insert;
        self.edit(|editor| editor.insert_str(text));
    }

    /// Triggers an analysis when the trigger is enabled.
    ///
    /// Returns `false` without side effects when the input is blank or an
    /// analysis is already running.
    pub fn trigger_analysis(&mut self) -> bool {
        let Some(ticket) = self.session.start_analysis() else {
            return false;
        };
        tracing::info!(run = %ticket.run, "analysis requested");
        let tx = self.event_tx.clone();
        self.runner
            .start(Arc::clone(&self.analyzer), ticket, move |done| {
                let _ = tx.send(AppEvent::AnalysisCompleted(done));
            });
        self.suggestions_scroll = 0;
        self.spinner_frame = 0;
        true
    }

    /// Applies a completion received from the event bus.
    pub fn apply_analysis(&mut self, done: AnalysisCompleted) {
        let run = done.run;
        if self.session.complete_analysis(run, done.suggestions) {
            tracing::info!(%run, count = self.session.results().len(), "analysis applied");
            self.suggestions_scroll = 0;
        }
    }

    /// Logic tick: advances the spinner while analyzing.
    pub fn on_tick(&mut self) {
        if self.session.is_analyzing() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Cancels any pending analysis; called once before the view is torn down.
    pub fn shutdown(&mut self) {
        if let Some(run) = self.runner.cancel() {
            tracing::info!(%run, "pending analysis cancelled on shutdown");
        }
        self.session.cancel_analysis();
    }

    /// Scrolls the focused panel down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Editor => self.editor.scroll_by(lines as isize),
            PanelFocus::Suggestions => {
                self.suggestions_scroll = self.suggestions_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Editor => self.editor.scroll_by(-(lines as isize)),
            PanelFocus::Suggestions => {
                self.suggestions_scroll = self.suggestions_scroll.saturating_sub(lines);
            }
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Editor => self.editor.scroll_by(isize::MIN),
            PanelFocus::Suggestions => self.suggestions_scroll = 0,
        }
    }

    /// Scrolls the focused panel to the very bottom.
    ///
    /// The suggestions offset is clamped by the renderer.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Editor => self.editor.scroll_by(isize::MAX),
            PanelFocus::Suggestions => self.suggestions_scroll = u16::MAX,
        }
    }

    /// Scrolls the focused panel down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render; scrolls by at
    /// least one row on the first frame.
    pub fn half_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height() / 2);
    }

    /// Scrolls the focused panel up by half its visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height() / 2);
    }

    fn focused_viewport_height(&self) -> u16 {
        let height = match self.focus {
            PanelFocus::Editor => self.editor_viewport_height,
            PanelFocus::Suggestions => self.suggestions_viewport_height,
        };
        height.max(2)
    }
}
