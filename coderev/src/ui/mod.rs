//! UI rendering module for coderev.
//!
//! Re-exports `render()` as the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own renderer module.

pub mod editor_view;
pub mod help;
pub mod highlight;
pub mod keybindings;
mod layout;
pub mod suggestions_view;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_header, render_status_bar};

/// Renders one complete frame: header, editor, suggestions, and status bar.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`.
/// Viewport heights and panel rects are written back into `state` so scroll
/// and mouse handling for the next event use the geometry just drawn.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [header, editor, suggestions, status_bar] = compute_layout(frame.area());

    state.editor_viewport_height = inner_rect(editor).height;
    state.suggestions_viewport_height = inner_rect(suggestions).height;
    state.panel_rects = [editor, suggestions];

    render_header(frame, header, theme);
    editor_view::render_editor(frame, editor, state, theme);
    suggestions_view::render_suggestions(frame, suggestions, state, theme);
    render_status_bar(frame, status_bar, state, theme);

    // Overlay last so it sits on top.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventHandler;
    use coderev_core::MockAnalyzer;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_empty_state() {
        let handler = EventHandler::new();
        let mut state = AppState::new(Arc::new(MockAnalyzer::new()), handler.tx, "js");
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut state, &theme))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("AI Code Review Assistant"));
        assert!(text.contains("Your Code"));
        assert!(text.contains("AI Suggestions"));
        assert!(text.contains(editor_view::EDITOR_PLACEHOLDER));
        assert!(text.contains("[ Analyze ^R ]"));
        assert_eq!(state.panel_rects[0].height, 28);
    }

    #[tokio::test(start_paused = true)]
    async fn renders_analyzing_then_results() {
        let handler = EventHandler::new();
        let mut rx = handler.rx;
        let mut state = AppState::new(Arc::new(MockAnalyzer::new()), handler.tx, "js");
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        state.edit(|e| e.insert_str("let x = 1;"));
        state.trigger_analysis();
        terminal
            .draw(|frame| render(frame, &mut state, &theme))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains(suggestions_view::ANALYZING_TEXT));
        assert!(text.contains("Analyzing..."));

        match rx.recv().await {
            Some(crate::event::AppEvent::AnalysisCompleted(done)) => state.apply_analysis(done),
            other => panic!("expected completion, got {other:?}"),
        }
        terminal
            .draw(|frame| render(frame, &mut state, &theme))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("AI Suggestions (3)"));
        assert!(text.contains("IMPROVEMENT"));
        assert!(text.contains("Line: 12"));
    }
}
