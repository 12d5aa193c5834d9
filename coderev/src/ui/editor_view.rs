//! Editor panel renderer for coderev.
//!
//! Draws the "Your Code" panel: a line-number gutter, the syntax-highlighted
//! buffer window starting at the editor's scroll offset, and the analysis
//! trigger in the top-right border. Only the visible window of lines is
//! materialised per frame.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use coderev_core::ReviewSession;
use unicode_width::UnicodeWidthChar;

use crate::app::{AppState, Mode, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Shown in the editor while the buffer is empty.
pub const EDITOR_PLACEHOLDER: &str = "Paste your code here...";

/// Builds the trigger control shown in the editor's top border.
///
/// Uses the enabled color only when the session would accept a start; the
/// label follows [`ReviewSession::trigger_label`].
pub fn trigger_line(session: &ReviewSession, theme: &Theme) -> Line<'static> {
    let style = if session.can_analyze() {
        Style::default()
            .fg(theme.trigger_enabled)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.trigger_disabled)
    };
    Line::from(Span::styled(
        format!("[ {} ^R ]", session.trigger_label()),
        style,
    ))
}

/// Width of the line-number gutter including its trailing space.
fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).ilog10() as u16 + 1;
    digits.max(3) + 1
}

/// Terminal columns taken by the first `col` chars of `line`.
fn display_width(line: &str, col: usize) -> usize {
    line.chars().take(col).map(|c| c.width().unwrap_or(0)).sum()
}

/// Renders the editor panel and, in Insert mode, places the terminal cursor.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the `Rect` for the editor panel (includes borders)
/// * `state` — app state; the highlighter cache and editor scroll are updated
/// * `theme` — active color theme
pub fn render_editor(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Editor;
    let block = panel_block("Your Code", is_focused, theme)
        .title_top(trigger_line(&state.session, theme).right_aligned());
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let editing = is_focused && state.mode == Mode::Insert;
    let gutter = gutter_width(state.editor.lines().len());

    if state.editor.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(
                EDITOR_PLACEHOLDER,
                Style::default().fg(theme.placeholder),
            )),
            inner,
        );
        if editing {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let viewport = usize::from(inner.height);
    if editing {
        state.editor.keep_cursor_visible(viewport);
    }
    let start = state.editor.scroll();
    let highlighted = state.highlighter.lines(&state.editor);
    let end = (start + viewport).min(highlighted.len());
    let gutter_style = Style::default().fg(theme.gutter);

    let visible: Vec<Line> = highlighted
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            let number = format!(
                "{:>width$} ",
                start + offset + 1,
                width = usize::from(gutter - 1)
            );
            let mut spans = vec![Span::styled(number, gutter_style)];
            spans.extend(line.spans.iter().cloned());
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().fg(theme.editor_text)),
        inner,
    );

    let (row, col) = state.editor.cursor();
    if editing && (start..end).contains(&row) {
        let line = state.editor.lines().get(row).map_or("", String::as_str);
        let offset = u16::try_from(display_width(line, col)).unwrap_or(u16::MAX);
        let max_x = inner.right().saturating_sub(1);
        let x = (inner.x + gutter).saturating_add(offset).min(max_x);
        let y = inner.y + (row - start) as u16;
        frame.set_cursor_position((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventHandler;
    use coderev_core::{MockAnalyzer, ReviewSession};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use ratatui::Terminal;
    use std::sync::Arc;

    #[test]
    fn trigger_reflects_session_state() {
        let theme = Theme::dark();
        let mut session = ReviewSession::new();

        let disabled = trigger_line(&session, &theme);
        assert_eq!(disabled.spans[0].content, "[ Analyze ^R ]");
        assert_eq!(disabled.spans[0].style.fg, Some(theme.trigger_disabled));

        session.set_input("let x = 1;");
        let enabled = trigger_line(&session, &theme);
        assert_eq!(enabled.spans[0].style.fg, Some(theme.trigger_enabled));

        session.start_analysis();
        let running = trigger_line(&session, &theme);
        assert_eq!(running.spans[0].content, "[ Analyzing... ^R ]");
        assert_eq!(running.spans[0].style.fg, Some(theme.trigger_disabled));
    }

    #[test]
    fn gutter_grows_with_line_count() {
        assert_eq!(gutter_width(1), 4);
        assert_eq!(gutter_width(999), 4);
        assert_eq!(gutter_width(1000), 5);
    }

    #[test]
    fn wide_chars_count_two_columns() {
        assert_eq!(display_width("日本x", 0), 0);
        assert_eq!(display_width("日本x", 2), 4);
        assert_eq!(display_width("日本x", 3), 5);
        assert_eq!(display_width("abc", 10), 3);
    }

    #[test]
    fn cursor_follows_display_width_after_cjk_text() {
        let handler = EventHandler::new();
        let mut state = AppState::new(Arc::new(MockAnalyzer::new()), handler.tx, "txt");
        state.mode = Mode::Insert;
        state.edit(|e| e.insert_str("// 日本"));

        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| crate::ui::render(frame, &mut state, &theme))
            .unwrap();

        // Panel at x=0 with inner x=1, 4-column gutter, then "// " (3) + 2 wide chars (4).
        let [editor, _] = state.panel_rects;
        let inner = crate::ui::layout::inner_rect(editor);
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            Position::new(inner.x + 4 + 7, inner.y)
        );
    }
}
