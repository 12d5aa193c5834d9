//! Suggestions panel renderer for coderev.
//!
//! The panel has exactly three renderings, chosen by
//! [`ReviewSession::results_view`](coderev_core::ReviewSession::results_view):
//! an idle placeholder, an animated "analyzing" message, or the list of
//! suggestions in the order the analyzer returned them.

use coderev_core::{Category, ResultsView, Suggestion};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Shown before any analysis has completed.
pub const EMPTY_PLACEHOLDER: &str = "Paste your code and press Ctrl-R to analyze it for suggestions";
/// Shown while an analysis is running.
pub const ANALYZING_TEXT: &str = "Analyzing your code...";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Improvement => "✔",
        Category::Warning => "✦",
        Category::Error => "✖",
    }
}

/// Styled lines for one suggestion: badge, message, optional line reference.
fn suggestion_lines(suggestion: &Suggestion, theme: &Theme) -> Vec<Line<'static>> {
    let color = theme.category(suggestion.category());
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", category_glyph(suggestion.category())),
                Style::default().fg(color),
            ),
            Span::styled(
                suggestion.category().as_str().to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            format!("  {}", suggestion.message()),
            Style::default().fg(color),
        ),
    ];
    if let Some(line) = suggestion.line() {
        lines.push(Line::styled(
            format!("  Line: {line}"),
            Style::default().fg(theme.suggestion_line),
        ));
    }
    lines
}

/// Builds the panel text for a results view.
///
/// Placeholder and analyzing texts are centred; populated results are a
/// left-aligned list with a blank line between entries.
pub fn results_text(view: ResultsView<'_>, spinner_frame: usize, theme: &Theme) -> Text<'static> {
    match view {
        ResultsView::Empty => Text::from(vec![
            Line::styled("</>", Style::default().fg(theme.placeholder)),
            Line::raw(""),
            Line::styled(EMPTY_PLACEHOLDER, Style::default().fg(theme.placeholder)),
        ])
        .alignment(Alignment::Center),
        ResultsView::Analyzing => Text::from(Line::styled(
            format!("{} {ANALYZING_TEXT}", SPINNER[spinner_frame % SPINNER.len()]),
            Style::default().fg(theme.analyzing),
        ))
        .alignment(Alignment::Center),
        ResultsView::Populated(suggestions) => {
            let mut lines = Vec::new();
            for (i, suggestion) in suggestions.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::raw(""));
                }
                lines.extend(suggestion_lines(suggestion, theme));
            }
            Text::from(lines)
        }
    }
}

/// Renders the suggestions panel.
///
/// The scroll offset is clamped to the wrapped row count at the panel's
/// width, so `G` can set it to `u16::MAX` without tracking content length.
pub fn render_suggestions(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Suggestions;
    let view = state.session.results_view();
    let title = match view {
        ResultsView::Populated(s) => format!("AI Suggestions ({})", s.len()),
        ResultsView::Empty | ResultsView::Analyzing => "AI Suggestions".to_owned(),
    };
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let text = results_text(view, state.spinner_frame, theme);
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });

    match view {
        ResultsView::Populated(_) => {
            let rows = paragraph.line_count(inner.width);
            let max_scroll = u16::try_from(rows.saturating_sub(usize::from(inner.height)))
                .unwrap_or(u16::MAX);
            state.suggestions_scroll = state.suggestions_scroll.min(max_scroll);
            frame.render_widget(paragraph.scroll((state.suggestions_scroll, 0)), inner);
        }
        ResultsView::Empty | ResultsView::Analyzing => {
            state.suggestions_scroll = 0;
            let centred = inner.centered(Constraint::Percentage(100), Constraint::Length(4));
            frame.render_widget(paragraph, centred);
        }
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

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn empty_view_shows_placeholder() {
        let text = results_text(ResultsView::Empty, 0, &Theme::dark());
        assert!(plain(&text).iter().any(|l| l == EMPTY_PLACEHOLDER));
    }

    #[test]
    fn analyzing_view_animates_spinner() {
        let theme = Theme::dark();
        let a = plain(&results_text(ResultsView::Analyzing, 0, &theme));
        let b = plain(&results_text(ResultsView::Analyzing, 1, &theme));
        assert_ne!(a, b);
        assert!(a[0].ends_with(ANALYZING_TEXT));
    }

    #[test]
    fn populated_view_lists_suggestions_in_order() {
        let suggestions = MockAnalyzer::canned_suggestions();
        let theme = Theme::dark();
        let lines = plain(&results_text(
            ResultsView::Populated(&suggestions),
            0,
            &theme,
        ));
        assert_eq!(lines[0], "✔ IMPROVEMENT");
        assert_eq!(
            lines[1],
            "  Consider using const instead of let for variables that are not reassigned"
        );
        assert_eq!(lines[2], "  Line: 3");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "✦ WARNING");
        assert_eq!(lines[6], "  Line: 5");
        assert_eq!(lines[8], "✖ ERROR");
        assert_eq!(lines[10], "  Line: 12");
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn suggestion_without_line_omits_annotation() {
        let suggestion = Suggestion::new(Category::Warning, "general", None).unwrap();
        let lines = suggestion_lines(&suggestion, &Theme::dark());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn category_colors_come_from_theme() {
        let theme = Theme::dark();
        let suggestions = MockAnalyzer::canned_suggestions();
        let lines = suggestion_lines(&suggestions[2], &theme);
        assert_eq!(lines[1].style.fg, Some(theme.suggestion_error));
    }

    #[test]
    fn scroll_bottom_reaches_last_suggestion_when_messages_wrap() {
        let handler = EventHandler::new();
        let mut state = AppState::new(Arc::new(MockAnalyzer::new()), handler.tx, "js");
        state.session.set_input("let x = 1;");
        let ticket = state.session.start_analysis().unwrap();
        state
            .session
            .complete_analysis(ticket.run, MockAnalyzer::canned_suggestions());

        // Narrower than the longest message, so every entry wraps.
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(50, 24)).unwrap();
        state.focus = PanelFocus::Suggestions;
        state.scroll_bottom();
        terminal
            .draw(|frame| crate::ui::render(frame, &mut state, &theme))
            .unwrap();

        let [_, suggestions] = state.panel_rects;
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(state.suggestions_scroll > 0);
        assert!(
            text.contains("Line: 12"),
            "last line reference not visible in a {}-row panel at scroll {}",
            suggestions.height,
            state.suggestions_scroll
        );
    }
}
