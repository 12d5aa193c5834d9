//! Responsive 2-panel layout engine for coderev.
//!
//! Pure layout arithmetic — no mutable application state lives here. Called
//! inside `terminal.draw()` on every render so each frame reflects the live
//! terminal size.
//!
//! # Panel geometry
//!
//! | Terminal width | Layout |
//! |----------------|--------|
//! | `< 100` cols   | Editor above suggestions, 60 / 40 |
//! | `>= 100` cols  | Editor left, suggestions right, 50 / 50 |
//!
//! A 1-row header sits above the panels and a 1-row status bar below.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Width at which the panels go side by side.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

/// Returns `[header, editor, suggestions, status_bar]` for an area.
pub fn compute_layout(area: Rect) -> [Rect; 4] {
    let [header, main_area, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let split = if area.width >= WIDE_LAYOUT_MIN_WIDTH {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
    } else {
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
    };

    let [editor, suggestions] = main_area.layout(&split.spacing(Spacing::Overlap(1)));
    [header, editor, suggestions, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Builds a bordered `Block` for a panel.
///
/// Focused panels get a thick border in `border_active`. `MergeStrategy::Fuzzy`
/// keeps the shared edge correct when thick and plain borders meet.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    Block::bordered()
        .title(format!(" {title} "))
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row application header.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(vec![
        Span::styled(" </> ", Style::default().fg(theme.header_title)),
        Span::styled(
            "AI Code Review Assistant",
            Style::default()
                .fg(theme.header_title)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Shows the mode indicator, the trigger state, the result count, and a key
/// hint. `HelpOverlay` displays `NORMAL` because the overlay is a transient
/// layer over Normal mode.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };

    let session = &state.session;
    let trigger = if session.is_analyzing() {
        "analyzing".to_owned()
    } else if session.can_analyze() {
        "ready".to_owned()
    } else {
        "no input".to_owned()
    };
    let hint = match state.mode {
        Mode::Insert => "Esc normal  Ctrl-R analyze",
        Mode::Normal | Mode::HelpOverlay => "i edit  a analyze  Tab focus  ? help  q quit",
    };

    let status_line = Line::from(vec![
        Span::styled(
            mode_text,
            Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {trigger} | {} suggestion(s) | {hint}",
            session.results().len()
        )),
    ]);

    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
