//! Help overlay renderer for coderev.
//!
//! Draws a centred modal box over the panels using ratatui's `Clear` widget to
//! erase the background first, inside the same `terminal.draw()` closure as
//! everything else.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the layout.
///
/// Skipped on terminals narrower than 50 columns, where the modal would not
/// fit its own key column.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Analysis"),
        Line::from("  Ctrl-R        Analyze the code (disabled while empty or running)"),
        Line::from("  a             Analyze (Normal mode)"),
        Line::from(""),
        Line::from("Editing"),
        Line::from("  i / Enter     Edit the code (Insert mode)"),
        Line::from("  Esc           Back to Normal mode"),
        Line::from("  Arrows        Move the cursor"),
        Line::from("  Home / End    Start / end of line"),
        Line::from("  Ctrl-L        Clear the editor"),
        Line::from("  paste         Bracketed paste inserts at the cursor"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  Tab / H / L   Switch panel focus"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
    ])
}
