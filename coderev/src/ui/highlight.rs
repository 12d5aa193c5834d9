//! Syntax highlighting for the editor buffer.
//!
//! Highlighting a whole buffer every frame at 30 FPS is wasteful, so the
//! `Highlighter` caches the styled lines keyed by the editor's content
//! version and only re-runs syntect after an edit.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::editor::Editor;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Cached syntect output for the editor buffer.
#[derive(Debug)]
pub struct Highlighter {
    syntax_ext: String,
    version: Option<u64>,
    lines: Vec<Line<'static>>,
}

impl Highlighter {
    /// Creates a highlighter for files with extension `syntax_ext`.
    ///
    /// Unknown extensions highlight as plain text.
    pub fn new(syntax_ext: &str) -> Self {
        Self {
            syntax_ext: syntax_ext.to_owned(),
            version: None,
            lines: Vec::new(),
        }
    }

    /// Highlighted lines for `editor`, recomputed only when its version moved.
    pub fn lines(&mut self, editor: &Editor) -> &[Line<'static>] {
        if self.version != Some(editor.version()) {
            self.lines = highlight(editor.lines(), &self.syntax_ext);
            self.version = Some(editor.version());
        }
        &self.lines
    }
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Background colors are dropped so the panel background shows through.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.trim_end_matches('\n').to_owned(), ratatui_style)
}

/// Highlights `lines` as one file so multi-line constructs carry state.
fn highlight(lines: &[String], ext: &str) -> Vec<Line<'static>> {
    let syntax = PS
        .find_syntax_by_extension(ext)
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let Some(theme) = TS
        .themes
        .get("base16-ocean.dark")
        .or_else(|| TS.themes.values().next())
    else {
        return lines.iter().map(|l| Line::raw(l.clone())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    lines
        .iter()
        .map(|line| {
            // The newline-aware syntax set expects each line to end in '\n'.
            let with_newline = format!("{line}\n");
            match h.highlight_line(&with_newline, &PS) {
                Ok(ranges) => Line::from(
                    ranges
                        .into_iter()
                        .map(|(style, text)| syntect_to_span(style, text))
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    tracing::debug!(error = %e, "highlighting failed, using plain line");
                    Line::raw(line.clone())
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn highlighted_text_matches_source() {
        let lines = vec!["const x = 1;".to_owned(), "function f() {}".to_owned()];
        let out = highlight(&lines, "js");
        assert_eq!(out.len(), 2);
        assert_eq!(plain(&out[0]), "const x = 1;");
        assert_eq!(plain(&out[1]), "function f() {}");
    }

    #[test]
    fn unknown_extension_still_renders() {
        let out = highlight(&["hello".to_owned()], "no-such-ext");
        assert_eq!(plain(&out[0]), "hello");
    }

    #[test]
    fn cache_follows_editor_version() {
        let mut editor = Editor::default();
        let mut highlighter = Highlighter::new("js");
        assert_eq!(plain(&highlighter.lines(&editor)[0]), "");
        editor.insert_str("let a");
        assert_eq!(plain(&highlighter.lines(&editor)[0]), "let a");
    }
}
