//! Color theme system for coderev.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! coderev renders. Two built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors, works on any terminal including 256-color SSH
//!   sessions with no truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.

use coderev_core::Category;
use ratatui::style::Color;

/// All color values used across coderev's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Header
    /// Application title in the header row.
    pub header_title: Color,

    // Editor
    /// Plain editor text when highlighting is unavailable.
    pub editor_text: Color,
    /// Line-number gutter.
    pub gutter: Color,
    /// Placeholder text shown in empty panels.
    pub placeholder: Color,

    // Trigger control
    /// Trigger label when analysis can start.
    pub trigger_enabled: Color,
    /// Trigger label when disabled (empty input or analysis running).
    pub trigger_disabled: Color,

    // Suggestion categories
    /// Badge and text color for improvements.
    pub suggestion_improvement: Color,
    /// Badge and text color for warnings.
    pub suggestion_warning: Color,
    /// Badge and text color for errors.
    pub suggestion_error: Color,
    /// The "Line: N" annotation under a suggestion.
    pub suggestion_line: Color,
    /// Spinner and "Analyzing your code..." text.
    pub analyzing: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color when in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color when in INSERT mode.
    pub status_mode_insert: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            header_title: Color::Magenta,

            editor_text: Color::Reset,
            gutter: Color::DarkGray,
            placeholder: Color::DarkGray,

            trigger_enabled: Color::Magenta,
            trigger_disabled: Color::DarkGray,

            suggestion_improvement: Color::Green,
            suggestion_warning: Color::Yellow,
            suggestion_error: Color::Red,
            suggestion_line: Color::DarkGray,
            analyzing: Color::Gray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay0 = Color::Rgb(108, 112, 134); // #6c7086
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            header_title: mauve,

            editor_text: text,
            gutter: overlay0,
            placeholder: overlay0,

            trigger_enabled: mauve,
            trigger_disabled: overlay0,

            suggestion_improvement: green,
            suggestion_warning: yellow,
            suggestion_error: red,
            suggestion_line: overlay1,
            analyzing: subtext0,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    /// Color used for a suggestion's badge and message.
    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Improvement => self.suggestion_improvement,
            Category::Warning => self.suggestion_warning,
            Category::Error => self.suggestion_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").border_active, Theme::dark().border_active);
    }

    #[test]
    fn both_spellings_resolve_catppuccin() {
        let expected = Theme::catppuccin_mocha().border_active;
        assert_eq!(Theme::from_name("catppuccin-mocha").border_active, expected);
        assert_eq!(Theme::from_name("catppuccin_mocha").border_active, expected);
    }

    #[test]
    fn categories_have_distinct_colors() {
        for theme in [Theme::dark(), Theme::catppuccin_mocha()] {
            let improvement = theme.category(Category::Improvement);
            let warning = theme.category(Category::Warning);
            let error = theme.category(Category::Error);
            assert_ne!(improvement, warning);
            assert_ne!(warning, error);
            assert_ne!(improvement, error);
        }
    }
}
