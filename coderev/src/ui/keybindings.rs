//! Keybinding dispatcher for coderev.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so HelpOverlay, Insert, and
//! Normal each have an isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Tear down and exit.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// `Ctrl-C` quits from any mode since raw mode swallows SIGINT.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        // A disabled trigger is a silent no-op.
        KeyCode::Char('r') if ctrl => {
            state.trigger_analysis();
        }
        KeyCode::Char('a') => {
            state.trigger_analysis();
        }

        KeyCode::Char('i') | KeyCode::Enter => {
            state.focus = PanelFocus::Editor;
            state.mode = Mode::Insert;
        }

        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('H') | KeyCode::Char('L') => {
            state.focus = state.focus.toggle();
        }

        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,

        _ => {}
    }
    KeyAction::Continue
}

/// Handles scroll-related keys in Normal mode: j / k / g / G and Ctrl combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Handles a key event while editing the code buffer.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Char('r') if ctrl => {
            state.trigger_analysis();
        }
        KeyCode::Char('l') if ctrl => state.edit(|e| e.clear()),
        // Other control chords are not text.
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => state.edit(|e| e.insert_char(c)),
        KeyCode::Enter => state.edit(|e| e.newline()),
        KeyCode::Tab => state.edit(|e| e.insert_char('\t')),
        KeyCode::Backspace => state.edit(|e| e.backspace()),
        KeyCode::Delete => state.edit(|e| e.delete()),
        KeyCode::Left => state.edit(|e| e.move_left()),
        KeyCode::Right => state.edit(|e| e.move_right()),
        KeyCode::Up => state.edit(|e| e.move_up()),
        KeyCode::Down => state.edit(|e| e.move_down()),
        KeyCode::Home => state.edit(|e| e.move_home()),
        KeyCode::End => state.edit(|e| e.move_end()),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// `?`, `Esc`, or `q` dismisses the overlay; j/k/g/G scroll it.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: click-to-focus and scroll-wheel.
///
/// Scroll wheel moves the focused panel (or the help overlay) by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let pos = Position {
                x: mouse.column,
                y: mouse.row,
            };
            let [editor, suggestions] = state.panel_rects;
            if editor.contains(pos) {
                state.focus = PanelFocus::Editor;
            } else if suggestions.contains(pos) {
                state.focus = PanelFocus::Suggestions;
            }
        }
        MouseEventKind::ScrollUp if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_sub(3);
        }
        MouseEventKind::ScrollDown if state.mode == Mode::HelpOverlay => {
            state.help_scroll = state.help_scroll.saturating_add(3);
        }
        MouseEventKind::ScrollUp => state.scroll_up(3),
        MouseEventKind::ScrollDown => state.scroll_down(3),
        _ => {}
    }
    KeyAction::Continue
}
