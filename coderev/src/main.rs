//! coderev — AI code review assistant in the terminal.
//!
//! Entry point for the `coderev` binary. Wires together configuration
//! (`config`), file logging (`logging`), the terminal lifecycle (`tui`), the
//! unified event bus (`event`), the review state (`app`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load config and install the log subscriber; both are soft failures
//!    reported on stderr before the terminal is taken over.
//! 2. `install_panic_hook()` so a panic restores the terminal first.
//! 3. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the event loop.
//! 4. `init_tui()` — enters alternate screen and enables raw mode.
//! 5. Create event channel, `spawn_event_task()`, and build `AppState`.
//!
//! # Shutdown
//!
//! The event loop exits only via `break`. Any pending analysis is cancelled
//! and `restore_tui()` runs at the single exit point after the loop, so draw
//! errors are carried out of the loop instead of returned with `?`.

mod app;
mod config;
mod editor;
mod event;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use coderev_core::MockAnalyzer;

use crate::app::AppState;
use crate::config::Config;
use crate::event::{AppEvent, EventHandler};
use crate::theme::Theme;
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 0: config and logging, before the terminal is in raw mode.
    let (config, config_err) = Config::load();
    let log_path = logging::log_path();
    if let Err(e) = logging::init_logging(&log_path, config.log_level.as_deref()) {
        eprintln!("coderev: logging disabled: {e}");
    }
    if let Some(e) = config_err {
        eprintln!("coderev: {e}; using defaults");
        tracing::warn!(error = %e, "config not loaded, using defaults");
    }
    tracing::info!(theme = %config.theme, syntax = %config.syntax, "coderev starting");
    let theme = Theme::from_name(&config.theme);

    // Step 1: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 2: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm()?;

    // Step 3: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 4: event channel, background event task, and view state.
    let handler = EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;
    let mut state = AppState::new(Arc::new(MockAnalyzer::new()), handler.tx, &config.syntax);

    let mut outcome: std::io::Result<()> = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: a quiescent terminal would otherwise never poll the flag.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        // Exactly one draw() call per Render event — never elsewhere.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            tracing::error!(error = %e, "draw failed");
                            outcome = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        if handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Paste(text)) => state.paste(&text),
                    Some(AppEvent::Tick) => state.on_tick(),
                    Some(AppEvent::AnalysisCompleted(done)) => state.apply_analysis(done),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(AppEvent::Resize(_, _)) => {}
                    None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
        }
    }

    // Teardown: a pending analysis must not outlive the view.
    state.shutdown();
    let restored = tui::restore_tui();
    tracing::info!("coderev stopped");
    outcome.and(restored)
}
