//! Scrollable pager for rendered diffs.
//!
//! Launched via `diffview show --tui` or `diffview compare --tui`. The event
//! loop runs asynchronously using [`tokio::select!`] with a render tick and
//! crossterm's async [`EventStream`](crossterm::event::EventStream). The
//! block is re-rendered only when the frame width changes.

mod app;
mod ui;

pub use app::App;
pub use ui::draw;

use std::io;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::{interval, Duration};
use tracing::debug;

use crate::render::{Highlighter, RenderOptions};

/// Render tick interval (~30 fps is plenty for a static view).
const TICK_DURATION: Duration = Duration::from_millis(33);

/// Opens the pager on `diff` and blocks until the user quits.
///
/// Enters raw mode and the alternate screen, redraws each tick, and handles
/// scroll keys. The terminal is restored even when drawing fails.
pub async fn run_pager(
    diff: String,
    options: RenderOptions,
    highlighter: Box<dyn Highlighter>,
) -> Result<()> {
    // --- Terminal setup ---
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;

    let mut app = App::new(diff, options, highlighter);
    let result = event_loop(&mut app).await;

    // --- Terminal teardown ---
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(app: &mut App) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut events = EventStream::new();
    let mut tick = interval(TICK_DURATION);

    loop {
        tokio::select! {
            _ = tick.tick() => {
                terminal.draw(|f| draw(f, app))?;
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) => {
                        if !handle_key(app, key) {
                            debug!("pager closed");
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(..))) => app.clamp_scroll(),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

/// Processes a single key event, returning `false` when the loop should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return true;
    }
    // Ctrl+C → quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_down(app.page_size()),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainHighlighter;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let body: String = (1..=30).map(|i| format!("+line {}\n", i)).collect();
        let diff = format!("@@ -0,0 +1,30 @@\n{body}");
        let mut app = App::new(diff, RenderOptions::default(), Box::new(PlainHighlighter));
        app.block_for_width(40);
        app.viewport_height = 10;
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(!handle_key(&mut app, key(KeyCode::Esc)));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!handle_key(&mut app, ctrl_c));
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        assert!(handle_key(&mut app, key(KeyCode::Char('j'))));
        assert_eq!(app.scroll_offset, 1);
        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.scroll_offset, 10);
        handle_key(&mut app, key(KeyCode::End));
        assert_eq!(app.scroll_offset, 20);
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.scroll_offset, 19);
        handle_key(&mut app, key(KeyCode::Home));
        assert_eq!(app.scroll_offset, 0);
    }
}
