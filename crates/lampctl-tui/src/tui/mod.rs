//! Main entry point for the TUI dashboard.
//!
//! This module ties the TUI components together and provides the main event
//! loop. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination

pub mod app;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::App;
pub use messages::{Command, DeviceEvent};
pub use worker::DeviceWorker;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use lampctl_core::DeviceClient;

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application.
///
/// Creates the communication channels, spawns the background worker with its
/// HTTP client, and runs the main event loop until the user quits.
pub async fn run(url: String, poll_interval_ms: u64) -> Result<()> {
    let client = DeviceClient::new(&url)?;
    info!(url = %client.base_url(), poll_interval_ms, "Starting dashboard");

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<DeviceEvent>(32);

    let worker = DeviceWorker::new(
        cmd_rx,
        event_tx,
        client,
        Duration::from_millis(poll_interval_ms),
    );
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(cmd_tx.clone(), event_rx);

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    // Send shutdown command to worker
    let _ = cmd_tx.try_send(Command::Shutdown);

    restore_terminal()?;

    let _ = worker_handle.await;

    result
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.clean_expired_toast();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for keyboard events with timeout
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let editing = app.focus.is_some_and(|c| c.is_text());
            let action = input::handle_key(key.code, editing);
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = command_tx.try_send(cmd);
            }
        }

        // Non-blocking receive of device events
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_device_event(event);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_terminal_functions_exist() {
        // Just verify the functions compile correctly
        // Actual terminal tests require a real terminal
        let _ = restore_terminal;
        let _ = setup_terminal;
    }

    #[test]
    fn test_input_handling_quit() {
        let action = input::handle_key(KeyCode::Char('q'), false);
        assert_eq!(action, input::Action::Quit);
    }

    #[test]
    fn test_input_handling_focus_cycle() {
        let action = input::handle_key(KeyCode::Tab, false);
        assert_eq!(action, input::Action::FocusNext);

        let action = input::handle_key(KeyCode::BackTab, false);
        assert_eq!(action, input::Action::FocusPrev);
    }
}
