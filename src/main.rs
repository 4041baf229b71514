use std::fs::File;
use std::path::Path;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use statewatch::config::fetch_config;
use statewatch::loader::spawn_loaders;
use statewatch::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use statewatch::tui::{App, Message, Tui, render, restore_terminal, setup_terminal};
use statewatch::{Result, StatewatchError};

#[tokio::main]
async fn main() -> std::result::Result<(), StatewatchError> {
    let app_config = fetch_config()?;

    // The TUI owns stdout, so tracing output goes to a log file.
    init_logging(&app_config.data.data_dir)?;
    tracing::info!(?app_config, "starting statewatch");

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    spawn_loaders(tx.clone(), app_config.data.clone());
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, app_config.tick_ms);

    let mut terminal = setup_terminal()?;
    let mut app = App::new();
    let result = run(&mut terminal, &mut app, &mut rx).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Draw-then-update loop: renders a frame, waits for the next message,
/// and drains everything queued behind it before redrawing.
async fn run(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| render(frame, app))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        update(app, message);
        while let Ok(message) = rx.try_recv() {
            update(app, message);
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber writing to `statewatch.log` in the
/// data directory. `RUST_LOG` overrides the default `info` filter.
fn init_logging(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = File::create(data_dir.join("statewatch.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}
