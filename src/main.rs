mod app;
mod auth;
mod config;
mod form;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use auth::MockAuthenticator;
use config::AppConfig;
use form::Field;

#[derive(Parser, Debug)]
#[command(name = "logincard")]
#[command(version)]
#[command(about = "A mock login screen for the terminal")]
struct Args {
    /// Simulated login delay in milliseconds (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Also send notices as desktop notifications
    #[arg(long)]
    notify: bool,

    /// Pre-fill the username field
    #[arg(short, long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. The terminal belongs to the TUI, so log to a file.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(ms) = args.delay_ms {
        config.submit_delay_ms = ms;
    }
    if args.notify {
        config.notifications = true;
    }

    let authenticator = Arc::new(MockAuthenticator::new(config.submit_delay()));
    let mut app = App::new(config, authenticator);
    if let Some(username) = args.username {
        app.form.update_field(Field::Username, username);
    }

    run_tui(app).await
}

/// Days of logs kept in the cache directory
const LOG_FILES_KEPT: usize = 7;

fn log_writer() -> BoxMakeWriter {
    let appender = dirs::cache_dir()
        .map(|dir| dir.join("logincard"))
        .and_then(|dir| log_appender(&dir).ok());

    match appender {
        Some(appender) => BoxMakeWriter::new(appender),
        None => BoxMakeWriter::new(io::sink),
    }
}

/// Daily `logincard.<date>.log` files in `dir`, oldest pruned past LOG_FILES_KEPT
fn log_appender(dir: &Path) -> Result<RollingFileAppender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logincard")
        .filename_suffix("log")
        .max_log_files(LOG_FILES_KEPT)
        .build(dir)?;
    Ok(appender)
}

async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Login screen started");

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key).await {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Settle finished submissions, expire status messages
        if let Err(e) = app.tick().await {
            app.set_status(format!("Error: {}", e));
        }
    }
}

fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("dialog-password")
        .show()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_log_appender_writes_dated_file() {
        let dir = tempdir().unwrap();
        let mut appender = log_appender(dir.path()).unwrap();

        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("logincard."));
        assert!(names[0].ends_with(".log"));
    }
}
