use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod greeting;
mod input;
mod ollama;
mod spinner;
mod transcript;
mod tui;
mod ui;
mod viewport;

use app::{ChatApp, Work};
use config::Config;
use ollama::OllamaClient;
use tui::{AppEvent, EventHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging();

    let config = Config::load().unwrap_or_default();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    greeting::run_banner(&mut terminal, &mut events, "Chat with a local Llama model").await?;
    greeting::run_loading(&mut terminal, &mut events).await?;

    let result = run_chat(&mut terminal, &mut events, &config).await;

    tui::restore()?;

    // The TUI renders on stderr; the unsent draft goes to stdout on exit.
    match result {
        Ok(unsent) => {
            println!("{unsent}");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// The single ordered event loop: draw, dequeue one event, let the controller
/// process it to completion, then execute whatever work it scheduled. Backend
/// calls and timers run off-loop and come back as events through the same
/// queue, so nothing else ever touches controller state.
async fn run_chat(
    terminal: &mut tui::Tui,
    events: &mut EventHandler,
    config: &Config,
) -> Result<String> {
    let client = OllamaClient::new(&config.base_url);
    let mut app = ChatApp::new();

    let size = terminal.size()?;
    app.handle(AppEvent::Resize(size.width, size.height));

    tracing::info!(base_url = %config.base_url, model = %config.model, "chat session started");

    loop {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        let Some(event) = events.next().await else {
            return Ok(app.input.value().to_string());
        };

        for work in app.handle(event) {
            match work {
                Work::FetchReply { prompt } => {
                    let client = client.clone();
                    let model = config.model.clone();
                    let tx = events.sender();
                    tokio::spawn(async move {
                        let result = client.chat(&model, &prompt).await;
                        let _ = tx.send(AppEvent::Reply(result));
                    });
                }
                Work::ScheduleTick => {
                    tui::schedule_tick(events.sender(), spinner::TICK_INTERVAL);
                }
                Work::RequestRedraw => {
                    let _ = events.sender().send(AppEvent::Redraw);
                }
                Work::Quit => {
                    tracing::info!("chat session ended");
                    return Ok(app.input.value().to_string());
                }
            }
        }
    }
}

/// File-based logging; stdout and stderr belong to the TUI. Returns the
/// appender guard so buffered lines flush on exit.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::config_dir()?.join("llamachat");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "llamachat.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
