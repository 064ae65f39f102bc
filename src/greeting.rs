use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::Paragraph;

use crate::spinner::{Spinner, TICK_INTERVAL};
use crate::tui::{schedule_tick, AppEvent, EventHandler, Tui};

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Bordered banner page shown before the chat session. Ctrl+C moves on.
pub async fn run_banner(terminal: &mut Tui, events: &mut EventHandler, text: &str) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let border = "-".repeat(text.chars().count() + 5);
            let body = format!("{border}\n* {text} *\n{border}\n\nPress Ctrl+C to exit");
            frame.render_widget(Paragraph::new(body), frame.area());
        })?;

        match events.next().await {
            Some(AppEvent::Key(key)) if is_ctrl_c(key) => return Ok(()),
            Some(_) => {}
            None => return Ok(()),
        }
    }
}

/// Standalone spinner page. Animates until q, Esc, or Ctrl+C.
pub async fn run_loading(terminal: &mut Tui, events: &mut EventHandler) -> Result<()> {
    let mut spinner = Spinner::default();
    schedule_tick(events.sender(), TICK_INTERVAL);

    loop {
        terminal.draw(|frame| {
            let body = format!(
                "\n\n   {} Loading forever...press q to quit\n\n",
                spinner.frame()
            );
            frame.render_widget(Paragraph::new(body), frame.area());
        })?;

        match events.next().await {
            Some(AppEvent::Key(key)) => {
                if is_ctrl_c(key) || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
            Some(AppEvent::Tick) => {
                spinner.advance();
                schedule_tick(events.sender(), TICK_INTERVAL);
            }
            Some(_) => {}
            None => return Ok(()),
        }
    }
}
