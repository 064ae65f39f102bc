use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};
use crate::app::ChatApp;
use crate::input::{PLACEHOLDER, PROMPT};

/// Blank rows between the transcript and the input line.
pub const GAP_HEIGHT: u16 = 3;
pub const INPUT_HEIGHT: u16 = 1;

pub fn render(app: &mut ChatApp, frame: &mut Frame) {
    let [transcript_area, _gap, input_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(GAP_HEIGHT),
        Constraint::Length(INPUT_HEIGHT),
    ])
    .areas(frame.area());

    render_transcript(app, frame, transcript_area);
    render_input(app, frame, input_area);
}

fn render_transcript(app: &ChatApp, frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(app.viewport.content().to_string())
        .wrap(Wrap { trim: false })
        .scroll((app.viewport.scroll(), 0));
    frame.render_widget(paragraph, area);
}

fn render_input(app: &ChatApp, frame: &mut Frame, area: Rect) {
    let prompt_width = PROMPT.chars().count();
    let inner_width = (area.width as usize).saturating_sub(prompt_width).max(1);

    if app.input.value().is_empty() {
        let hint = Paragraph::new(format!("{PROMPT}{PLACEHOLDER}"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, area);
        frame.set_cursor_position(Position::new(
            area.x + prompt_width as u16,
            area.y,
        ));
        return;
    }

    // Slide a window over the value so the cursor stays visible on one line
    let cursor = app.input.cursor();
    let offset = cursor.saturating_sub(inner_width.saturating_sub(1));
    let visible: String = app
        .input
        .value()
        .chars()
        .skip(offset)
        .take(inner_width)
        .collect();

    let line = Paragraph::new(format!("{PROMPT}{visible}"));
    frame.render_widget(line, area);

    let cursor_x = area.x + (prompt_width + cursor - offset) as u16;
    frame.set_cursor_position(Position::new(cursor_x.min(area.right().saturating_sub(1)), area.y));
}
