use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::InputBox;
use crate::ollama::ChatError;
use crate::spinner::Spinner;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::tui::AppEvent;
use crate::ui::{GAP_HEIGHT, INPUT_HEIGHT};
use crate::viewport::Viewport;

pub const NO_RESPONSE_SENTINEL: &str = "No response received";

const WELCOME: &str = "Welcome to the chat area, have a good stay";

/// Explicit session phase, one-to-one with `pending` being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// Deferred effects requested by `handle`. The run loop executes these; the
/// controller itself never performs I/O or spawns tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Work {
    /// Spawn one backend exchange; the result comes back as `AppEvent::Reply`.
    FetchReply { prompt: String },
    /// Arm a one-shot animation timer.
    ScheduleTick,
    /// Re-enqueue a placeholder redraw.
    RequestRedraw,
    /// End the session.
    Quit,
}

/// The conversation controller. Owns the transcript and the single in-flight
/// request marker; the input box and viewport are collaborators it drives
/// through their narrow interfaces.
pub struct ChatApp {
    pub transcript: Transcript,
    pub input: InputBox,
    pub viewport: Viewport,
    spinner: Spinner,
    /// Placeholder index of the outstanding request. `None` means idle; a
    /// request may be issued only while this is `None`.
    pending: Option<usize>,
    state: SessionState,
}

impl ChatApp {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            input: InputBox::new(),
            viewport: Viewport::new(30, 5, WELCOME),
            spinner: Spinner::default(),
            pending: None,
            state: SessionState::Idle,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// Process one event to completion. Transcript mutations happen only
    /// here, so rendering between any two events sees a consistent snapshot.
    pub fn handle(&mut self, event: AppEvent) -> Vec<Work> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                self.resize(width, height);
                Vec::new()
            }
            AppEvent::Tick => self.handle_tick(),
            AppEvent::Redraw => {
                self.redraw_placeholder();
                Vec::new()
            }
            AppEvent::Reply(result) => {
                self.apply_reply(result);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Work> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return vec![Work::Quit];
        }

        if key.code == KeyCode::Enter {
            return self.submit();
        }

        self.input.handle_key(key);
        Vec::new()
    }

    fn submit(&mut self) -> Vec<Work> {
        // Single-flight: new submissions are refused, not queued, until the
        // current request resolves.
        if self.is_awaiting() {
            return Vec::new();
        }
        if self.input.is_blank() {
            return Vec::new();
        }

        let text = self.input.value().to_string();
        self.transcript.push(TranscriptEntry::user(text));

        let placeholder = self.transcript.push_placeholder(self.spinner.thinking_line());
        let prompt = self.transcript.prompt_payload(placeholder);

        self.pending = Some(placeholder);
        self.state = SessionState::AwaitingReply;
        self.input.reset();
        self.sync_viewport();

        tracing::debug!(placeholder, "dispatching chat request");
        vec![Work::FetchReply { prompt }, Work::ScheduleTick]
    }

    fn handle_tick(&mut self) -> Vec<Work> {
        // Ticks are side-effect-free when nothing is outstanding; the timer
        // simply stops rescheduling itself.
        if !self.is_awaiting() {
            return Vec::new();
        }
        self.spinner.advance();
        vec![Work::ScheduleTick, Work::RequestRedraw]
    }

    fn redraw_placeholder(&mut self) {
        if let Some(placeholder) = self.pending {
            self.transcript
                .set_placeholder_text(placeholder, self.spinner.thinking_line());
            self.sync_viewport();
        }
    }

    fn apply_reply(&mut self, result: Result<String, ChatError>) {
        // A reply with nothing outstanding has no placeholder to resolve.
        let Some(placeholder) = self.pending.take() else {
            return;
        };
        self.state = SessionState::Idle;

        let entry = match result {
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                TranscriptEntry::error(err.to_string())
            }
            Ok(text) if text.is_empty() => {
                TranscriptEntry::assistant(NO_RESPONSE_SENTINEL.to_string())
            }
            Ok(text) => {
                tracing::debug!(chars = text.chars().count(), "reply received");
                TranscriptEntry::assistant(text)
            }
        };

        self.transcript.resolve(placeholder, entry);
        self.sync_viewport();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport.set_width(width);
        self.viewport
            .set_height(height.saturating_sub(GAP_HEIGHT + INPUT_HEIGHT));
        self.sync_viewport();
    }

    /// Re-render the full transcript into the viewport and keep the tail
    /// visible. O(transcript) per call, which is fine at chat scale.
    fn sync_viewport(&mut self) {
        if self.transcript.is_empty() {
            // Keep the welcome banner until the first message
            return;
        }
        let lines: Vec<String> = self
            .transcript
            .entries()
            .iter()
            .map(|e| e.display_line())
            .collect();
        self.viewport.set_content(lines.join("\n"));
        self.viewport.scroll_to_end();
    }
}
