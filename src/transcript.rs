#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Normal,
    Placeholder,
    Error,
}

/// One line of conversation. Entries are immutable once resolved; the single
/// `Placeholder` entry is the only one rewritten in place, and only while its
/// request is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub kind: EntryKind,
}

impl TranscriptEntry {
    pub fn user(text: String) -> Self {
        Self {
            speaker: Speaker::User,
            text,
            kind: EntryKind::Normal,
        }
    }

    pub fn assistant(text: String) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text,
            kind: EntryKind::Normal,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            speaker: Speaker::System,
            text: message,
            kind: EntryKind::Error,
        }
    }

    fn label(&self) -> &'static str {
        if self.kind == EntryKind::Error {
            return "Error";
        }
        match self.speaker {
            Speaker::User => "You",
            Speaker::Assistant => "Llama",
            Speaker::System => "System",
        }
    }

    pub fn display_line(&self) -> String {
        format!("{}: {}", self.label(), self.text)
    }
}

/// Ordered conversation log with stable positional addressing. Append-only,
/// except that the entry at a recorded placeholder index may be replaced once
/// by its resolved form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: TranscriptEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Append the loading placeholder and return its index. At most one
    /// placeholder may exist at a time.
    pub fn push_placeholder(&mut self, text: String) -> usize {
        debug_assert!(self.placeholder_index().is_none());
        self.push(TranscriptEntry {
            speaker: Speaker::Assistant,
            text,
            kind: EntryKind::Placeholder,
        })
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.kind == EntryKind::Placeholder)
    }

    /// Rewrite the placeholder text (next animation frame). Ignored when the
    /// index no longer points at a placeholder, so late redraw events are
    /// harmless.
    pub fn set_placeholder_text(&mut self, index: usize, text: String) {
        if let Some(entry) = self.entries.get_mut(index) {
            if entry.kind == EntryKind::Placeholder {
                entry.text = text;
            }
        }
    }

    /// Replace the placeholder at `index` with its resolved entry. Falls back
    /// to appending when the index is out of range.
    pub fn resolve(&mut self, index: usize, entry: TranscriptEntry) {
        match self.entries.get_mut(index) {
            Some(slot) => *slot = entry,
            None => {
                self.entries.push(entry);
            }
        }
    }

    /// All transcript text before `upto`, one display line per entry, joined
    /// into the single user-turn payload sent to the backend.
    pub fn prompt_payload(&self, upto: usize) -> String {
        let upto = upto.min(self.entries.len());
        self.entries[..upto]
            .iter()
            .map(|e| e.display_line())
            .collect::<Vec<_>>()
            .join(",")
    }
}
