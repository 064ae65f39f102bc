use crossterm::event::{KeyCode, KeyEvent};

pub const PROMPT: &str = "> ";
pub const PLACEHOLDER: &str = "Send a message...";

const CHAR_LIMIT: usize = 280;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text entry. The conversation controller reads its value only
/// on submit and calls `reset` after; everything else is cursor bookkeeping.
#[derive(Debug, Default)]
pub struct InputBox {
    value: String,
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters, not bytes.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(byte_pos);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let byte_pos = char_to_byte_index(&self.value, self.cursor);
                    self.value.remove(byte_pos);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
            }
            KeyCode::Char(c) => {
                if self.value.chars().count() < CHAR_LIMIT {
                    let byte_pos = char_to_byte_index(&self.value, self.cursor);
                    self.value.insert(byte_pos, c);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_advances_cursor() {
        let mut input = InputBox::new();
        type_text(&mut input, "hello");
        assert_eq!(input.value(), "hello");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_insert_mid_string_is_utf8_safe() {
        let mut input = InputBox::new();
        type_text(&mut input, "héllo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Char('x')));
        assert_eq!(input.value(), "héxllo");
    }

    #[test]
    fn test_backspace_removes_before_cursor() {
        let mut input = InputBox::new();
        type_text(&mut input, "héllo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "hélo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_delete_removes_at_cursor() {
        let mut input = InputBox::new();
        type_text(&mut input, "abc");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "bc");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_home_and_end() {
        let mut input = InputBox::new();
        type_text(&mut input, "abc");
        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.cursor(), 0);
        input.handle_key(key(KeyCode::End));
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_char_limit_is_enforced() {
        let mut input = InputBox::new();
        for _ in 0..CHAR_LIMIT + 10 {
            input.handle_key(key(KeyCode::Char('a')));
        }
        assert_eq!(input.value().chars().count(), CHAR_LIMIT);
    }

    #[test]
    fn test_blank_detection() {
        let mut input = InputBox::new();
        assert!(input.is_blank());
        type_text(&mut input, "   ");
        assert!(input.is_blank());
        type_text(&mut input, "x");
        assert!(!input.is_blank());
    }

    #[test]
    fn test_reset_clears_value_and_cursor() {
        let mut input = InputBox::new();
        type_text(&mut input, "hello");
        input.reset();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor(), 0);
    }
}
