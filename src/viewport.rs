/// Scrollable transcript view. Holds the full rendered transcript text and a
/// scroll offset; wrapping happens at render time, so the scroll math here
/// uses the same character-count estimate the renderer wraps with.
#[derive(Debug)]
pub struct Viewport {
    width: u16,
    height: u16,
    content: String,
    scroll: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16, content: &str) -> Self {
        Self {
            width,
            height,
            content: content.to_string(),
            scroll: 0,
        }
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Wrapped line count of the current content at the current width.
    /// Character counts, not byte lengths, for proper UTF-8 handling.
    pub fn total_lines(&self) -> u16 {
        let wrap_width = if self.width > 0 { self.width as usize } else { 1 };
        let mut total: u16 = 0;
        for line in self.content.lines() {
            let char_count = line.chars().count();
            if char_count == 0 {
                total += 1;
            } else {
                total += ((char_count.saturating_sub(1) / wrap_width) + 1) as u16;
            }
        }
        total
    }

    pub fn scroll_to_end(&mut self) {
        let total = self.total_lines();
        self.scroll = total.saturating_sub(self.height);
    }
}
