use crate::domain::Entry;

/// An append-only list pane with its own scroll position and cursor.
///
/// Every insertion scrolls back to the top so the pane always shows its
/// head after new results arrive.
#[derive(Debug, Default, Clone)]
pub struct Holder {
    entries: Vec<Entry>,
    pub scroll_offset: usize,
    pub cursor: usize,
}

impl Holder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
        self.cursor = 0;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Adjust the scroll offset so the cursor is inside a window of `height` rows
    pub fn follow_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Entries visible in a window of `height` rows, paired with their index
    pub fn visible(&self, height: usize) -> impl Iterator<Item = (usize, &Entry)> {
        let start = self.scroll_offset.min(self.entries.len());
        self.entries.iter().enumerate().skip(start).take(height)
    }
}
