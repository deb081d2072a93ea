use std::collections::VecDeque;

/// Oldest entries fall off once the history holds this many lines.
pub const HISTORY_LIMIT: usize = 50;

/// The editable command line plus the history it can recall.
///
/// `cursor` is a byte offset into `buf` and always sits on a char boundary.
/// History is kept most-recent-first; `history_pos` is `None` while the user
/// is not stepping through it.
#[derive(Debug, Default)]
pub struct Input {
    buf: String,
    cursor: usize,
    history: VecDeque<String>,
    history_pos: Option<usize>,
}

impl Input {
    pub fn buf(&self) -> &str {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|s| s.as_str())
    }

    pub fn history_pos(&self) -> Option<usize> {
        self.history_pos
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
        self.history_pos = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.history_pos = None;
    }

    pub fn backspace(&mut self) {
        let Some(prev) = self.buf[..self.cursor].chars().next_back() else {
            return;
        };
        self.cursor -= prev.len_utf8();
        self.buf.remove(self.cursor);
        self.history_pos = None;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        self.buf.remove(self.cursor);
        self.history_pos = None;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.buf[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.buf[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    /// Replaces the whole line as a user edit.
    pub fn set(&mut self, s: impl Into<String>) {
        self.show(s.into());
        self.history_pos = None;
    }

    /// Empties the line and hands back what it held.
    pub fn take(&mut self) -> String {
        let out = std::mem::take(&mut self.buf);
        self.clear();
        out
    }

    pub(super) fn push_history(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if self.history.front().map(|s| s.as_str()) != Some(line) {
            self.history.push_front(line.to_string());
            self.history.truncate(HISTORY_LIMIT);
        }
        self.history_pos = None;
    }

    pub fn history_up(&mut self) {
        let next = self.history_pos.map_or(0, |i| i + 1);
        let Some(line) = self.history.get(next).cloned() else {
            return;
        };
        self.history_pos = Some(next);
        self.show(line);
    }

    pub fn history_down(&mut self) {
        match self.history_pos {
            None => {}
            Some(0) => self.clear(),
            Some(i) => {
                let line = self.history[i - 1].clone();
                self.history_pos = Some(i - 1);
                self.show(line);
            }
        }
    }

    fn show(&mut self, s: String) {
        self.buf = s;
        self.cursor = self.buf.len();
    }
}

#[cfg(test)]
#[path = "../tests/shell/input_tests.rs"]
mod tests;
