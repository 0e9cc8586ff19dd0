/// Keyboard cursor over a delivered result list.
///
/// Up/down wrap around; paging and home/end clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    /// Called whenever a new result list is delivered, even for a repeated query.
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn move_down(&mut self) {
        if self.len > 0 {
            self.cursor = (self.cursor + 1) % self.len;
        }
    }

    pub fn move_up(&mut self) {
        if self.len > 0 {
            self.cursor = (self.cursor + self.len - 1) % self.len;
        }
    }

    pub fn page_down(&mut self, jump: usize) {
        if self.len > 0 {
            self.cursor = (self.cursor + jump).min(self.len - 1);
        }
    }

    pub fn page_up(&mut self, jump: usize) {
        self.cursor = self.cursor.saturating_sub(jump);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len.saturating_sub(1);
    }

    /// The highlighted location, if any.
    pub fn confirm<'a, S: AsRef<str>>(&self, results: &'a [S]) -> Option<&'a str> {
        if self.len == 0 {
            return None;
        }
        results.get(self.cursor).map(|location| location.as_ref())
    }
}
