use serde::Serialize;

pub const ESCAPE_KEY: &str = "Escape";

/// Dialog holding one item at a time. While open, page scrolling is locked.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Modal<T> {
    content: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { content: None }
    }
}

impl<T> Modal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, content: T) {
        self.content = Some(content);
    }

    /// Returns the item that was showing, if any.
    pub fn close(&mut self) -> Option<T> {
        self.content.take()
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    /// Keyboard handler; only Escape does anything. Returns true if it closed.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == ESCAPE_KEY && self.close().is_some()
    }

    pub fn on_backdrop_click(&mut self) -> bool {
        self.close().is_some()
    }
}
