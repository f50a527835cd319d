use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    content: String,
    visible: bool,
}

impl Tooltip {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            visible: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hover_enter(&mut self) {
        self.visible = true;
    }

    pub fn hover_leave(&mut self) {
        self.visible = false;
    }
}
