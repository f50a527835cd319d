use serde::{Deserialize, Serialize};

use super::script::{ConversationScript, Message};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackPhase {
    Idle,
    Typing,
    Pausing,
    Finished,
}

impl Default for PlaybackPhase {
    fn default() -> Self {
        PlaybackPhase::Idle
    }
}

/// Progress through a script. `played` is always `script[..cursor]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub played: Vec<Message>,
    pub is_typing: bool,
    pub cursor: usize,
    pub phase: PlaybackPhase,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_typing(&mut self) {
        self.is_typing = true;
        self.phase = PlaybackPhase::Typing;
    }

    /// Reveal the message under the cursor. Returns it, or `None` once the
    /// script is exhausted.
    pub fn reveal_next(&mut self, script: &ConversationScript) -> Option<Message> {
        let message = script.get(self.cursor)?.clone();
        self.is_typing = false;
        self.played.push(message.clone());
        self.cursor += 1;
        self.phase = if self.cursor < script.len() {
            PlaybackPhase::Pausing
        } else {
            PlaybackPhase::Finished
        };
        Some(message)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
