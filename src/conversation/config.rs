use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::script::Role;

/// Pacing of the scripted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationTiming {
    /// Typing delay before an agent message appears
    pub agent_typing_ms: u64,

    /// Typing delay before a user message appears
    pub user_typing_ms: u64,

    /// Pause between a revealed message and the next typing indicator
    pub pause_ms: u64,
}

impl Default for ConversationTiming {
    fn default() -> Self {
        Self {
            agent_typing_ms: 2000,
            user_typing_ms: 1000,
            pause_ms: 1000,
        }
    }
}

impl ConversationTiming {
    pub fn typing_delay(&self, sender: Role) -> Duration {
        match sender {
            Role::Agent => Duration::from_millis(self.agent_typing_ms),
            Role::User => Duration::from_millis(self.user_typing_ms),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Same rhythm, `factor` times faster. Used for debug walkthroughs.
    pub fn accelerated(&self, factor: u64) -> Self {
        let factor = factor.max(1);
        Self {
            agent_typing_ms: self.agent_typing_ms / factor,
            user_typing_ms: self.user_typing_ms / factor,
            pause_ms: self.pause_ms / factor,
        }
    }
}
