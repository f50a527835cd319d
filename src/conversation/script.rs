use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Agent,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u32,
    pub text: String,
    pub sender: Role,
}

impl Message {
    pub fn new(id: u32, text: impl Into<String>, sender: Role) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
        }
    }
}

/// Immutable, ordered chat script. Cloning shares the underlying messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationScript {
    messages: Arc<[Message]>,
}

impl ConversationScript {
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        let mut ids = HashSet::with_capacity(messages.len());
        for message in &messages {
            if !ids.insert(message.id) {
                bail!("duplicate message id {} in conversation script", message.id);
            }
        }

        Ok(Self {
            messages: messages.into(),
        })
    }

    /// The support-agent exchange shown in the AI agents section.
    pub fn agent_demo() -> Self {
        Self {
            messages: vec![
                Message::new(
                    1,
                    "Olá! Estou aqui para ajudar com suas dúvidas sobre nossos produtos. Como posso auxiliar hoje?",
                    Role::Agent,
                ),
                Message::new(
                    2,
                    "Preciso de informações sobre integrações com meu sistema atual.",
                    Role::User,
                ),
                Message::new(
                    3,
                    "Claro! Nossas soluções são projetadas para integrar perfeitamente com sua infraestrutura existente. Posso agendar uma demonstração personalizada?",
                    Role::Agent,
                ),
            ]
            .into(),
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
