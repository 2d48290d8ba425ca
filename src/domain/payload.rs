use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of a message block sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Fully rendered request for a language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRequestPayload {
    pub model: String,
    pub version: u32,
    pub parameters: Map<String, Value>,
    pub response_contract: Value,
    /// System block (when the system template is non-empty), then user block.
    pub messages: Vec<Message>,
    /// Substituted user template text.
    pub input: String,
}

impl RenderedRequestPayload {
    pub fn system_message(&self) -> Option<&str> {
        self.messages.iter().find(|m| m.role == Role::System).map(|m| m.content.as_str())
    }
}
