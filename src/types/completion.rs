use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat-completion call. Built fresh for every generation.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
    json_output: bool,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, system: ChatMessage, user: ChatMessage) -> Self {
        Self {
            model: model.into(),
            messages: vec![system, user],
            max_tokens: 0,
            temperature: 1.0,
            json_output: false,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system_instruction(&self) -> &str {
        self.find(Role::System)
    }

    pub fn user_instruction(&self) -> &str {
        self.find(Role::User)
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn json_output(&self) -> bool {
        self.json_output
    }

    fn find(&self, role: Role) -> &str {
        self.messages
            .iter()
            .find(|message| message.role == role)
            .map(|message| message.content.as_str())
            .unwrap_or_default()
    }

    /// Render the chat-completions request body.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        if self.json_output {
            body["response_format"] = json!({ "type": "json_object" });
        }

        body
    }
}
