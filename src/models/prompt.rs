use serde::{Deserialize, Serialize};

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Prompt {
    #[serde(default)]
    pub messages: Vec<Message>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl Prompt {
    /// Prepends the configured system message unless the conversation
    /// already carries one. Idempotent.
    pub fn ensure_system_prompt(&mut self, system_prompt: &str) {
        if self.messages.iter().any(|message| message.role == "system") {
            return;
        }
        self.messages.insert(0, Message::system(system_prompt));
    }

    /// Sampling temperature, clamped to the range upstream accepts.
    pub fn temperature(&self) -> f64 {
        self.temperature
            .unwrap_or(DEFAULT_TEMPERATURE)
            .clamp(0.0, 2.0)
    }

    /// Completion token limit, clamped to the range upstream accepts.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS).clamp(1, 8192)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_prompt() -> Prompt {
        Prompt {
            messages: vec![Message {
                role: "user".to_string(),
                content: "Hello!".to_string(),
            }],
            temperature: None,
            max_tokens: None,
        }
    }

    #[test]
    fn injects_system_message_at_front() {
        let mut prompt = user_prompt();
        prompt.ensure_system_prompt("You are a helpful assistant.");

        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, "system");
        assert_eq!(prompt.messages[0].content, "You are a helpful assistant.");
        assert_eq!(prompt.messages[1].role, "user");
    }

    #[test]
    fn keeps_existing_system_message() {
        let mut prompt = user_prompt();
        prompt.messages.push(Message::system("already here"));

        prompt.ensure_system_prompt("configured prompt");
        prompt.ensure_system_prompt("configured prompt");

        let system_count = prompt
            .messages
            .iter()
            .filter(|message| message.role == "system")
            .count();
        assert_eq!(system_count, 1);
        assert_eq!(prompt.messages[1].content, "already here");
    }

    #[test]
    fn empty_system_prompt_is_still_injected() {
        let mut prompt = user_prompt();
        prompt.ensure_system_prompt("");

        assert_eq!(prompt.messages[0].role, "system");
        assert_eq!(prompt.messages[0].content, "");
    }

    #[test]
    fn missing_messages_field_parses_as_empty() {
        let prompt: Prompt = serde_json::from_str("{}").unwrap();
        assert!(prompt.messages.is_empty());
    }

    #[test]
    fn generation_parameter_defaults() {
        let prompt = user_prompt();
        assert_eq!(prompt.temperature(), 0.7);
        assert_eq!(prompt.max_tokens(), 2000);
    }

    #[test]
    fn generation_parameters_are_clamped() {
        let prompt = Prompt {
            messages: vec![],
            temperature: Some(9.5),
            max_tokens: Some(0),
        };
        assert_eq!(prompt.temperature(), 2.0);
        assert_eq!(prompt.max_tokens(), 1);
    }

    #[test]
    fn in_range_parameters_pass_through() {
        let prompt = Prompt {
            messages: vec![],
            temperature: Some(1.3),
            max_tokens: Some(512),
        };
        assert_eq!(prompt.temperature(), 1.3);
        assert_eq!(prompt.max_tokens(), 512);
    }
}
