use crate::models::prompt::Message;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::{json, Value};

/// The upstream endpoint a deployment forwards to. Both variants speak the
/// OpenAI chat-completion shape; they differ in path and in what the
/// `model` field carries.
#[derive(Debug, Clone)]
pub enum Upstream {
    Chat {
        base_url: String,
        model: String,
        api_key: String,
    },
    Bot {
        base_url: String,
        bot_id: String,
        api_key: String,
    },
}

impl Upstream {
    pub fn endpoint(&self) -> String {
        match self {
            Upstream::Chat { base_url, .. } => {
                format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
            }
            Upstream::Bot { base_url, .. } => format!(
                "{}/api/v3/bots/chat/completions",
                base_url.trim_end_matches('/')
            ),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Upstream::Chat { model, .. } => model,
            Upstream::Bot { bot_id, .. } => bot_id,
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            Upstream::Chat { api_key, .. } => api_key,
            Upstream::Bot { api_key, .. } => api_key,
        }
    }
}

#[derive(Debug)]
pub enum ForwardError {
    /// Upstream answered with a non-success status; relayed to the caller.
    Upstream {
        status: u16,
        url: String,
        details: Value,
    },
    /// Request never completed or the success body was unusable.
    Transport(String),
}

pub struct ChatProxyService {
    client: Client,
    upstream: Upstream,
}

impl ChatProxyService {
    pub fn new(upstream: Upstream) -> Self {
        Self {
            client: Client::new(),
            upstream,
        }
    }

    /// Issues the single outbound call and reduces the upstream reply to the
    /// assistant content string.
    pub async fn forward(
        &self,
        messages: Vec<Message>,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, ForwardError> {
        let url = self.upstream.endpoint();
        let request_body = json!({
            "model": self.upstream.model(),
            "messages": messages,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.upstream.api_key()),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ForwardError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let details = response.json::<Value>().await.unwrap_or(Value::Null);
            return Err(ForwardError::Upstream {
                status: status.as_u16(),
                url,
                details,
            });
        }

        let completion: ChatCompletion = response.json().await.map_err(|e| {
            ForwardError::Transport(format!("Failed to parse upstream response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ForwardError::Transport("Upstream response contained no choices".to_string())
            })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
