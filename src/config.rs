use crate::services::Upstream;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMode {
    /// Generic OpenAI-compatible chat completions endpoint.
    Chat,
    /// Vendor bot endpoint; `model_id` carries the bot id.
    Bot,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_base_url: String,
    pub client_api_key: String,
    pub upstream_api_key: String,
    pub model_id: String,
    pub system_prompt: String,
    pub allowed_origins: Vec<String>,
    pub upstream_mode: UpstreamMode,
}

impl Config {
    pub fn from_env() -> Self {
        let upstream_mode = match env::var("UPSTREAM_MODE").as_deref() {
            Ok("bot") => UpstreamMode::Bot,
            _ => UpstreamMode::Chat,
        };

        Self {
            upstream_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
            client_api_key: env::var("CLIENT_API_KEY").expect("CLIENT_API_KEY must be set"),
            upstream_api_key: env::var("UPSTREAM_API_KEY").expect("UPSTREAM_API_KEY must be set"),
            model_id: env::var("MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            system_prompt: env::var("SYSTEM_PROMPT").unwrap_or_else(|_| "".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            upstream_mode,
        }
    }

    pub fn upstream(&self) -> Upstream {
        match self.upstream_mode {
            UpstreamMode::Chat => Upstream::Chat {
                base_url: self.upstream_base_url.clone(),
                model: self.model_id.clone(),
                api_key: self.upstream_api_key.clone(),
            },
            UpstreamMode::Bot => Upstream::Bot {
                base_url: self.upstream_base_url.clone(),
                bot_id: self.model_id.clone(),
                api_key: self.upstream_api_key.clone(),
            },
        }
    }
}
