use std::env;

/// Chat/vision provider settings, from env with sensible defaults.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let chat_model =
            env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let vision_model =
            env::var("OPENAI_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Self {
            api_url,
            chat_model,
            vision_model,
            temperature,
        }
    }
}
