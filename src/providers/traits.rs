use anyhow::Result;
use async_trait::async_trait;

/// A chat-completion backend that can also describe images. The
/// orchestrator only ever talks to this trait, so tests can swap in
/// stub implementations.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn new(api_key: String, system_message: String) -> Result<Self>
    where
        Self: Sized;

    async fn complete(&self, prompt: &str) -> Result<String>;

    async fn describe_image(&self, prompt: &str, image: &[u8], mime_type: &str)
        -> Result<String>;

    async fn get_model_info(&self) -> Result<String>;

    fn get_system_message(&self) -> String;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
