use async_trait::async_trait;

use crate::config::Config;
use crate::errors::GenerationError;
use crate::wire::GenerationRequest;

pub mod gemini;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Send one request and return the raw text of the model's answer.
    async fn generate(&self, req: &GenerationRequest) -> Result<String, GenerationError>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

/// Build the provider for a configured API key; `None` when no key is set.
pub fn make_provider(cfg: &Config, debug: bool) -> Option<DynProvider> {
    if !cfg.has_api_key() {
        return None;
    }
    let key = cfg.api_key.as_deref()?.trim().to_string();
    Some(Box::new(gemini::GeminiProvider::new(
        key,
        cfg.api_base.clone(),
        cfg.timeout_secs,
        debug,
    )))
}
