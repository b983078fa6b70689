use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::Settings;
use crate::llm::cache::{cache_key, CompletionCache};
use crate::llm::openai::OpenAiClient;
use crate::{RecapError, Result};

/// One remote completion call.
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A hosted text-completion backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

/// Anything that turns a prompt into completion text.
///
/// The agent and the judge only see this seam, so tests can hand them a
/// canned responder instead of a networked client.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        other => Err(RecapError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai",
            other
        ))),
    }
}

/// Provider plus fixed decoding parameters plus optional on-disk memoization.
pub struct CompletionClient {
    provider: Box<dyn LlmProvider>,
    cache: Option<CompletionCache>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        cache: Option<CompletionCache>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            cache,
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// Build the configured provider and cache. Fails immediately when no
    /// API key is available.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = build_provider(settings)?;
        let cache = settings
            .cache
            .enabled
            .then(|| CompletionCache::new(settings.cache_dir()));

        Ok(Self::new(
            provider,
            cache,
            settings.llm.model.trim(),
            settings.llm.temperature,
            settings.llm.max_tokens,
        ))
    }

    /// Drop the cache so every call reaches the provider.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }
}

#[async_trait]
impl Completer for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let key = cache_key(prompt, &self.model, self.max_tokens);

        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            debug!("Serving completion from cache");
            return Ok(cached);
        }

        info!(model = %self.model, "Requesting completion");
        let text = self
            .provider
            .complete(CompletionRequest {
                prompt,
                model: &self.model,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &text);
        }

        Ok(text)
    }
}
