//! LLM module for recap
//!
//! Completion plumbing: the OpenAI provider, the caching client wrapped
//! around it, and recovery of JSON objects from model output.

pub mod cache;
mod client;
pub mod extract;
mod openai;
pub mod prompts;

pub use cache::{cache_key, CacheStats, CompletionCache};
pub use client::{build_provider, Completer, CompletionClient, CompletionRequest, LlmProvider};
pub use extract::{extract_json, Strategy};
pub use openai::OpenAiClient;
