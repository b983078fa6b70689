use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{CompletionRequest, LlmProvider};
use crate::{RecapError, Result};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(RecapError::MissingCredential(
                "OpenAI API key is missing. Set llm.api_key in config or OPENAI_API_KEY \
                 (OPENAI_API_BASE optionally overrides the endpoint)."
                    .to_string(),
            ));
        }

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_OPENAI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .map_err(|e| RecapError::completion_with("Failed to build OpenAI HTTP client", e))?,
            api_key,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = ChatCompletionRequest {
            model: request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecapError::completion_with("OpenAI request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecapError::completion(format!(
                "OpenAI returned {}: {}",
                status,
                error_message(body)
            )));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RecapError::completion_with("Failed to parse OpenAI response", e))?;

        first_choice_text(&payload)
            .ok_or_else(|| RecapError::completion("OpenAI response did not contain any text"))
    }
}

/// The API's `error.message` when the body carries one, else the raw body.
fn error_message(body: String) -> String {
    if body.trim().is_empty() {
        return "empty response body".to_string();
    }
    match serde_json::from_str::<OpenAiErrorResponse>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body,
    }
}

fn first_choice_text(payload: &ChatCompletionResponse) -> Option<String> {
    payload
        .choices
        .iter()
        .filter_map(|c| c.message.content.as_deref())
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key(key: &str) -> Settings {
        let mut settings = Settings::default();
        settings.llm.api_key = key.to_string();
        settings
    }

    #[test]
    fn blank_key_is_missing_credential() {
        let err = OpenAiClient::from_settings(&settings_with_key("   ")).err();
        assert!(matches!(err, Some(RecapError::MissingCredential(_))));
    }

    #[test]
    fn endpoint_defaults_and_trims_trailing_slash() {
        let client = OpenAiClient::from_settings(&settings_with_key("sk-test")).unwrap();
        assert_eq!(
            client.request_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let mut settings = settings_with_key("sk-test");
        settings.llm.endpoint = "http://localhost:8080/v1/".to_string();
        let client = OpenAiClient::from_settings(&settings).unwrap();
        assert_eq!(client.request_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn request_serializes_decoding_parameters() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.5,
            max_tokens: 4096,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["max_tokens"], 4096);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["temperature"], 0.5);
    }

    #[test]
    fn first_non_empty_choice_is_used() {
        let payload: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [
                {"message": {"content": "   "}},
                {"message": {"content": null}},
                {"message": {"content": " {\"a\": 1} "}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(&payload).as_deref(), Some("{\"a\": 1}"));

        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_choice_text(&empty), None);
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body.to_string()), "Incorrect API key provided");
    }

    #[test]
    fn non_json_error_body_is_kept_raw() {
        assert_eq!(
            error_message("<html>502 Bad Gateway</html>".to_string()),
            "<html>502 Bad Gateway</html>"
        );
        assert_eq!(
            error_message(r#"{"detail": "not found"}"#.to_string()),
            r#"{"detail": "not found"}"#
        );
    }

    #[test]
    fn empty_error_body_is_named() {
        assert_eq!(error_message(String::new()), "empty response body");
        assert_eq!(error_message("  \n".to_string()), "empty response body");
    }
}
