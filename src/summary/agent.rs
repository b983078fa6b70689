use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::llm::prompts::SUMMARY_TEMPLATE;
use crate::llm::{extract_json, Completer};
use crate::Result;

/// Turns transcripts into summary objects with one completion each.
///
/// Whether the text is a meeting, and whether it has action items, is left
/// entirely to the model; the agent only builds the prompt and parses the
/// reply.
pub struct MeetingAgent {
    completer: Arc<dyn Completer>,
    template: String,
}

impl MeetingAgent {
    /// Use the template at `template_path`, or the built-in one when the
    /// path is empty. An override that cannot be read falls back to the
    /// built-in template.
    pub fn new(completer: Arc<dyn Completer>, template_path: &Path) -> Self {
        if template_path.as_os_str().is_empty() {
            return Self::with_template(completer, SUMMARY_TEMPLATE);
        }

        let template = match std::fs::read_to_string(template_path) {
            Ok(template) => {
                debug!("Loaded summary template from {}", template_path.display());
                template
            }
            Err(e) => {
                warn!(
                    "Could not read summary template {}: {}. Using built-in template.",
                    template_path.display(),
                    e
                );
                SUMMARY_TEMPLATE.to_string()
            }
        };

        Self::with_template(completer, template)
    }

    pub fn with_template(completer: Arc<dyn Completer>, template: impl Into<String>) -> Self {
        Self {
            completer,
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Summarize a transcript. The parsed object is returned as-is; callers
    /// decide what to do with it via [`crate::summary::is_valid`].
    pub async fn summarize(&self, transcript: &str) -> Result<Map<String, Value>> {
        let prompt = self.build_prompt(transcript);
        let completion = self.completer.complete(&prompt).await?;
        extract_json(&completion)
    }

    fn build_prompt(&self, transcript: &str) -> String {
        let mut prompt = String::with_capacity(self.template.len() + transcript.len());
        prompt.push_str(&self.template);
        prompt.push_str(transcript);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecapError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingCompleter {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Completer for RecordingCompleter {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn recording(reply: &str) -> Arc<RecordingCompleter> {
        Arc::new(RecordingCompleter {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn prompt_is_template_followed_by_transcript() {
        let completer = recording("{\"error\": \"NO_ACTION_ITEMS_FOUND\"}");
        let agent = MeetingAgent::with_template(completer.clone(), "INSTRUCTIONS\n");

        agent.summarize("Alice: hi").await.unwrap();

        let prompts = completer.prompts.lock().unwrap();
        assert_eq!(*prompts, vec!["INSTRUCTIONS\nAlice: hi".to_string()]);
    }

    #[test]
    fn empty_path_uses_builtin_template() {
        let agent = MeetingAgent::new(recording("{}"), Path::new(""));
        assert_eq!(agent.template(), SUMMARY_TEMPLATE);
    }

    #[test]
    fn missing_override_falls_back_to_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        let agent = MeetingAgent::new(recording("{}"), &tmp.path().join("missing.txt"));
        assert_eq!(agent.template(), SUMMARY_TEMPLATE);
    }

    #[test]
    fn template_file_is_loaded_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("summary.txt");
        std::fs::write(&path, "Custom instructions\nTranscript:\n").unwrap();

        let agent = MeetingAgent::new(recording("{}"), &path);
        assert_eq!(agent.template(), "Custom instructions\nTranscript:\n");
    }

    #[tokio::test]
    async fn unparseable_reply_is_malformed_response() {
        let agent = MeetingAgent::with_template(recording("Sorry, I can't help."), "T:");
        let err = agent.summarize("anything").await.unwrap_err();
        assert!(matches!(err, RecapError::MalformedResponse { .. }));
    }
}
