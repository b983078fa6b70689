//! LLM-as-judge evaluation of meeting summaries
//!
//! A second completion grades a summary against loosely worded expectations
//! using semantic matching. The judge never errors: any failure becomes a
//! failing [`Evaluation`] that explains what went wrong.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::llm::prompts::build_judge_prompt;
use crate::llm::{extract_json, Completer};

/// Minimum score for a passing evaluation.
pub const PASS_THRESHOLD: u32 = 60;

/// Patterns a good summary of a given transcript should contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expectations {
    pub action_items: Vec<String>,
    pub owners: Vec<String>,
    pub deadlines: Vec<String>,
}

/// Verdict returned by the judge.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub pass: bool,
    pub score: u32,
    pub feedback: String,
    pub criteria_scores: BTreeMap<String, f64>,
    pub issues: Vec<String>,
}

impl Evaluation {
    /// Failing verdict for when the judge itself could not run.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            pass: false,
            score: 0,
            feedback: format!("Judge evaluation failed: {reason}"),
            criteria_scores: BTreeMap::new(),
            issues: vec![format!("Judge error: {reason}")],
        }
    }

    /// Passed according to the judge and at or above [`PASS_THRESHOLD`].
    pub fn is_passing(&self) -> bool {
        self.pass && self.score >= PASS_THRESHOLD
    }

    /// Build an evaluation from the judge's JSON, filling in whatever the
    /// judge left out.
    pub fn from_judge_object(mut obj: Map<String, Value>) -> Self {
        let score = obj.get("score").and_then(score_value);
        let pass = obj.get("pass").and_then(Value::as_bool);

        let (pass, score) = match (pass, score) {
            (Some(pass), Some(score)) => (pass, score),
            (None, Some(score)) => (score >= PASS_THRESHOLD, score),
            (Some(pass), None) => (pass, if pass { 60 } else { 40 }),
            (None, None) => (false, 40),
        };

        let feedback = match obj.remove("feedback") {
            Some(Value::String(feedback)) => feedback,
            _ => "Evaluation completed".to_string(),
        };

        let criteria_scores = match obj.remove("criteria_scores") {
            Some(Value::Object(scores)) => scores
                .into_iter()
                .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
                .collect(),
            _ => BTreeMap::new(),
        };

        let issues = match obj.remove("issues") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            pass,
            score,
            feedback,
            criteria_scores,
            issues,
        }
    }
}

fn score_value(value: &Value) -> Option<u32> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u32)
}

/// Ask the judge to grade `summary` for `transcript`.
pub async fn judge_summary(
    completer: &dyn Completer,
    transcript: &str,
    summary: &Map<String, Value>,
    expected: &Expectations,
) -> Evaluation {
    let summary_json = match serde_json::to_string_pretty(summary) {
        Ok(json) => json,
        Err(e) => return Evaluation::failed(e),
    };

    let prompt = build_judge_prompt(
        transcript,
        &summary_json,
        &expected.action_items,
        &expected.owners,
        &expected.deadlines,
    );

    let reply = match completer.complete(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Judge completion failed: {}", e);
            return Evaluation::failed(e);
        }
    };

    match extract_json(&reply) {
        Ok(obj) => Evaluation::from_judge_object(obj),
        Err(e) => {
            warn!("Judge reply was not JSON: {}", e);
            Evaluation::failed(e)
        }
    }
}
