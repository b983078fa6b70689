//! Summary data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::summary::validate::is_valid;

/// A task pulled out of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// What needs to be done
    pub task: String,

    /// Who is responsible ("Not specified" when unknown)
    pub owner: String,

    /// When it is due ("Not specified" when unknown)
    pub deadline: String,
}

/// Successful summary of one meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSummary {
    /// Brief descriptive title
    pub meeting_title: String,

    /// Main purpose in 1-2 sentences
    pub agenda: String,

    /// Action items in transcript order
    pub action_items: Vec<ActionItem>,
}

/// Error codes the model may answer with instead of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The input was not a meeting
    NotAMeetingTranscript,
    /// A meeting, but nobody committed to anything
    NoActionItemsFound,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 2] = [Self::NotAMeetingTranscript, Self::NoActionItemsFound];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAMeetingTranscript => "NOT_A_MEETING_TRANSCRIPT",
            Self::NoActionItemsFound => "NO_ACTION_ITEMS_FOUND",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == s)
    }

    /// Human-readable explanation for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotAMeetingTranscript => "The text does not look like a meeting transcript",
            Self::NoActionItemsFound => "No action items were found in this meeting",
        }
    }
}

/// Typed view of a response object that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(MeetingSummary),
    Error(ErrorCode),
}

impl SummaryOutcome {
    /// Convert a parsed response, or `None` if it fails [`is_valid`].
    pub fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        if !is_valid(obj) {
            return None;
        }

        if let Some(code) = obj.get("error").and_then(Value::as_str) {
            return ErrorCode::parse(code).map(Self::Error);
        }

        serde_json::from_value(Value::Object(obj.clone()))
            .ok()
            .map(Self::Summary)
    }
}
