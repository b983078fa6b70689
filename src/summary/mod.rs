//! Summary module for recap
//!
//! The meeting agent, the response schema, and its validator.

mod agent;
mod models;
mod validate;

pub use agent::MeetingAgent;
pub use models::{ActionItem, ErrorCode, MeetingSummary, SummaryOutcome};
pub use validate::is_valid;
