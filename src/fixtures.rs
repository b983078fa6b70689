//! Built-in transcripts: judge-graded evaluation cases and quick samples.

use crate::judge::Expectations;

/// A transcript with the patterns a good summary should contain.
#[derive(Debug, Clone, Copy)]
pub struct EvalCase {
    pub name: &'static str,
    pub description: &'static str,
    pub transcript: &'static str,
    pub action_items: &'static [&'static str],
    pub owners: &'static [&'static str],
    pub deadlines: &'static [&'static str],
}

impl EvalCase {
    pub fn expectations(&self) -> Expectations {
        Expectations {
            action_items: to_strings(self.action_items),
            owners: to_strings(self.owners),
            deadlines: to_strings(self.deadlines),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A named transcript for trying the summarizer by hand.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub title: &'static str,
    pub transcript: &'static str,
}

pub const EVAL_CASES: &[EvalCase] = &[
    EvalCase {
        name: "standup",
        description: "Simple team standup with clear action items and owners",
        transcript: "Alice: I finished the login feature yesterday. Ready to deploy.
Bob: Great! I'll deploy it tomorrow.
Charlie: I'm working on the dashboard. Should be done by Friday.
Alice: Can someone review my code before we deploy?
Bob: Sure, I'll review it today.",
        action_items: &["review code", "deploy login feature", "complete dashboard"],
        owners: &["Alice", "Bob", "Charlie"],
        deadlines: &["today", "tomorrow", "Friday"],
    },
    EvalCase {
        name: "planning",
        description: "Planning meeting with team assignments and hiring needs",
        transcript: "We need to finalize the Q2 roadmap today. The team agreed to prioritize
mobile app development over new features. Sarah will lead the mobile team.
We need to hire 2 more developers by March. Marketing should start preparing
the launch campaign.",
        action_items: &["lead mobile team", "hire developers", "prepare launch campaign"],
        owners: &["Sarah", "Marketing"],
        deadlines: &["March"],
    },
    EvalCase {
        name: "bug-sync",
        description: "Bug fix coordination meeting",
        transcript: "Quick sync on the bug fixes. Mike said the critical login bug is
fixed and will be deployed this afternoon. Lisa is still working on the
performance issue, expects to have it done by end of week.",
        action_items: &["deploy login bug fix", "complete performance issue fix"],
        owners: &["Mike", "Lisa"],
        deadlines: &["this afternoon", "end of week"],
    },
    EvalCase {
        name: "client-meeting",
        description: "Client meeting with follow-up tasks",
        transcript: "Client asked for a progress update on the new dashboard.
Tom will send them screenshots by tomorrow. Emily agreed to schedule a
demo for next Monday. We should also update the documentation before
the demo.",
        action_items: &["send screenshots", "schedule demo", "update documentation"],
        owners: &["Tom", "Emily"],
        deadlines: &["tomorrow", "next Monday", "before the demo"],
    },
    EvalCase {
        name: "project-kickoff",
        description: "Project kickoff with multiple parallel tasks",
        transcript: "Kicking off the new analytics project. Rachel will set up the
repository today. David needs to create the project plan by end of this week.
The design team should provide mockups by next Friday. Let's have a
follow-up meeting next Tuesday to review progress.",
        action_items: &[
            "set up repository",
            "create project plan",
            "provide mockups",
            "schedule follow-up meeting",
        ],
        owners: &["Rachel", "David", "design team"],
        deadlines: &["today", "end of this week", "next Friday", "next Tuesday"],
    },
];

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "standup",
        title: "Team Standup",
        transcript: "Alice: I finished the login feature yesterday. Ready to deploy.
Bob: Great! I'll deploy it tomorrow.
Charlie: I'm working on the dashboard. Should be done by Friday.
Alice: Can someone review my code before we deploy?
Bob: Sure, I'll review it today.",
    },
    Sample {
        name: "planning",
        title: "Planning Meeting",
        transcript: "Sarah: Let's finalize the Q2 roadmap today. I think we should prioritize mobile app development.
Tom: I agree. Mobile is more important than new features right now.
Sarah: Great! I'll lead the mobile team then.
Tom: Sounds good. We need to hire 2 more developers by March.
Sarah: Yes, and marketing should start preparing the launch campaign.
Tom: I'll talk to the marketing team tomorrow.",
    },
    Sample {
        name: "bug-sync",
        title: "Bug Fix Sync",
        transcript: "Mike: Quick sync on the bug fixes everyone. I fixed the critical login bug.
Lisa: That's great! When will it be deployed?
Mike: This afternoon. Lisa, how's the performance issue?
Lisa: Still working on it. Should be done by end of week.
Mike: Perfect. Let me know if you need any help.",
    },
];

pub fn find_case(name: &str) -> Option<&'static EvalCase> {
    EVAL_CASES.iter().find(|case| case.name == name)
}

pub fn find_sample(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|sample| sample.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let cases: HashSet<_> = EVAL_CASES.iter().map(|c| c.name).collect();
        assert_eq!(cases.len(), EVAL_CASES.len());
        let samples: HashSet<_> = SAMPLES.iter().map(|s| s.name).collect();
        assert_eq!(samples.len(), SAMPLES.len());
    }

    #[test]
    fn lookups_find_known_names() {
        assert_eq!(find_case("bug-sync").map(|c| c.owners), Some(&["Mike", "Lisa"][..]));
        assert!(find_sample("planning").is_some());
        assert!(find_case("nope").is_none());
    }

    #[test]
    fn expectations_copy_case_patterns() {
        let expected = find_case("standup").unwrap().expectations();
        assert_eq!(expected.owners, vec!["Alice", "Bob", "Charlie"]);
        assert_eq!(expected.deadlines.len(), 3);
    }
}
