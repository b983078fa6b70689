//! Built-in prompt text.

/// Summary instructions shipped with the binary. Used unless
/// `prompts.template_path` points at a readable override.
pub const SUMMARY_TEMPLATE: &str = include_str!("../../prompts/summary.txt");

/// Grading rubric prepended to every judge prompt.
pub const JUDGE_RUBRIC: &str = "\
You are an expert evaluator for meeting summarizer systems.
Your job is to assess whether an AI agent correctly extracted information from a meeting transcript.

Evaluate based on these criteria:
1. **Action Items Completeness (40%)**: Did it find all action items from the transcript?
2. **Ownership Accuracy (20%)**: Are the owners correctly identified?
3. **Deadline Accuracy (20%)**: Are deadlines correctly extracted?
4. **Meeting Context (10%)**: Is the title and agenda appropriate?
5. **Output Quality (10%)**: Is the output clear and well-structured?

Return your evaluation as JSON with this structure:
{
  \"pass\": true/false,
  \"score\": 0-100,
  \"feedback\": \"Overall assessment\",
  \"criteria_scores\": {
    \"action_items_completeness\": 0-40,
    \"ownership_accuracy\": 0-20,
    \"deadline_accuracy\": 0-20,
    \"meeting_context\": 0-10,
    \"output_quality\": 0-10
  },
  \"issues\": [\"list of any problems found\"]
}

Be fair but thorough. Missing one action item shouldn't fail the test, but missing multiple or getting owners/deadlines wrong should result in failure.
The agent should pass with a score >= 60.
";

/// Closing instructions of the judge prompt, after the expected patterns.
pub const JUDGE_TASK: &str = "\
# YOUR TASK
Evaluate the agent's summary. Use SEMANTIC MATCHING - don't require exact word matches.

For example:
- \"Deploy login feature\" matches \"deploy login bug fix\" (similar meaning)
- \"Bob\" matches if listed as owner
- \"tomorrow\" matches \"tomorrow\" or \"the next day\"

\"Not specified\" is acceptable for an owner or deadline the transcript does not mention.

A summary should PASS if it extracts most action items (missing 1 out of 3-4 is ok),
owners and deadlines are correct or marked \"Not specified\", the title and agenda are
reasonable, and the score is >= 60.

A summary should FAIL if multiple action items are missing, owners are frequently wrong,
deadlines are incorrect, the output structure is invalid, or the score is < 60.
";

/// Build the judge prompt for one summary.
pub fn build_judge_prompt(
    transcript: &str,
    summary_json: &str,
    action_items: &[String],
    owners: &[String],
    deadlines: &[String],
) -> String {
    format!(
        "{JUDGE_RUBRIC}\n\n\
# MEETING TRANSCRIPT\n```\n{transcript}\n```\n\n\
# AGENT'S SUMMARY\n```json\n{summary_json}\n```\n\n\
# EXPECTED PATTERNS\n\
The summary should contain these elements (use semantic matching, not exact strings):\n\n\
Action Items (should extract tasks similar to):\n{}\n\n\
Owners (should identify people/teams including):\n{}\n\n\
Deadlines (should extract timeframes like):\n{}\n\n\
{JUDGE_TASK}",
        bullet_list(action_items),
        bullet_list(owners),
        bullet_list(deadlines),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
