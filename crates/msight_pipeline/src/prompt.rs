//! Prompt assembly for stage calls.

use crate::{AgentSpec, TaskSpec};
use msight_core::Message;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Input key carrying human feedback on a replay.
pub const FEEDBACK_KEY: &str = "feedback";

/// System message describing the agent persona.
pub fn system_message(agent: &AgentSpec) -> Message {
    Message::system(format!(
        "You are {}. {}\nYour goal: {}.",
        agent.role(),
        agent.backstory(),
        agent.goal()
    ))
}

/// User prompt for a task with its input mapping.
///
/// String values are inlined as-is; other values are rendered as JSON. A
/// `feedback` entry is set apart after the other inputs.
///
/// # Examples
///
/// ```
/// use msight_pipeline::{Crew, task_prompt};
/// use msight_core::StageKind;
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let crew = Crew::bundled().unwrap();
/// let draft = crew.stage(StageKind::Draft).unwrap();
///
/// let mut input = BTreeMap::new();
/// input.insert("AnalyzeData".to_string(), json!("Fast, cheap, friendly."));
///
/// let prompt = task_prompt(draft.task(), &input);
/// assert!(prompt.starts_with("Draft a video script based on the insights."));
/// assert!(prompt.contains("## AnalyzeData\nFast, cheap, friendly."));
/// ```
pub fn task_prompt(task: &TaskSpec, input: &BTreeMap<String, JsonValue>) -> String {
    let mut prompt = format!(
        "{}\n\nExpected output: {}",
        task.description(),
        task.expected_output()
    );

    for (key, value) in input.iter().filter(|(key, _)| key.as_str() != FEEDBACK_KEY) {
        prompt.push_str(&format!("\n\n## {}\n{}", key, render_value(value)));
    }

    if let Some(feedback) = input.get(FEEDBACK_KEY) {
        prompt.push_str(&format!(
            "\n\n## Human feedback\nRevise your previous answer to address this feedback:\n{}",
            render_value(feedback)
        ));
    }

    prompt
}

fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}
