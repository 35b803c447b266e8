//! Context compression: replace the conversational tail with a
//! model-generated summary while keeping `System` elements and a
//! trailing unanswered `User` element verbatim.

use crate::completion::CompletionBackend;
use crate::error::Result;
use crate::types::{ContextElement, Creativity};

const SUMMARY_INSTRUCTION: &str = "Summarize our conversation so far.";

/// Produce a compressed replacement for `context`, or `None` when there
/// is no summarizable tail.
///
/// One-shot and best-effort: the summary request is a new, independent
/// completion (same temperature, no tools), and any failure leaves the
/// original context untouched for the caller to retry on the next
/// threshold check.
pub(crate) async fn compress(
    backend: &dyn CompletionBackend,
    context: &[ContextElement],
    creativity: Creativity,
) -> Result<Option<Vec<ContextElement>>> {
    let mut kept: Vec<ContextElement> = Vec::new();
    let mut tail: Vec<ContextElement> = Vec::new();
    for element in context {
        match element {
            ContextElement::System { .. } => kept.push(element.clone()),
            other => tail.push(other.clone()),
        }
    }

    // A trailing User element with no response yet is the in-flight
    // request; it must survive unsummarized.
    let pending = match tail.last() {
        Some(ContextElement::User { .. }) => tail.pop(),
        _ => None,
    };

    if tail.is_empty() {
        return Ok(None);
    }

    let prompt = format!("{}\n\n{SUMMARY_INSTRUCTION}", render_transcript(&tail));
    let summary_context = vec![ContextElement::user(prompt)];
    let turn = backend.complete(&summary_context, creativity, &[]).await?;

    kept.push(ContextElement::user(turn.content));
    kept.extend(pending);
    Ok(Some(kept))
}

/// Serialize elements to role-tagged text for the summary prompt.
fn render_transcript(elements: &[ContextElement]) -> String {
    elements
        .iter()
        .map(|element| {
            let body = match element {
                ContextElement::Assistant(turn) => match &turn.tool_call {
                    Some(call) => format!("[called tool {} with {}]", call.name, call.arguments),
                    None => turn.content.clone(),
                },
                other => other.text().to_string(),
            };
            format!("{}: {}", element.role().as_str(), body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
