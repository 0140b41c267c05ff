//! Short previews of what a tag will do, for tooltips.

use persona_templates::Template;

/// Preview text for templates with an empty response table.
pub const NO_RESPONSES_PREVIEW: &str = "No emotion responses defined";

const ELLIPSIS: &str = "...";

/// Build a preview from a template's `"default"` response.
///
/// Without a default, the first response in iteration order is used and its
/// emotion label is prefixed in brackets. Longer previews are cut to `limit`
/// characters and marked with an ellipsis.
pub fn preview_template(template: &Template, limit: usize) -> String {
    let responses = &template.emotion_responses;

    let preview = match responses.default_response() {
        Some(response) => format!("Tone: {}. Action: {}", response.tone, response.action),
        None => match responses.first() {
            Some((emotion, response)) => format!(
                "[{}] Tone: {}. Action: {}",
                emotion, response.tone, response.action
            ),
            None => return NO_RESPONSES_PREVIEW.to_string(),
        },
    };

    truncate(preview, limit)
}

fn truncate(text: String, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text;
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str(ELLIPSIS);
    cut
}
