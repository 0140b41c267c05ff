//! Rendering of chunks for a specific emotion signal.

use tracing::warn;

use super::{EmotionScore, RenderedChunk};
use crate::lorebook::{Chunk, ChunkBody};

/// Format a tone and action into the injected two-line layout.
pub fn format_content(tone: &str, action: &str) -> String {
    format!("**Tone:** {}\n**Action:** {}", tone, action)
}

/// Secondary emotion labels ordered by descending score.
///
/// Equal scores keep the order the classifier reported them in.
pub fn ranked_labels(top_emotions: &[EmotionScore]) -> Vec<&str> {
    let mut ranked: Vec<&EmotionScore> = top_emotions.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.into_iter().map(|e| e.label.as_str()).collect()
}

/// Render one chunk against an emotion and its ranked fallbacks.
///
/// Each chunk resolves its emotion independently. A template-backed chunk
/// with no usable response renders with empty tone and action and zero cost
/// instead of failing.
pub fn render_chunk(chunk: &Chunk, emotion: &str, fallbacks: &[&str]) -> RenderedChunk {
    let (content, tokens, resolved) = match &chunk.body {
        ChunkBody::Custom { content } => (content.clone(), chunk.tokens, None),
        ChunkBody::TagMatched {
            emotion_responses, ..
        } => match emotion_responses.resolve(emotion, fallbacks.iter().copied()) {
            Some((key, response)) => (
                format_content(&response.tone, &response.action),
                response.tokens,
                Some(key.to_string()),
            ),
            None => {
                warn!(chunk = %chunk.id, emotion = %emotion, "chunk has no usable emotion response");
                (format_content("", ""), 0, None)
            }
        },
    };

    RenderedChunk {
        id: chunk.id.clone(),
        category: chunk.category.clone(),
        priority: chunk.priority,
        source: chunk.source(),
        ui_tag: chunk.ui_tag().map(str::to_string),
        content,
        tokens,
        estimated_tokens: chunk.tokens,
        emotion: resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lorebook::ChunkSource;
    use persona_templates::{EmotionResponse, Template, Triggers, DEFAULT_EMOTION};

    fn warm_chunk() -> Chunk {
        let template = Template::new("ee_warm", "Emotional Expression", "Warm", 80)
            .with_requires_selection(true)
            .with_response("sadness", EmotionResponse::new("gentle", "offers comfort", 40))
            .with_response("joy", EmotionResponse::new("bright", "cheers", 35))
            .with_response(DEFAULT_EMOTION, EmotionResponse::new("warm", "smiles", 30))
            .with_tokens(45);
        Chunk::from_template(&template, "Emotional Expression")
    }

    #[test]
    fn test_format_content() {
        assert_eq!(
            format_content("gentle", "offers comfort"),
            "**Tone:** gentle\n**Action:** offers comfort"
        );
    }

    #[test]
    fn test_ranked_labels_sorts_by_score() {
        let top = vec![
            EmotionScore::new("annoyance", 0.45),
            EmotionScore::new("frustration", 0.78),
            EmotionScore::new("disappointment", 0.62),
        ];
        assert_eq!(
            ranked_labels(&top),
            vec!["frustration", "disappointment", "annoyance"]
        );
    }

    #[test]
    fn test_render_primary_emotion() {
        let rendered = render_chunk(&warm_chunk(), "sadness", &[]);

        assert_eq!(rendered.content, "**Tone:** gentle\n**Action:** offers comfort");
        assert_eq!(rendered.tokens, 40);
        assert_eq!(rendered.estimated_tokens, 45);
        assert_eq!(rendered.emotion.as_deref(), Some("sadness"));
        assert_eq!(rendered.ui_tag.as_deref(), Some("Warm"));
        assert_eq!(rendered.source, ChunkSource::TagMatched);
    }

    #[test]
    fn test_render_uses_fallback_then_default() {
        let chunk = warm_chunk();

        let fallback = render_chunk(&chunk, "anger", &["fear", "joy"]);
        assert_eq!(fallback.emotion.as_deref(), Some("joy"));
        assert_eq!(fallback.tokens, 35);

        let default = render_chunk(&chunk, "anger", &["fear"]);
        assert_eq!(default.emotion.as_deref(), Some(DEFAULT_EMOTION));
        assert!(default.content.contains("smiles"));
    }

    #[test]
    fn test_render_malformed_chunk() {
        let chunk: Chunk = serde_json::from_str(
            r#"{"id": "broken", "category": "C", "priority": 10, "tokens": 50, "source": "tag_matched"}"#,
        )
        .unwrap();

        let rendered = render_chunk(&chunk, "joy", &[]);
        assert_eq!(rendered.content, "**Tone:** \n**Action:** ");
        assert_eq!(rendered.tokens, 0);
        assert_eq!(rendered.estimated_tokens, 50);
        assert!(rendered.emotion.is_none());
    }

    #[test]
    fn test_render_custom_chunk() {
        let chunk = Chunk {
            id: "custom_0".to_string(),
            category: "custom".to_string(),
            priority: 50,
            tokens: 12,
            triggers: Triggers::none(),
            body: ChunkBody::Custom {
                content: "Grew up by the sea".to_string(),
            },
        };

        let rendered = render_chunk(&chunk, "joy", &[]);
        assert_eq!(rendered.content, "Grew up by the sea");
        assert_eq!(rendered.tokens, 12);
        assert!(rendered.ui_tag.is_none());
        assert_eq!(rendered.source, ChunkSource::Custom);
    }
}
