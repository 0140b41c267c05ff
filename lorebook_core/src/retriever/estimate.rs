//! Planning estimates of retrieval size.

use serde::{Deserialize, Serialize};

use crate::lorebook::{Chunk, Lorebook};

/// Token ranges a retrieval from a lorebook can be expected to fall in.
///
/// Built from flat chunk estimates, not emotion-specific costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalEstimate {
    /// Always-include chunks only.
    pub min_tokens: u32,
    /// Always-include plus the top `typical` ranked chunks.
    pub typical_tokens: u32,
    /// Always-include plus the top `max_chunks` ranked chunks.
    pub max_tokens: u32,
    pub always_include_count: usize,
}

/// Estimate retrieval size for a lorebook.
pub fn estimate_retrieval_size(
    lorebook: &Lorebook,
    typical: usize,
    max_chunks: usize,
) -> RetrievalEstimate {
    let (always, mut others): (Vec<&Chunk>, Vec<&Chunk>) = lorebook
        .chunks
        .iter()
        .partition(|c| c.is_always_include());

    others.sort_by(|a, b| b.priority.cmp(&a.priority));

    let min_tokens = always.iter().map(|c| c.tokens).fold(0, u32::saturating_add);
    let top = |n: usize| -> u32 {
        others
            .iter()
            .take(n)
            .map(|c| c.tokens)
            .fold(0, u32::saturating_add)
    };

    RetrievalEstimate {
        min_tokens,
        typical_tokens: min_tokens.saturating_add(top(typical)),
        max_tokens: min_tokens.saturating_add(top(max_chunks)),
        always_include_count: always.len(),
    }
}
