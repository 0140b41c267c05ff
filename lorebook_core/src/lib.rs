//! # Lorebook Core
//!
//! Personalizes a conversational agent by turning a handful of personality
//! tags into a lorebook of behavioral directives, then selecting the part of
//! it that fits the user's current emotion on every turn.
//!
//! ## Core Components
//!
//! - **lorebook**: The persisted document and its chunks
//! - **generator**: Builds lorebooks from tag selections and custom entries
//! - **retriever**: Renders an emotion-specific, budgeted subset per turn
//! - **summary**: Statistics and JSON export/import
//!
//! ## Data Flow
//!
//! Tag selection -> `LorebookGenerator` -> `Lorebook` (stored by the caller)
//! -> `LorebookRetriever` + emotion signal -> `RenderedChunk`s for the prompt.
//!
//! Both halves share one read-only `TemplateCatalog` passed in at
//! construction.

pub mod config;
pub mod error;
pub mod generator;
pub mod lorebook;
pub mod retriever;
pub mod summary;

pub use config::*;
pub use error::{LorebookError, Result};
pub use generator::*;
pub use lorebook::*;
pub use retriever::*;
pub use summary::*;

pub use persona_templates::{
    EmotionResponse, EmotionResponses, Template, TemplateCatalog, Triggers, DEFAULT_EMOTION,
};
