//! Assistant widget configuration types.

use kontrol_common::Section;
use serde::{Deserialize, Serialize};

/// Shown as an assistant message when the responder fails.
pub const DEFAULT_FALLBACK_TEXT: &str =
    "Lo siento, no he podido procesar tu consulta. Inténtalo de nuevo en unos momentos.";

/// Screen corner the collapsed launcher is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum WidgetPosition {
    #[default]
    BottomRight,
    BottomLeft,
}

/// Assistant widget options, read once when the widget mounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Start expanded instead of collapsed.
    pub default_open: bool,
    /// Section context (title, greeting, default suggestions).
    pub section: Section,
    /// Suggestion chips. Empty means use the section's defaults.
    pub suggested_questions: Vec<String>,
    /// Text of the error message appended when the responder fails.
    pub fallback_text: String,
    /// Longest accepted submission, in characters (valid range: 1-16384).
    pub max_input_len: u32,
    pub position: WidgetPosition,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_open: false,
            section: Section::Dashboard,
            suggested_questions: Vec::new(),
            fallback_text: DEFAULT_FALLBACK_TEXT.into(),
            max_input_len: 4096,
            position: WidgetPosition::BottomRight,
        }
    }
}
