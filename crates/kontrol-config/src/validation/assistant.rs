//! Validation for the `[assistant]` section.

use crate::schema::AssistantConfig;

use super::helpers::{validate_non_blank, validate_range};

/// Most suggestion chips the panel lays out.
pub(crate) const MAX_SUGGESTIONS: usize = 8;

pub(crate) fn validate_assistant_section(errors: &mut Vec<String>, config: &AssistantConfig) {
    validate_range(
        errors,
        "assistant.max_input_len",
        config.max_input_len,
        1,
        16384,
    );
    validate_non_blank(errors, "assistant.fallback_text", &config.fallback_text);

    if config.suggested_questions.len() > MAX_SUGGESTIONS {
        errors.push(format!(
            "assistant.suggested_questions has {} entries (max {MAX_SUGGESTIONS})",
            config.suggested_questions.len()
        ));
    }

    for (i, question) in config.suggested_questions.iter().enumerate() {
        let name = format!("assistant.suggested_questions[{i}]");
        validate_non_blank(errors, &name, question);
        let len = question.chars().count();
        if len > config.max_input_len as usize {
            errors.push(format!(
                "{name} is {len} characters, longer than assistant.max_input_len"
            ));
        }
    }
}
