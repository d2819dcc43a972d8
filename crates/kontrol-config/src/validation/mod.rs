//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod assistant;
mod helpers;
mod responder;

#[cfg(test)]
mod tests;

use crate::schema::{AssistantConfig, KontrolConfig};
use kontrol_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KontrolConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    assistant::validate_assistant_section(&mut errors, &config.assistant);
    responder::validate_responder(&mut errors, &config.responder);

    into_result(errors)
}

/// Validate only the widget options. Run when a widget mounts.
pub fn validate_assistant(config: &AssistantConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    assistant::validate_assistant_section(&mut errors, config);
    into_result(errors)
}

fn into_result(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
