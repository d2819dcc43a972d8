//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = KontrolConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_max_input_len() {
    let mut config = KontrolConfig::default();
    config.assistant.max_input_len = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.max_input_len"));
}

#[test]
fn catches_blank_fallback_text() {
    let mut config = KontrolConfig::default();
    config.assistant.fallback_text = "   ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.fallback_text"));
}

#[test]
fn catches_blank_suggestion() {
    let mut config = KontrolConfig::default();
    config.assistant.suggested_questions = vec!["¿Qué debo revisar?".into(), "".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.suggested_questions[1]"));
    assert!(!err.contains("suggested_questions[0]"));
}

#[test]
fn catches_too_many_suggestions() {
    let mut config = KontrolConfig::default();
    config.assistant.suggested_questions = (0..9).map(|i| format!("pregunta {i}")).collect();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("max 8"));
}

#[test]
fn catches_suggestion_longer_than_input_cap() {
    let mut config = KontrolConfig::default();
    config.assistant.max_input_len = 5;
    config.assistant.suggested_questions = vec!["demasiado larga".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("longer than assistant.max_input_len"));
}

#[test]
fn catches_timeout_out_of_range() {
    let mut config = KontrolConfig::default();
    config.responder.timeout_secs = 301;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("responder.timeout_secs"));
}

#[test]
fn http_responder_requires_http_url() {
    let mut config = KontrolConfig::default();
    config.responder.kind = ResponderKind::Http;
    config.responder.endpoint = "ftp://backend".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("responder.endpoint"));
}

#[test]
fn canned_responder_ignores_endpoint() {
    let mut config = KontrolConfig::default();
    config.responder.endpoint = String::new();
    assert!(validate(&config).is_ok());
}

#[test]
fn collects_multiple_errors() {
    let mut config = KontrolConfig::default();
    config.assistant.max_input_len = 0;
    config.responder.connect_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("assistant.max_input_len"));
    assert!(err.contains("responder.connect_timeout_secs"));
    assert!(err.contains("; "));
}

#[test]
fn validate_assistant_ignores_other_sections() {
    let mut config = KontrolConfig::default();
    config.responder.timeout_secs = 0;
    assert!(validate_assistant(&config.assistant).is_ok());
}
