//! Validation for the `[responder]` section.

use crate::schema::{ResponderConfig, ResponderKind};

use super::helpers::validate_range;

pub(crate) fn validate_responder(errors: &mut Vec<String>, config: &ResponderConfig) {
    validate_range(errors, "responder.timeout_secs", config.timeout_secs, 1, 300);
    validate_range(
        errors,
        "responder.connect_timeout_secs",
        config.connect_timeout_secs,
        1,
        60,
    );

    if config.kind == ResponderKind::Http
        && !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://"))
    {
        errors.push(format!(
            "responder.endpoint '{}' must be an http(s) URL",
            config.endpoint
        ));
    }
}
