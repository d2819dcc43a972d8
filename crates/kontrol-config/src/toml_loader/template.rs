//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# KONTROL Assistant Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[assistant]
# default_open = false
# section = "dashboard"      # dashboard, fiscal, wallets, exchanges
# suggested_questions = []   # empty: use the section's suggestions
# fallback_text = "Lo siento, no he podido procesar tu consulta. Inténtalo de nuevo en unos momentos."
# max_input_len = 4096       # 1-16384
# position = "bottom_right"  # bottom_right, bottom_left

[responder]
# kind = "canned"            # canned, http
# endpoint = "http://localhost:8000/api/v1/assistant/query"
# timeout_secs = 30          # 1-300
# connect_timeout_secs = 10  # 1-60

[theme]
name = "dark"                # dark, light

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
