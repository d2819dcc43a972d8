mod cli;
mod host;
mod render;

use std::path::PathBuf;

use kontrol_assistant::{responders, AssistantController};
use kontrol_config::schema::KontrolConfig;
use kontrol_config::{toml_loader, TomlPreferenceStore};
use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Config path in use: the `--config` override or the platform default.
fn config_path(args: &cli::Args) -> Option<PathBuf> {
    match args.config {
        Some(ref path) => Some(PathBuf::from(path)),
        None => toml_loader::default_config_path().ok(),
    }
}

fn read_config(args: &cli::Args) -> Result<KontrolConfig, kontrol_common::ConfigError> {
    match args.config {
        Some(ref path) => kontrol_config::load_config_from(&PathBuf::from(path)),
        None => kontrol_config::load_config(),
    }
}

/// Apply command-line overrides on top of the file config.
fn apply_overrides(config: &mut KontrolConfig, args: &cli::Args) {
    if let Some(section) = args.section {
        config.assistant.section = section.into();
    }
    if args.open {
        config.assistant.default_open = true;
    }
    if let Some(kind) = args.responder {
        config.responder.kind = kind.into();
    }
    if let Some(ref endpoint) = args.endpoint {
        config.responder.endpoint = endpoint.clone();
    }
}

fn main() {
    load_dotenv();

    let args = cli::parse();

    // Read before logging so the file's level can seed the filter
    let loaded = read_config(&args);

    let log_directive = match (args.log_level.as_deref(), loaded.as_ref()) {
        (Some(level), _) => format!("kontrol={level}"),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => "kontrol=info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "kontrol=info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::info!("KONTROL assistant v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        KontrolConfig::default()
    });
    apply_overrides(&mut config, &args);
    tracing::info!(
        section = %config.assistant.section,
        responder = ?config.responder.kind,
        "Config loaded"
    );

    let responder = match responders::from_config(&config.responder, config.assistant.section) {
        Ok(responder) => responder,
        Err(e) => {
            tracing::error!("Failed to create responder: {e}");
            std::process::exit(1);
        }
    };

    let mut builder = AssistantController::builder(config.assistant.clone(), responder);
    if let Some(path) = config_path(&args) {
        builder = builder.preferences(TomlPreferenceStore::new(path));
    }
    let controller = match builder.mount() {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Invalid assistant config: {e}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(host::run(controller)) {
        tracing::error!("Input loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
