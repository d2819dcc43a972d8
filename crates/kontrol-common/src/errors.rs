use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("preference store error: {0}")]
    PreferenceError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum KontrolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("responder error: {0}")]
    Responder(String),

    #[error("{0}")]
    Other(String),
}
