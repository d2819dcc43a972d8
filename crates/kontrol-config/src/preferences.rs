//! Persisted user preferences.
//!
//! The widget reads the theme once when it mounts and writes it back on
//! every change. Stores are injected so hosts and tests choose the backing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kontrol_common::{ConfigError, Theme};
use tracing::debug;

use crate::schema::KontrolConfig;
use crate::toml_loader::load_from_path;
use crate::toml_writer::write_atomically;

/// Backing store for the theme preference.
pub trait PreferenceStore: Send {
    /// `Ok(None)` when nothing has been stored yet.
    fn load_theme(&self) -> Result<Option<Theme>, ConfigError>;

    fn save_theme(&mut self, theme: Theme) -> Result<(), ConfigError>;
}

/// Keeps the theme in the `[theme]` section of a config file.
///
/// Writes touch only the `name` line of `[theme]`; every other line of the
/// file, comments included, is kept as is.
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let config = load_from_path(&self.path)?;
        Ok(Some(config.theme.name))
    }

    fn save_theme(&mut self, theme: Theme) -> Result<(), ConfigError> {
        let contents = if self.path.exists() {
            std::fs::read_to_string(&self.path).map_err(|e| {
                ConfigError::PreferenceError(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                ))
            })?
        } else {
            String::new()
        };

        let updated = set_theme_name(&contents, theme);
        // Never write a file the loader would reject
        toml::from_str::<KontrolConfig>(&updated)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", self.path.display())))?;

        write_atomically(&self.path, &updated)
            .map_err(|e| ConfigError::PreferenceError(e.to_string()))?;
        debug!(%theme, path = %self.path.display(), "theme preference saved");
        Ok(())
    }
}

/// Set `name` in the `[theme]` table of a TOML document, appending the
/// table when the document has none.
fn set_theme_name(contents: &str, theme: Theme) -> String {
    let entry = format!("name = \"{theme}\"");
    let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();

    let Some(header) = lines.iter().position(|l| is_table_header(l, "theme")) else {
        let mut out = contents.to_string();
        if !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
        }
        out.push_str(&format!("[theme]\n{entry}\n"));
        return out;
    };

    let end = lines[header + 1..]
        .iter()
        .position(|l| l.trim_start().starts_with('['))
        .map_or(lines.len(), |i| header + 1 + i);

    match (header + 1..end).find(|&i| is_key(&lines[i], "name")) {
        Some(i) => {
            let line = &lines[i];
            let indent = &line[..line.len() - line.trim_start().len()];
            let rewritten = match line.find('#') {
                Some(at) => format!("{indent}{entry}  {}", &line[at..]),
                None => format!("{indent}{entry}"),
            };
            lines[i] = rewritten;
        }
        None => lines.insert(header + 1, entry),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn is_table_header(line: &str, name: &str) -> bool {
    let line = line.split('#').next().unwrap_or_default().trim();
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        == Some(name)
}

fn is_key(line: &str, key: &str) -> bool {
    line.trim_start()
        .strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after moving the store into a widget.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    theme: Arc<Mutex<Option<Theme>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Arc::new(Mutex::new(Some(theme))),
        }
    }

    /// Theme most recently stored, if any.
    pub fn stored(&self) -> Option<Theme> {
        self.theme.lock().ok().and_then(|slot| *slot)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_theme(&self) -> Result<Option<Theme>, ConfigError> {
        self.theme
            .lock()
            .map(|slot| *slot)
            .map_err(|e| ConfigError::PreferenceError(e.to_string()))
    }

    fn save_theme(&mut self, theme: Theme) -> Result<(), ConfigError> {
        let mut slot = self
            .theme
            .lock()
            .map_err(|e| ConfigError::PreferenceError(e.to_string()))?;
        *slot = Some(theme);
        Ok(())
    }
}
