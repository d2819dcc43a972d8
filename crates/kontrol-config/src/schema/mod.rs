//! Configuration schema types for the KONTROL widget.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assistant;
mod responder;
mod system;

pub use assistant::*;
pub use responder::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct KontrolConfig {
    pub assistant: AssistantConfig,
    pub responder: ResponderConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
