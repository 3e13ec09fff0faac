//=========================================================================
// UI Configuration
//=========================================================================
//
// Authored settings for the window subsystem and the providers that
// fetch them.
//
// Architecture:
//   ConfigProvider ──load_config(key)──> Option<UiConfig>
//        │
//        ├─ StaticConfigProvider   (in-memory value, tests and embedding)
//        └─ TomlConfigProvider     (TOML text by key, or <dir>/<key>.toml)
//
// An absent configuration disables the subsystem; it is never fatal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::{debug, error};
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::animation::AnimationBackend;
use crate::error::UiError;

//=== Constants ===========================================================

/// Key the service loads its configuration under by default.
pub const UI_CONFIG_KEY: &str = "UIConfig";

//=== RenderMode ==========================================================

/// How the root surface is composited by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Drawn on top of everything in screen space.
    #[default]
    ScreenSpaceOverlay,

    /// Drawn in screen space at a camera's plane.
    ScreenSpaceCamera,

    /// Placed in the world like any other object.
    WorldSpace,
}

//=== CanvasSettings ======================================================

/// Settings applied to the root surface at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub render_mode: RenderMode,

    /// Higher values draw above lower ones.
    pub sorting_order: i32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::ScreenSpaceOverlay,
            sorting_order: 10,
        }
    }
}

//=== UiConfig ============================================================

/// Top-level configuration of the window subsystem.
///
/// Every field has a default, so an empty document is valid:
///
/// ```
/// use aetheric_ui::config::UiConfig;
///
/// let config: UiConfig = toml::from_str("").unwrap();
/// assert_eq!(config.canvas.sorting_order, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub canvas: CanvasSettings,

    /// Backend used by windows that do not pin their own.
    pub animation_backend: AnimationBackend,
}

impl UiConfig {
    /// Parses a TOML document.
    pub fn from_toml(key: &str, text: &str) -> Result<Self, UiError> {
        toml::from_str(text).map_err(|e| UiError::ConfigParse {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

//=== ConfigProvider ======================================================

/// Source of previously authored configuration.
pub trait ConfigProvider {
    /// Returns the configuration stored under `key`, or `None` if absent.
    fn load_config(&self, key: &str) -> Option<UiConfig>;
}

//=== StaticConfigProvider ================================================

/// Provider returning a fixed value for every key.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: Option<UiConfig>,
}

impl StaticConfigProvider {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    /// Provider that never has a configuration.
    pub fn empty() -> Self {
        Self { config: None }
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn load_config(&self, _key: &str) -> Option<UiConfig> {
        self.config
    }
}

//=== TomlConfigProvider ==================================================

/// Provider parsing TOML documents, keyed by configuration key.
///
/// In-memory sources take precedence over files in the directory.
/// Unreadable or malformed documents are logged and treated as absent.
#[derive(Debug, Clone, Default)]
pub struct TomlConfigProvider {
    sources: HashMap<String, String>,
    dir: Option<PathBuf>,
}

impl TomlConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `<dir>/<key>.toml` for keys with no in-memory source.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            sources: HashMap::new(),
            dir: Some(dir.into()),
        }
    }

    /// Registers an in-memory document for `key`.
    pub fn with_source(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(key.into(), text.into());
        self
    }

    fn read_source(&self, key: &str) -> Option<String> {
        if let Some(text) = self.sources.get(key) {
            return Some(text.clone());
        }

        let path = self.dir.as_ref()?.join(format!("{}.toml", key));
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("No configuration at {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl ConfigProvider for TomlConfigProvider {
    fn load_config(&self, key: &str) -> Option<UiConfig> {
        let text = self.read_source(key)?;

        match UiConfig::from_toml(key, &text) {
            Ok(config) => Some(config),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
