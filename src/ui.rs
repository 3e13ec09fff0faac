//=========================================================================
// UI Builder
//
// Fluent construction of a WindowService.
//
// Architecture:
// ```text
//     UiBuilder  ──build()──>  WindowService  ──initialize()──>  [Initialized]
//         │                          │
//         ├─ with_config_provider()  ├─ tick(dt) once per frame
//         ├─ with_root_factory()     └─ show_window / hide_window / request_back
//         └─ with_scene_host()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use log::info;

//=== Internal Dependencies ===============================================

use crate::config::{ConfigProvider, StaticConfigProvider, UiConfig, UI_CONFIG_KEY};
use crate::core::host::{RootSurfaceFactory, SceneEventCollector, SceneHost, SceneKey};
use crate::core::registry::WindowService;

//=== UiBuilder ===========================================================

/// Builder for configuring and constructing a [`WindowService`].
///
/// # Default Values
///
/// - **Config provider**: in-memory [`UiConfig::default`]
/// - **Config key**: `"UIConfig"`
/// - **Root factory**: none (initialization fails until one is set)
/// - **Scene host**: none (windows are registered manually)
/// - **Event capacity**: 100 scene events per frame
///
/// # Examples
///
/// ```
/// use aetheric_ui::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Title }
/// impl SceneKey for GameScene {}
///
/// let mut ui = UiBuilder::<GameScene>::new()
///     .with_config_provider(StaticConfigProvider::empty())
///     .build();
///
/// // No configuration: the UI stays disabled without failing.
/// ui.initialize();
/// assert!(!ui.is_initialized());
/// ```
pub struct UiBuilder<S: SceneKey> {
    config_provider: Box<dyn ConfigProvider>,
    config_key: String,
    root_factory: Option<Box<dyn RootSurfaceFactory>>,
    scene_host: Option<Box<dyn SceneHost<S>>>,
    event_capacity: usize,
    _phantom: PhantomData<S>,
}

impl<S: SceneKey> UiBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config_provider: Box::new(StaticConfigProvider::new(UiConfig::default())),
            config_key: UI_CONFIG_KEY.to_string(),
            root_factory: None,
            scene_host: None,
            event_capacity: SceneEventCollector::<S>::MAX_EVENTS_PER_FRAME,
            _phantom: PhantomData,
        }
    }

    /// Sets where the UI configuration is loaded from.
    pub fn with_config_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.config_provider = Box::new(provider);
        self
    }

    /// Sets the key the configuration is looked up under.
    ///
    /// Default: `"UIConfig"`
    pub fn with_config_key(mut self, key: impl Into<String>) -> Self {
        self.config_key = key.into();
        self
    }

    /// Sets the factory for the root surface all windows are parented under.
    pub fn with_root_factory(mut self, factory: impl RootSurfaceFactory + 'static) -> Self {
        self.root_factory = Some(Box::new(factory));
        self
    }

    /// Attaches the host providing scene notifications and scanning.
    pub fn with_scene_host(mut self, host: impl SceneHost<S> + 'static) -> Self {
        self.scene_host = Some(Box::new(host));
        self
    }

    /// Sets how many scene events are applied per frame at most.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        self.event_capacity = capacity;
        self
    }

    /// Builds the service. Call [`WindowService::initialize`] to bring it up.
    pub fn build(self) -> WindowService<S> {
        info!(
            "Building window service (config key: '{}', event capacity: {})",
            self.config_key, self.event_capacity
        );

        WindowService::new(
            self.config_provider,
            self.config_key,
            self.root_factory,
            self.scene_host,
            self.event_capacity,
        )
    }
}

impl<S: SceneKey> Default for UiBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
