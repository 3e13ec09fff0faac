//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_ui::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Service and construction
pub use crate::core::registry::{ServiceState, WindowService};
pub use crate::ui::UiBuilder;

// Configuration and errors
pub use crate::config::{ConfigProvider, StaticConfigProvider, TomlConfigProvider, UiConfig};
pub use crate::error::UiError;

// Windows
pub use crate::core::window::{
    LifecycleEvent, Navigator, Window, WindowKey, WindowKind, WindowSettings, WindowState, WindowView,
};

// Animation
pub use crate::core::animation::{AnimationBackend, WindowVisuals};
pub use crate::core::easing::Easing;

// Host contracts
pub use crate::core::host::{LoadMode, RootSurfaceFactory, SceneEventHub, SceneKey};
pub use crate::core::surface::{Color, FadeSurface, RootSurface, Scalable, Surface};
