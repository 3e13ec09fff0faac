//=========================================================================
// Host Interface
//=========================================================================
//
// Contracts between the window core and the host environment.
//
// The host owns scenes and the retained visual tree. The core consumes
// them only through these traits, so hosts can be swapped (or mocked in
// tests) without touching registry or window logic.
//
// Components:
// - `SceneKey`:            identifies a loaded scene
// - `SceneEvent`:          load/unload notifications
// - `SceneNotifier`:       subscription to scene notifications
// - `SceneScanner`:        enumerates scenes and their windows
// - `RootSurfaceFactory`:  creates the common parent of all windows
// - `scene_events`:        channel-backed notifier and core-side collector
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_events;

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::surface::RootSurface;
use crate::core::window::Window;

//=== Public API ==========================================================

pub use scene_events::{CollectStatus, SceneEventCollector, SceneEventHub, SceneSubscription};

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically a host handle or a game-specific enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== LoadMode ============================================================

/// How a scene was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// Replaces every previously loaded scene.
    Single,

    /// Loaded alongside the scenes already present.
    Additive,
}

//=== SceneEvent ==========================================================

/// Scene lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent<S: SceneKey> {
    Loaded { scene: S, mode: LoadMode },
    Unloaded(S),
}

//=== SceneNotifier =======================================================

/// Source of scene lifecycle notifications.
pub trait SceneNotifier<S: SceneKey> {
    /// Opens a new subscription.
    fn subscribe(&mut self) -> SceneSubscription<S>;

    /// Closes the subscription with the given id.
    fn unsubscribe(&mut self, id: u64);
}

//=== SceneScanner ========================================================

/// Enumerates scenes and the windows they contain.
pub trait SceneScanner<S: SceneKey> {
    /// Scenes currently loaded, in load order.
    fn loaded_scenes(&self) -> Vec<S>;

    /// Hands over every window found in `scene`, including inactive ones.
    fn find_windows(&mut self, scene: S) -> Vec<Window>;
}

//=== SceneHost ===========================================================

/// A host providing both scene notifications and scanning.
pub trait SceneHost<S: SceneKey>: SceneNotifier<S> + SceneScanner<S> {}

impl<S: SceneKey, T: SceneNotifier<S> + SceneScanner<S>> SceneHost<S> for T {}

//=== RootSurfaceFactory ==================================================

/// Creates the empty container windows are reparented under.
pub trait RootSurfaceFactory {
    /// Returns `None` if the host cannot provide a surface.
    fn create_root_surface(&mut self, name: &str) -> Option<Box<dyn RootSurface>>;
}
