//=========================================================================
// Window Service
//=========================================================================
//
// Registry and navigation for every window in the loaded scenes.
//
// Lifecycle:
//   Uninitialized ──initialize()──> Initialized ──deinitialize()──> Deinitialized
//
// Frame flow (tick):
//   1. Drain scene events     (bounded, via SceneEventCollector)
//   2. Advance animations     (completions dispatched by each window)
//   3. Drain navigation queue (requests from windows and listeners)
//
// Navigation mutates the history stack synchronously at call time; only
// the visual transition is deferred to later ticks. Requests raised while
// an operation runs are queued on the Navigator channel and applied, in
// FIFO order, once that operation settles.
//
// No public operation panics or returns an error. Faults are logged and
// absorbed here so one misbehaving window never takes the UI down.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{self, TypeId};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crossbeam_channel::{unbounded, Receiver};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::history::NavigationHistory;
use super::window_index::WindowIndex;
use crate::config::{ConfigProvider, UiConfig};
use crate::core::host::{
    CollectStatus, LoadMode, RootSurfaceFactory, SceneEvent, SceneEventCollector, SceneHost, SceneKey,
};
use crate::core::surface::RootSurface;
use crate::core::window::{NavRequest, Navigator, Window, WindowKey, WindowKind, WindowTarget, WindowView};
use crate::error::UiError;

//=== Constants ===========================================================

/// Name given to the root surface every window is parented under.
pub const ROOT_SURFACE_NAME: &str = "[UI]";

/// Upper bound of requests queued while a drain is running.
///
/// Requests already waiting when the drain starts are always applied.
/// A listener that keeps re-requesting navigation would otherwise never
/// let the drain finish.
const MAX_CHAINED_REQUESTS: usize = 64;

//=== ServiceState ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Uninitialized,
    Initialized,
    Deinitialized,
}

//=== SceneFeed ===========================================================

struct SceneFeed<S: SceneKey> {
    subscription_id: u64,
    collector: SceneEventCollector<S>,
}

//=== WindowService =======================================================

/// Owns registered windows and the navigation history.
///
/// Constructed through [`UiBuilder`](crate::UiBuilder).
pub struct WindowService<S: SceneKey> {
    state: ServiceState,

    // Collaborators
    config_provider: Box<dyn ConfigProvider>,
    config_key: String,
    root_factory: Option<Box<dyn RootSurfaceFactory>>,
    scene_host: Option<Box<dyn SceneHost<S>>>,
    event_capacity: usize,

    // Live state
    config: Option<UiConfig>,
    root: Option<Box<dyn RootSurface>>,
    feed: Option<SceneFeed<S>>,
    windows: WindowIndex<S>,
    history: NavigationHistory,

    // Navigation queue
    navigator: Navigator,
    requests: Receiver<NavRequest>,

    initialized_listeners: Vec<Box<dyn FnMut()>>,
}

impl<S: SceneKey> WindowService<S> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config_provider: Box<dyn ConfigProvider>,
        config_key: String,
        root_factory: Option<Box<dyn RootSurfaceFactory>>,
        scene_host: Option<Box<dyn SceneHost<S>>>,
        event_capacity: usize,
    ) -> Self {
        let (sender, requests) = unbounded();

        Self {
            state: ServiceState::Uninitialized,
            config_provider,
            config_key,
            root_factory,
            scene_host,
            event_capacity,
            config: None,
            root: None,
            feed: None,
            windows: WindowIndex::new(),
            history: NavigationHistory::new(),
            navigator: Navigator::new(sender),
            requests,
            initialized_listeners: Vec::new(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Brings the UI up.
    ///
    /// Missing configuration leaves the service disabled (logged, not an
    /// error). A missing root surface aborts initialization. On success
    /// every already-loaded scene is scanned and `on_initialized`
    /// listeners fire.
    pub fn initialize(&mut self) {
        if self.state == ServiceState::Initialized {
            debug!("Window service already initialized");
            return;
        }

        match self.try_initialize() {
            Ok(()) => {
                for listener in &mut self.initialized_listeners {
                    listener();
                }
            }
            Err(e @ UiError::ConfigMissing { .. }) => info!("UI disabled: {}", e),
            Err(e) => error!("UI initialization aborted: {}", e),
        }
    }

    fn try_initialize(&mut self) -> Result<(), UiError> {
        let config = self
            .config_provider
            .load_config(&self.config_key)
            .ok_or_else(|| UiError::ConfigMissing {
                key: self.config_key.clone(),
            })?;

        let mut root = self
            .root_factory
            .as_mut()
            .and_then(|factory| factory.create_root_surface(ROOT_SURFACE_NAME))
            .ok_or(UiError::RootSurfaceUnavailable)?;
        root.configure(&config.canvas);

        self.config = Some(config);
        self.root = Some(root);
        self.state = ServiceState::Initialized;

        let mut loaded = Vec::new();
        if let Some(host) = self.scene_host.as_mut() {
            let subscription = host.subscribe();
            self.feed = Some(SceneFeed {
                subscription_id: subscription.id(),
                collector: SceneEventCollector::with_capacity(subscription.into_receiver(), self.event_capacity),
            });
            loaded = host.loaded_scenes();
        } else {
            debug!("No scene host attached, windows must be registered manually");
        }

        info!(
            "Window service initialized ({:?}, {} loaded scenes)",
            config.canvas.render_mode,
            loaded.len()
        );

        for scene in loaded {
            self.scan_scene(scene);
        }
        self.drain_requests();

        Ok(())
    }

    /// Tears the UI down: unsubscribes, destroys every window, clears
    /// all indexes and the history, and destroys the root surface.
    pub fn deinitialize(&mut self) {
        if self.state != ServiceState::Initialized {
            return;
        }

        if let Some(feed) = self.feed.take() {
            if let Some(host) = self.scene_host.as_mut() {
                host.unsubscribe(feed.subscription_id);
            }
        }

        let windows = self.windows.drain();
        let count = windows.len();
        for mut window in windows {
            window.destroy();
        }
        self.history.clear();

        if let Some(mut root) = self.root.take() {
            root.destroy();
        }

        let dropped = self.requests.try_iter().count();
        if dropped > 0 {
            debug!("Discarded {} pending navigation requests", dropped);
        }

        self.config = None;
        self.state = ServiceState::Deinitialized;
        info!("Window service deinitialized, {} windows destroyed", count);
    }

    /// Registers a callback fired each time initialization succeeds.
    pub fn on_initialized<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.initialized_listeners.push(Box::new(listener));
    }

    //--- Registration -----------------------------------------------------

    /// Takes ownership of `window` as part of `scene`.
    ///
    /// Returns `None` when the window was rejected (duplicate id, failed
    /// setup, or service not initialized). Rejected windows are destroyed.
    pub fn register_window(&mut self, window: Window, scene: S) -> Option<WindowKey> {
        let key = self.register_internal(window, scene);
        self.drain_requests();
        key
    }

    fn register_internal(&mut self, mut window: Window, scene: S) -> Option<WindowKey> {
        if self.state != ServiceState::Initialized {
            warn!("Cannot register window {}: {}", window.type_name(), UiError::NotInitialized);
            window.destroy();
            return None;
        }

        if self.windows.has_duplicate(window.type_id(), window.id()) {
            let duplicate = UiError::DuplicateWindow {
                type_name: window.type_name(),
                id: window.id().to_string(),
            };
            warn!("{}, skipping duplicate from scene {:?}", duplicate, scene);
            window.destroy();
            return None;
        }

        if let Some(config) = self.config {
            window.inherit_backend(config.animation_backend);
        }
        if let Some(root) = self.root.as_deref() {
            window.reparent(root);
        }

        let key = self.windows.insert(window, scene);
        match self.ready_registered(key) {
            Ok(()) => Some(key),
            Err(e) => {
                error!("Error registering window from scene {:?}: {}", scene, e);
                if let Some(mut rejected) = self.windows.remove(key) {
                    rejected.destroy();
                }
                None
            }
        }
    }

    fn ready_registered(&mut self, key: WindowKey) -> Result<(), UiError> {
        let navigator = self.navigator.clone();
        let window = self
            .windows
            .get_mut(key)
            .ok_or_else(|| UiError::WindowNotFound(format!("{:?}", key)))?;

        window.bind(key, navigator);
        if window.is_ready() {
            return Ok(());
        }

        let type_name = window.type_name();
        panic::catch_unwind(AssertUnwindSafe(|| window.ready_window()))
            .unwrap_or(Err(UiError::RegistrationPanicked { type_name }))
    }

    fn unregister(&mut self, key: WindowKey) -> Option<Window> {
        self.history.remove(key);
        self.windows.remove(key)
    }

    //--- Lookup -----------------------------------------------------------

    /// First window whose view is `T`, optionally matching `id`.
    pub fn get_window<T: WindowView>(&self, id: Option<&str>) -> Option<&Window> {
        self.window_key::<T>(id).and_then(|key| self.windows.get(key))
    }

    pub fn get_window_mut<T: WindowView>(&mut self, id: Option<&str>) -> Option<&mut Window> {
        let key = self.window_key::<T>(id)?;
        self.windows.get_mut(key)
    }

    /// Key of the first window whose view is `T`, optionally matching `id`.
    pub fn window_key<T: WindowView>(&self, id: Option<&str>) -> Option<WindowKey> {
        self.windows.find_by_type(TypeId::of::<T>(), id)
    }

    /// First window with `id`, whatever its type.
    pub fn find_window(&self, id: &str) -> Option<&Window> {
        self.windows.find_by_id(id).and_then(|key| self.windows.get(key))
    }

    pub fn window(&self, key: WindowKey) -> Option<&Window> {
        self.windows.get(key)
    }

    /// Mutable access to a window.
    ///
    /// `show()`/`hide()` called through this reference are queued and
    /// applied by the next service call or tick.
    pub fn window_mut(&mut self, key: WindowKey) -> Option<&mut Window> {
        self.windows.get_mut(key)
    }

    pub fn view<T: WindowView>(&self, key: WindowKey) -> Option<&T> {
        self.windows.get(key).and_then(|window| window.view::<T>())
    }

    pub fn view_mut<T: WindowView>(&mut self, key: WindowKey) -> Option<&mut T> {
        self.windows.get_mut(key).and_then(|window| window.view_mut::<T>())
    }

    //--- Navigation -------------------------------------------------------

    /// Pushes `target` onto the history and shows it.
    ///
    /// The previous top is hidden instantly. Re-showing a window already
    /// in the history moves it to the top.
    pub fn show_window(&mut self, target: impl Into<WindowTarget>, instant: bool) {
        let target = target.into();
        self.apply_show(&target, instant);
        self.drain_requests();
    }

    /// Removes `target` from the history and hides it; the new top, if
    /// any, is shown instantly.
    pub fn hide_window(&mut self, target: impl Into<WindowTarget>, instant: bool) {
        let target = target.into();
        self.apply_hide(&target, instant);
        self.drain_requests();
    }

    /// Pops and hides the history top; the new top, if any, is shown
    /// instantly. No-op on an empty history.
    pub fn request_back(&mut self, instant: bool) {
        self.apply_back(instant);
        self.drain_requests();
    }

    /// Looks up a window by view type and shows it the way the window
    /// itself would: through the history for Standard windows, directly
    /// for the rest.
    pub fn show<T: WindowView>(&mut self, id: Option<&str>) {
        match self.get_window_mut::<T>(id) {
            Some(window) => window.show(),
            None => warn!("No window of type {} matches {:?}", any::type_name::<T>(), id),
        }
        self.drain_requests();
    }

    /// Counterpart of [`show`](Self::show).
    pub fn hide<T: WindowView>(&mut self, id: Option<&str>) {
        match self.get_window_mut::<T>(id) {
            Some(window) => window.hide(),
            None => warn!("No window of type {} matches {:?}", any::type_name::<T>(), id),
        }
        self.drain_requests();
    }

    /// A cloneable handle for queueing navigation from listeners.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    fn apply_show(&mut self, target: &WindowTarget, instant: bool) {
        let Some(key) = self.resolve_stacked(target, "show") else {
            return;
        };

        self.history.remove(key);
        if let Some(previous) = self.history.top() {
            if let Some(window) = self.windows.get_mut(previous) {
                window.hide_instant_internal();
            }
        }
        self.history.push(key);
        debug!("Showing {} (history depth {})", target, self.history.len());

        if let Some(window) = self.windows.get_mut(key) {
            if instant {
                window.show_instant_internal();
            } else {
                window.show_internal();
            }
        }
    }

    fn apply_hide(&mut self, target: &WindowTarget, instant: bool) {
        let Some(key) = self.resolve_stacked(target, "hide") else {
            return;
        };

        self.history.remove(key);
        debug!("Hiding {} (history depth {})", target, self.history.len());
        self.hide_key(key, instant);
        self.reveal_top();
    }

    fn apply_back(&mut self, instant: bool) {
        let Some(key) = self.history.pop() else {
            debug!("Back requested with empty history");
            return;
        };

        debug!("Back from {:?} (history depth {})", key, self.history.len());
        self.hide_key(key, instant);
        self.reveal_top();
    }

    fn hide_key(&mut self, key: WindowKey, instant: bool) {
        if let Some(window) = self.windows.get_mut(key) {
            if instant {
                window.hide_instant_internal();
            } else {
                window.hide_internal();
            }
        }
    }

    fn reveal_top(&mut self) {
        if let Some(top) = self.history.top() {
            if let Some(window) = self.windows.get_mut(top) {
                window.show_instant_internal();
            }
        }
    }

    /// Resolves `target` to a registered Standard window.
    fn resolve_stacked(&self, target: &WindowTarget, action: &str) -> Option<WindowKey> {
        let key = match target {
            // Keys of rolled-back or unloaded windows can still be queued.
            WindowTarget::Key(key) if !self.windows.contains(*key) => {
                debug!("Ignoring {} of {}: window no longer registered", action, target);
                return None;
            }
            WindowTarget::Key(key) => Some(*key),
            WindowTarget::Id(id) => self.windows.find_by_id(id),
        };

        let Some(key) = key else {
            warn!("Cannot {} {}: {}", action, target, UiError::WindowNotFound(target.to_string()));
            return None;
        };

        match self.windows.get(key).map(Window::kind) {
            Some(WindowKind::Standard) => Some(key),
            _ => {
                debug!("Ignoring {} of {}: not a history window", action, target);
                None
            }
        }
    }

    /// Applies queued requests in FIFO order.
    fn drain_requests(&mut self) {
        let pending = self.requests.len();
        let mut applied = 0;

        while let Ok(request) = self.requests.try_recv() {
            if applied == pending + MAX_CHAINED_REQUESTS {
                let dropped = 1 + self.requests.try_iter().count();
                warn!(
                    "Navigation requests keep re-queueing, dropped {} after {} applied",
                    dropped, applied
                );
                return;
            }
            applied += 1;

            match request {
                NavRequest::Show { target, instant } => self.apply_show(&target, instant),
                NavRequest::Hide { target, instant } => self.apply_hide(&target, instant),
                NavRequest::Back { instant } => self.apply_back(instant),
            }
        }
    }

    //--- Scene Integration ------------------------------------------------

    /// Advances the UI by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.process_scene_events();

        for (_, window) in self.windows.iter_mut() {
            window.tick(dt);
        }

        self.drain_requests();
    }

    /// Applies pending scene events and navigation requests without
    /// advancing animations.
    pub fn pump(&mut self) {
        self.process_scene_events();
        self.drain_requests();
    }

    fn process_scene_events(&mut self) {
        let Some(feed) = self.feed.as_mut() else {
            return;
        };

        let status = feed.collector.collect_frame();
        let events = feed.collector.take_events();

        if status == CollectStatus::Disconnected {
            warn!("Scene notifier disconnected, scene tracking stopped");
            self.feed = None;
        }

        for event in events {
            match event {
                SceneEvent::Loaded { scene, mode } => self.on_scene_loaded(scene, mode),
                SceneEvent::Unloaded(scene) => self.on_scene_unloaded(scene),
            }
        }
    }

    fn on_scene_loaded(&mut self, scene: S, mode: LoadMode) {
        if mode == LoadMode::Single && !self.history.is_empty() {
            debug!("Single load of {:?}, clearing {} history entries", scene, self.history.len());
            self.history.clear();
        }
        self.scan_scene(scene);
    }

    fn on_scene_unloaded(&mut self, scene: S) {
        let keys = self.windows.scene_windows(scene).to_vec();
        for &key in &keys {
            if let Some(mut window) = self.unregister(key) {
                window.destroy();
            }
        }

        if !keys.is_empty() {
            info!("Scene {:?} unloaded, {} windows destroyed", scene, keys.len());
        }
    }

    fn scan_scene(&mut self, scene: S) {
        let Some(host) = self.scene_host.as_mut() else {
            return;
        };

        let found = host.find_windows(scene);
        let total = found.len();
        let registered = found
            .into_iter()
            .filter_map(|window| self.register_internal(window, scene))
            .count();

        info!("Scanned scene {:?}: {} of {} windows registered", scene, registered, total);
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == ServiceState::Initialized
    }

    /// Configuration loaded by the last successful initialization.
    pub fn config(&self) -> Option<&UiConfig> {
        self.config.as_ref()
    }

    pub fn root_surface(&self) -> Option<&dyn RootSurface> {
        self.root.as_deref()
    }

    /// History entries, bottom to top.
    pub fn history(&self) -> &[WindowKey] {
        self.history.as_slice()
    }

    pub fn top(&self) -> Option<WindowKey> {
        self.history.top()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Keys of the windows `scene` contributed, in registration order.
    pub fn scene_windows(&self, scene: S) -> &[WindowKey] {
        self.windows.scene_windows(scene)
    }
}

impl<S: SceneKey> fmt::Debug for WindowService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowService")
            .field("state", &self.state)
            .field("config_key", &self.config_key)
            .field("windows", &self.windows.len())
            .field("history", &self.history.as_slice())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
