//=========================================================================
// Window
//=========================================================================
//
// A single presentable unit with a show/hide state machine.
//
// States:
//   Readiness:   Unready ──ready_window()──> Initializing ──> Ready
//   Visibility:  Hidden ⇄ Showing ⇄ Shown ⇄ Hiding ⇄ Hidden
//
// Routing:
//   show()/hide()           Standard → queued on the bound Navigator
//                           Overlay  → applied to self immediately
//   *_internal()            what the service calls once ordering is decided
//
// The animated part of a transition is delegated to the window's
// AnimationDriver; the window dispatches the returned Completion from
// `tick()`.
//
//=========================================================================

//=== Module Declarations =================================================

mod events;
mod navigator;
mod settings;

//=== External Dependencies ===============================================

use std::any::{self, Any, TypeId};
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::animation::{AnimationBackend, AnimationDriver, Completion, TransitionParams, WindowVisuals};
use crate::core::surface::{Color, RootSurface};
use crate::error::UiError;

//=== Public API ==========================================================

pub use events::{LifecycleEmitter, LifecycleEvent, SubscriptionId};
pub use navigator::{NavRequest, Navigator, WindowKey, WindowTarget};
pub use settings::{WindowSettings, DEFAULT_ANIMATION_DURATION};

//=== WindowView ==========================================================

/// Application behavior attached to a window.
///
/// The concrete view type is the window's runtime type: the service
/// indexes windows by it and `get_window::<T>()` looks it up.
///
/// ```
/// use aetheric_ui::prelude::*;
///
/// struct PauseMenu {
///     score: u32,
/// }
///
/// impl WindowView for PauseMenu {
///     fn update_data(&mut self) {
///         // refresh labels from game state
///     }
/// }
/// ```
pub trait WindowView: Any {
    /// One-time setup, run once when the window becomes ready.
    fn initialize(&mut self) -> Result<(), UiError> {
        Ok(())
    }

    /// Refreshes contents. Runs once per show, before any animation.
    fn update_data(&mut self);
}

/// Object-safe view wrapper with downcasting.
trait AnyView {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn initialize(&mut self) -> Result<(), UiError>;
    fn update_data(&mut self);
}

impl<V: WindowView> AnyView for V {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn initialize(&mut self) -> Result<(), UiError> {
        WindowView::initialize(self)
    }

    fn update_data(&mut self) {
        WindowView::update_data(self)
    }
}

//=== WindowKind ==========================================================

/// How a window's visibility is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    /// Routed through the service's navigation history.
    #[default]
    Standard,

    /// Self-managed; bypasses the history stack.
    Overlay,
}

//=== Readiness / WindowState =============================================

/// One-way readiness of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Unready,
    Initializing,
    Ready,
}

/// Visibility of a ready window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Hidden,
    Showing,
    Shown,
    Hiding,
}

//=== WindowBinding =======================================================

/// Registration data assigned by the service.
#[derive(Debug, Clone)]
struct WindowBinding {
    key: WindowKey,
    navigator: Navigator,
}

//=== Window ==============================================================

/// A presentable unit owned by the window service.
///
/// # Examples
///
/// ```ignore
/// let window = Window::new(PauseMenu::default(), WindowVisuals::new(surface))
///     .with_id("pause")
///     .with_settings(WindowSettings::new().animated(true).start_hidden(true));
/// ```
pub struct Window {
    id: String,
    kind: WindowKind,
    settings: WindowSettings,
    visuals: WindowVisuals,
    view: Box<dyn AnyView>,
    type_id: TypeId,
    type_name: &'static str,
    readiness: Readiness,
    state: WindowState,
    default_fade_color: Option<Color>,
    animator: Option<Box<dyn AnimationDriver>>,
    events: LifecycleEmitter,
    binding: Option<WindowBinding>,
    destroyed: bool,
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// Wraps `view` and its host visuals in an unready, hidden window.
    pub fn new<V: WindowView>(view: V, visuals: WindowVisuals) -> Self {
        Self {
            id: String::new(),
            kind: WindowKind::default(),
            settings: WindowSettings::default(),
            visuals,
            view: Box::new(view),
            type_id: TypeId::of::<V>(),
            type_name: short_type_name(any::type_name::<V>()),
            readiness: Readiness::Unready,
            state: WindowState::Hidden,
            default_fade_color: None,
            animator: None,
            events: LifecycleEmitter::new(),
            binding: None,
            destroyed: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_kind(mut self, kind: WindowKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_settings(mut self, settings: WindowSettings) -> Self {
        self.settings = settings;
        self
    }

    //--- Accessors --------------------------------------------------------

    /// Identifier; empty when unset.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    pub fn visuals(&self) -> &WindowVisuals {
        &self.visuals
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Shown or on its way to shown.
    pub fn is_visible(&self) -> bool {
        matches!(self.state, WindowState::Shown | WindowState::Showing)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.as_ref().map_or(false, |a| a.is_animating())
    }

    /// Fade color captured the first time an animation ran.
    pub fn default_fade_color(&self) -> Option<Color> {
        self.default_fade_color
    }

    /// Handle assigned at registration.
    pub fn key(&self) -> Option<WindowKey> {
        self.binding.as_ref().map(|b| b.key)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Lifecycle listeners of this window.
    pub fn events(&mut self) -> &mut LifecycleEmitter {
        &mut self.events
    }

    /// Downcasts the view to `T`.
    pub fn view<T: WindowView>(&self) -> Option<&T> {
        self.view.as_any().downcast_ref::<T>()
    }

    pub fn view_mut<T: WindowView>(&mut self) -> Option<&mut T> {
        self.view.as_any_mut().downcast_mut::<T>()
    }

    //--- Readiness --------------------------------------------------------

    /// Makes the window ready; only the first call has any effect.
    ///
    /// Resolves the animation driver, applies the initial visibility
    /// and runs the view's one-time setup. A setup failure returns the
    /// window to `Unready` and is reported to the caller.
    pub fn ready_window(&mut self) -> Result<(), UiError> {
        if self.readiness != Readiness::Unready {
            return Ok(());
        }
        self.readiness = Readiness::Initializing;

        let backend = self.settings.backend().unwrap_or_default();
        self.animator.get_or_insert_with(|| backend.create_driver());

        if self.settings.is_start_hidden() {
            self.hide_instant();
        } else {
            self.show_instant();
        }

        match self.view.initialize() {
            Ok(()) => {
                self.readiness = Readiness::Ready;
                debug!("Window {} '{}' ready", self.type_name, self.id);
                Ok(())
            }
            Err(e) => {
                self.readiness = Readiness::Unready;
                Err(e)
            }
        }
    }

    //--- Public Routing ---------------------------------------------------

    /// Shows the window, animated if configured.
    pub fn show(&mut self) {
        self.route_show(false);
    }

    pub fn show_instant(&mut self) {
        self.route_show(true);
    }

    /// Hides the window, animated if configured.
    pub fn hide(&mut self) {
        self.route_hide(false);
    }

    pub fn hide_instant(&mut self) {
        self.route_hide(true);
    }

    fn route_show(&mut self, instant: bool) {
        if self.kind != WindowKind::Standard {
            if instant {
                self.show_instant_internal();
            } else {
                self.show_internal();
            }
            return;
        }

        match &self.binding {
            Some(binding) => binding.navigator.show(binding.key, instant),
            None => warn!("Window {} '{}' is not registered, show ignored", self.type_name, self.id),
        }
    }

    fn route_hide(&mut self, instant: bool) {
        if self.kind != WindowKind::Standard {
            if instant {
                self.hide_instant_internal();
            } else {
                self.hide_internal();
            }
            return;
        }

        match &self.binding {
            Some(binding) => binding.navigator.hide(binding.key, instant),
            None => warn!("Window {} '{}' is not registered, hide ignored", self.type_name, self.id),
        }
    }

    //--- Internal Transitions ---------------------------------------------

    pub(crate) fn show_internal(&mut self) {
        self.events.emit(LifecycleEvent::WillShow);

        if !self.settings.is_animated() {
            self.show_instant_internal();
            return;
        }

        self.view.update_data();

        let params = self.transition_params();
        self.state = WindowState::Showing;
        let backend = self.settings.backend().unwrap_or_default();
        self.animator
            .get_or_insert_with(|| backend.create_driver())
            .animate_show(&params, &mut self.visuals, Completion::Shown);
    }

    pub(crate) fn show_instant_internal(&mut self) {
        self.cancel_animation();
        self.view.update_data();

        if let Some(content) = self.visuals.scalable_content.as_mut() {
            content.set_scale(1.0);
        }
        self.visuals.surface.set_scale(1.0);
        if let Some(baseline) = self.default_fade_color {
            self.visuals.set_fade_color(baseline);
        }

        self.visuals.surface.set_active(true);
        self.on_shown();
    }

    pub(crate) fn hide_internal(&mut self) {
        self.events.emit(LifecycleEvent::WillHide);

        if !self.settings.is_animated() {
            self.hide_instant_internal();
            return;
        }

        let params = self.transition_params();
        self.state = WindowState::Hiding;
        let backend = self.settings.backend().unwrap_or_default();
        self.animator
            .get_or_insert_with(|| backend.create_driver())
            .animate_hide(&params, &mut self.visuals, Completion::Hidden);
    }

    pub(crate) fn hide_instant_internal(&mut self) {
        self.cancel_animation();
        self.on_hidden();
    }

    //--- Frame Tick -------------------------------------------------------

    /// Advances the in-flight animation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };

        match animator.advance(dt, &mut self.visuals) {
            Some(Completion::Shown) => self.on_shown(),
            Some(Completion::Hidden) => self.on_hidden(),
            None => {}
        }
    }

    //--- Service Hooks ----------------------------------------------------

    pub(crate) fn bind(&mut self, key: WindowKey, navigator: Navigator) {
        self.binding = Some(WindowBinding { key, navigator });
    }

    pub(crate) fn inherit_backend(&mut self, backend: AnimationBackend) {
        self.settings.inherit_backend(backend);
    }

    pub(crate) fn reparent(&mut self, root: &dyn RootSurface) {
        self.visuals.surface.reparent(root, false);
    }

    /// Cancels animations and releases the host surface.
    pub(crate) fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.cancel_animation();
        self.visuals.surface.destroy();
        self.events.clear();
        self.binding = None;
        self.destroyed = true;
    }

    //--- Helpers ----------------------------------------------------------

    fn on_shown(&mut self) {
        self.state = WindowState::Shown;
        self.events.emit(LifecycleEvent::Shown);
    }

    fn on_hidden(&mut self) {
        self.visuals.surface.set_active(false);
        self.state = WindowState::Hidden;
        self.events.emit(LifecycleEvent::Hidden);
    }

    fn cancel_animation(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.cancel();
        }
    }

    /// Captures the fade baseline once, then builds fresh parameters.
    fn transition_params(&mut self) -> TransitionParams {
        if self.default_fade_color.is_none() {
            self.default_fade_color = self.visuals.fade_color();
        }

        TransitionParams::new(
            self.settings.duration(),
            self.settings.easing(),
            self.default_fade_color,
            &self.visuals,
        )
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("type", &self.type_name)
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("readiness", &self.readiness)
            .field("state", &self.state)
            .field("animating", &self.is_animating())
            .finish()
    }
}

/// Strips the module path: `game::ui::PauseMenu` → `PauseMenu`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::Surface;
    use crate::core::testing::{record_events, MockFade, MockNode, MockSurface, RecordingView, ViewLog};
    use approx::assert_relative_eq;
    use crossbeam_channel::unbounded;

    fn overlay(settings: WindowSettings) -> (Window, MockSurface, ViewLog) {
        let surface = MockSurface::inactive();
        let (view, log) = RecordingView::new();
        let window = Window::new(view, WindowVisuals::new(Box::new(surface.clone())))
            .with_kind(WindowKind::Overlay)
            .with_settings(settings);
        (window, surface, log)
    }

    fn animated() -> WindowSettings {
        WindowSettings::new()
            .animated(true)
            .with_duration(0.2)
            .with_backend(AnimationBackend::Stepped)
    }

    //--- Readiness --------------------------------------------------------

    #[test]
    fn ready_window_runs_setup_once() {
        let (mut window, _, log) = overlay(WindowSettings::new());

        window.ready_window().unwrap();
        window.ready_window().unwrap();

        assert_eq!(log.initialized(), 1);
        assert!(window.is_ready());
    }

    #[test]
    fn ready_window_applies_start_hidden() {
        let (mut window, surface, log) = overlay(WindowSettings::new().start_hidden(true));
        surface.clone().set_active(true);

        window.ready_window().unwrap();

        assert_eq!(window.state(), WindowState::Hidden);
        assert!(!surface.is_active());
        assert_eq!(log.updates(), 0);
    }

    #[test]
    fn ready_window_applies_instant_show() {
        let (mut window, surface, log) = overlay(WindowSettings::new());

        window.ready_window().unwrap();

        assert_eq!(window.state(), WindowState::Shown);
        assert!(surface.is_active());
        assert_eq!(log.updates(), 1);
    }

    #[test]
    fn failed_setup_returns_to_unready() {
        let surface = MockSurface::new();
        let (view, _) = RecordingView::failing();
        let mut window = Window::new(view, WindowVisuals::new(Box::new(surface)))
            .with_kind(WindowKind::Overlay);

        assert!(matches!(window.ready_window(), Err(UiError::WindowSetup { .. })));
        assert_eq!(window.readiness(), Readiness::Unready);
    }

    //--- Overlay Transitions ---------------------------------------------

    #[test]
    fn unanimated_show_degrades_to_instant() {
        let (mut window, surface, log) = overlay(WindowSettings::new().start_hidden(true));
        window.ready_window().unwrap();
        let events = record_events(&mut window);

        window.show();

        assert_eq!(
            *events.borrow(),
            vec![LifecycleEvent::WillShow, LifecycleEvent::Shown]
        );
        assert!(surface.is_active());
        assert_eq!(log.updates(), 1);
    }

    #[test]
    fn animated_show_refreshes_once_then_completes_on_tick() {
        let (mut window, surface, log) = overlay(animated().start_hidden(true));
        window.ready_window().unwrap();
        let events = record_events(&mut window);

        window.show();
        assert_eq!(window.state(), WindowState::Showing);
        assert_eq!(log.updates(), 1);
        assert!(surface.is_active());
        assert_relative_eq!(surface.scale(), 0.0);

        window.tick(0.1);
        assert_eq!(window.state(), WindowState::Showing);
        window.tick(0.1);

        assert_eq!(window.state(), WindowState::Shown);
        assert_eq!(log.updates(), 1);
        assert_eq!(
            *events.borrow(),
            vec![LifecycleEvent::WillShow, LifecycleEvent::Shown]
        );
    }

    #[test]
    fn animated_hide_does_not_refresh() {
        let (mut window, surface, log) = overlay(animated());
        window.ready_window().unwrap();
        let updates_after_ready = log.updates();

        window.hide();
        assert_eq!(window.state(), WindowState::Hiding);
        for _ in 0..4 {
            window.tick(0.1);
        }

        assert_eq!(window.state(), WindowState::Hidden);
        assert!(!surface.is_active());
        assert_eq!(log.updates(), updates_after_ready);
    }

    #[test]
    fn hide_during_show_fires_hidden_once_and_never_shown() {
        for backend in [AnimationBackend::Stepped, AnimationBackend::Sequence] {
            let (mut window, _, _) = overlay(animated().with_backend(backend).start_hidden(true));
            window.ready_window().unwrap();
            let events = record_events(&mut window);

            window.show();
            window.tick(0.05);
            window.hide();
            for _ in 0..10 {
                window.tick(0.05);
            }

            let completions: Vec<_> = events
                .borrow()
                .iter()
                .copied()
                .filter(|e| matches!(e, LifecycleEvent::Shown | LifecycleEvent::Hidden))
                .collect();
            assert_eq!(completions, vec![LifecycleEvent::Hidden], "{:?}", backend);
        }
    }

    #[test]
    fn instant_round_trip_leaves_no_residue() {
        let content = MockNode::new(0.3);
        let surface = MockSurface::inactive();
        let (view, _) = RecordingView::new();
        let mut window = Window::new(
            view,
            WindowVisuals::new(Box::new(surface.clone())).with_scalable_content(Box::new(content.clone())),
        )
        .with_kind(WindowKind::Overlay)
        .with_settings(animated().start_hidden(true));
        window.ready_window().unwrap();

        window.show();
        window.tick(0.05);
        window.show_instant();
        window.hide_instant();

        assert!(!surface.is_active());
        assert!(!window.is_animating());
        assert_relative_eq!(content.scale(), 1.0);
        assert_relative_eq!(surface.scale(), 1.0);

        let events = record_events(&mut window);
        window.tick(1.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn fade_baseline_is_captured_once() {
        let fade = MockFade::new(Color::rgba(0.0, 0.0, 0.0, 0.8));
        let (view, _) = RecordingView::new();
        let mut window = Window::new(
            view,
            WindowVisuals::new(Box::new(MockSurface::inactive())).with_fade(Box::new(fade.clone())),
        )
        .with_kind(WindowKind::Overlay)
        .with_settings(animated().start_hidden(true));
        window.ready_window().unwrap();

        window.show();
        window.tick(0.05);
        assert!(fade.color().a < 0.8);

        window.hide();
        window.show();
        assert_eq!(window.default_fade_color(), Some(Color::rgba(0.0, 0.0, 0.0, 0.8)));

        for _ in 0..10 {
            window.tick(0.05);
        }
        assert_relative_eq!(fade.color().a, 0.8);
    }

    //--- Standard Routing -------------------------------------------------

    #[test]
    fn unbound_standard_window_ignores_show() {
        let surface = MockSurface::inactive();
        let (view, _) = RecordingView::new();
        let mut window = Window::new(view, WindowVisuals::new(Box::new(surface.clone())));

        window.show();

        assert!(!surface.is_active());
        assert_eq!(window.state(), WindowState::Hidden);
    }

    #[test]
    fn bound_standard_window_queues_requests() {
        let (tx, rx) = unbounded();
        let (view, _) = RecordingView::new();
        let mut window = Window::new(view, WindowVisuals::new(Box::new(MockSurface::new())));
        let key = WindowKey::default();
        window.bind(key, Navigator::new(tx));

        window.show();
        window.hide_instant();

        let requests: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            requests,
            vec![
                NavRequest::Show { target: WindowTarget::Key(key), instant: false },
                NavRequest::Hide { target: WindowTarget::Key(key), instant: true },
            ]
        );
    }

    //--- Misc -------------------------------------------------------------

    #[test]
    fn destroy_is_idempotent_and_releases_surface() {
        let (mut window, surface, _) = overlay(WindowSettings::new());

        window.destroy();
        window.destroy();

        assert!(window.is_destroyed());
        assert_eq!(surface.destroy_count(), 1);
    }

    #[test]
    fn view_downcasts_to_concrete_type() {
        let (window, _, _) = overlay(WindowSettings::new());
        assert!(window.view::<RecordingView>().is_some());
        assert_eq!(window.type_name(), "RecordingView");
    }

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(short_type_name("game::ui::PauseMenu"), "PauseMenu");
        assert_eq!(short_type_name("PauseMenu"), "PauseMenu");
        assert_eq!(short_type_name("game::Wrapper<core::Inner>"), "Wrapper<core::Inner>");
    }
}
