//=========================================================================
// Test Support
//=========================================================================
//
// In-memory host doubles shared by the unit tests.
//
// Every mock keeps its state behind `Rc<RefCell<..>>`, so a test can
// hand a boxed clone to a window and keep another clone to observe what
// the window did to it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::config::CanvasSettings;
use crate::core::animation::WindowVisuals;
use crate::core::host::{LoadMode, RootSurfaceFactory, SceneEventHub, SceneKey, SceneNotifier, SceneScanner, SceneSubscription};
use crate::core::surface::{Color, FadeSurface, RootSurface, Scalable, Surface};
use crate::core::window::{LifecycleEvent, Window, WindowView};
use crate::error::UiError;

/// Routes `log` output to the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//=== Surfaces ============================================================

#[derive(Debug)]
struct SurfaceState {
    active: bool,
    scale: f32,
    parent: Option<String>,
    destroyed: usize,
}

#[derive(Debug, Clone)]
pub struct MockSurface(Rc<RefCell<SurfaceState>>);

impl MockSurface {
    /// Active at unit scale.
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(SurfaceState {
            active: true,
            scale: 1.0,
            parent: None,
            destroyed: 0,
        })))
    }

    pub fn inactive() -> Self {
        let surface = Self::new();
        surface.0.borrow_mut().active = false;
        surface
    }

    pub fn is_active(&self) -> bool {
        self.0.borrow().active
    }

    pub fn scale(&self) -> f32 {
        self.0.borrow().scale
    }

    pub fn parent(&self) -> Option<String> {
        self.0.borrow().parent.clone()
    }

    pub fn destroy_count(&self) -> usize {
        self.0.borrow().destroyed
    }
}

impl Scalable for MockSurface {
    fn scale(&self) -> f32 {
        self.0.borrow().scale
    }

    fn set_scale(&mut self, scale: f32) {
        self.0.borrow_mut().scale = scale;
    }
}

impl Surface for MockSurface {
    fn is_active(&self) -> bool {
        self.0.borrow().active
    }

    fn set_active(&mut self, active: bool) {
        self.0.borrow_mut().active = active;
    }

    fn reparent(&mut self, parent: &dyn RootSurface, _world_position_stays: bool) {
        self.0.borrow_mut().parent = Some(parent.name().to_string());
    }

    fn destroy(&mut self) {
        let mut state = self.0.borrow_mut();
        state.destroyed += 1;
        state.active = false;
    }
}

/// Independently scaled content node.
#[derive(Debug, Clone)]
pub struct MockNode(Rc<RefCell<f32>>);

impl MockNode {
    pub fn new(scale: f32) -> Self {
        Self(Rc::new(RefCell::new(scale)))
    }

    pub fn scale(&self) -> f32 {
        *self.0.borrow()
    }
}

impl Scalable for MockNode {
    fn scale(&self) -> f32 {
        *self.0.borrow()
    }

    fn set_scale(&mut self, scale: f32) {
        *self.0.borrow_mut() = scale;
    }
}

#[derive(Debug, Clone)]
pub struct MockFade(Rc<RefCell<Color>>);

impl MockFade {
    pub fn new(color: Color) -> Self {
        Self(Rc::new(RefCell::new(color)))
    }

    pub fn color(&self) -> Color {
        *self.0.borrow()
    }
}

impl FadeSurface for MockFade {
    fn color(&self) -> Color {
        *self.0.borrow()
    }

    fn set_color(&mut self, color: Color) {
        *self.0.borrow_mut() = color;
    }
}

//=== Root Surface ========================================================

#[derive(Debug, Default)]
struct RootState {
    created: Vec<String>,
    configured: Option<CanvasSettings>,
    destroyed: usize,
}

/// Observes what happened to roots created by a [`MockRootFactory`].
#[derive(Debug, Clone, Default)]
pub struct RootLog(Rc<RefCell<RootState>>);

impl RootLog {
    pub fn created(&self) -> Vec<String> {
        self.0.borrow().created.clone()
    }

    pub fn configured(&self) -> Option<CanvasSettings> {
        self.0.borrow().configured
    }

    pub fn destroyed(&self) -> usize {
        self.0.borrow().destroyed
    }
}

pub struct MockRoot {
    name: String,
    log: RootLog,
}

impl RootSurface for MockRoot {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&mut self, settings: &CanvasSettings) {
        self.log.0.borrow_mut().configured = Some(*settings);
    }

    fn destroy(&mut self) {
        self.log.0.borrow_mut().destroyed += 1;
    }
}

pub struct MockRootFactory {
    available: bool,
    log: RootLog,
}

impl MockRootFactory {
    pub fn new() -> (Self, RootLog) {
        let log = RootLog::default();
        (
            Self {
                available: true,
                log: log.clone(),
            },
            log,
        )
    }

    /// A factory whose host cannot create surfaces.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            log: RootLog::default(),
        }
    }
}

impl RootSurfaceFactory for MockRootFactory {
    fn create_root_surface(&mut self, name: &str) -> Option<Box<dyn RootSurface>> {
        if !self.available {
            return None;
        }

        self.log.0.borrow_mut().created.push(name.to_string());
        Some(Box::new(MockRoot {
            name: name.to_string(),
            log: self.log.clone(),
        }))
    }
}

//=== Views ===============================================================

#[derive(Debug, Default)]
struct ViewCounters {
    initialized: usize,
    updates: usize,
}

/// Counts how often a [`RecordingView`] was set up and refreshed.
#[derive(Debug, Clone, Default)]
pub struct ViewLog(Rc<RefCell<ViewCounters>>);

impl ViewLog {
    pub fn initialized(&self) -> usize {
        self.0.borrow().initialized
    }

    pub fn updates(&self) -> usize {
        self.0.borrow().updates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupBehavior {
    Succeed,
    Fail,
    Panic,
}

pub struct RecordingView {
    log: ViewLog,
    setup: SetupBehavior,
}

impl RecordingView {
    pub fn new() -> (Self, ViewLog) {
        Self::with_setup(SetupBehavior::Succeed)
    }

    /// Setup reports an error.
    pub fn failing() -> (Self, ViewLog) {
        Self::with_setup(SetupBehavior::Fail)
    }

    /// Setup panics.
    pub fn panicking() -> (Self, ViewLog) {
        Self::with_setup(SetupBehavior::Panic)
    }

    fn with_setup(setup: SetupBehavior) -> (Self, ViewLog) {
        let log = ViewLog::default();
        (Self { log: log.clone(), setup }, log)
    }
}

impl WindowView for RecordingView {
    fn initialize(&mut self) -> Result<(), UiError> {
        self.log.0.borrow_mut().initialized += 1;
        match self.setup {
            SetupBehavior::Succeed => Ok(()),
            SetupBehavior::Fail => Err(UiError::setup("RecordingView", "missing widget")),
            SetupBehavior::Panic => panic!("view setup exploded"),
        }
    }

    fn update_data(&mut self) {
        self.log.0.borrow_mut().updates += 1;
    }
}

/// A second view type for type-index tests.
#[derive(Debug, Default)]
pub struct StubView;

impl WindowView for StubView {
    fn update_data(&mut self) {}
}

/// Builds a window around `view` with a fresh inactive surface.
pub fn mock_window<V: WindowView>(view: V) -> (Window, MockSurface) {
    let surface = MockSurface::inactive();
    let window = Window::new(view, WindowVisuals::new(Box::new(surface.clone())));
    (window, surface)
}

/// Subscribes a recorder to every lifecycle event of `window`.
pub fn record_events(window: &mut Window) -> Rc<RefCell<Vec<LifecycleEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    window.events().subscribe(move |event| sink.borrow_mut().push(event));
    seen
}

//=== Scenes ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestScene {
    Boot,
    Menu,
    Level,
}

impl SceneKey for TestScene {}

#[derive(Default)]
struct HostState {
    hub: SceneEventHub<TestScene>,
    loaded: Vec<TestScene>,
    pending: HashMap<TestScene, Vec<Window>>,
}

/// Scripted scene host. Clones share state.
#[derive(Clone, Default)]
pub struct MockHost(Rc<RefCell<HostState>>);

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `window` in `scene`, to be found by the next scan.
    pub fn add_window(&self, scene: TestScene, window: Window) {
        self.0.borrow_mut().pending.entry(scene).or_default().push(window);
    }

    /// Marks `scene` loaded without notifying anyone.
    pub fn preload(&self, scene: TestScene) {
        self.0.borrow_mut().loaded.push(scene);
    }

    /// Loads `scene`. Unload notifications for replaced scenes are left
    /// to the test.
    pub fn load(&self, scene: TestScene, mode: LoadMode) {
        let mut state = self.0.borrow_mut();
        if mode == LoadMode::Single {
            state.loaded.clear();
        }
        state.loaded.push(scene);
        state.hub.emit_loaded(scene, mode);
    }

    pub fn unload(&self, scene: TestScene) {
        let mut state = self.0.borrow_mut();
        state.loaded.retain(|s| *s != scene);
        state.hub.emit_unloaded(scene);
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().hub.subscriber_count()
    }
}

impl SceneNotifier<TestScene> for MockHost {
    fn subscribe(&mut self) -> SceneSubscription<TestScene> {
        self.0.borrow_mut().hub.subscribe()
    }

    fn unsubscribe(&mut self, id: u64) {
        self.0.borrow_mut().hub.unsubscribe(id);
    }
}

impl SceneScanner<TestScene> for MockHost {
    fn loaded_scenes(&self) -> Vec<TestScene> {
        self.0.borrow().loaded.clone()
    }

    fn find_windows(&mut self, scene: TestScene) -> Vec<Window> {
        self.0.borrow_mut().pending.remove(&scene).unwrap_or_default()
    }
}
